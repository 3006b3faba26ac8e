//! Heuristic estimate of the remaining moves to the goal
//!
//! Two additive penalty terms, both measured against a fixed goal:
//! - support mismatch: blocks resting on something other than in the goal
//! - prefix deficiency: blocks above the longest bottom run of a stack that
//!   matches the start of some goal stack
//!
//! The estimate is not admissible, so plans are not guaranteed minimal.

use crate::ir::{Arrangement, BlockId, Fingerprint, StackOrder, SupportMap};

/// Goal arrangement with the data the heuristic and goal test need
///
/// Built once per search and passed explicitly, so one solver can serve
/// searches towards different goals.
#[derive(Debug, Clone)]
pub struct GoalContext<'a> {
    arrangement: &'a Arrangement,
    support: SupportMap,
    fingerprint: Fingerprint,
    order: StackOrder,
}

impl<'a> GoalContext<'a> {
    pub fn new(arrangement: &'a Arrangement, order: StackOrder) -> Self {
        Self {
            arrangement,
            support: arrangement.support_map(),
            fingerprint: arrangement.fingerprint(order),
            order,
        }
    }

    pub fn arrangement(&self) -> &Arrangement {
        self.arrangement
    }

    pub fn support(&self) -> &SupportMap {
        &self.support
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn order(&self) -> StackOrder {
        self.order
    }

    /// Goal test, consistent with the visited-set fingerprint
    pub fn is_satisfied_by(&self, state: &Arrangement) -> bool {
        state.same_as(self.arrangement, self.order)
    }
}

/// Breakdown of a heuristic estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeuristicScore {
    pub support_mismatch: u32,
    pub prefix_deficiency: u32,
    pub total: u32,
}

/// Count blocks whose supporter differs from the goal's
///
/// Walks the state's support map, so each block counts at most once. Blocks
/// the goal does not mention contribute nothing.
fn support_mismatch(state: &Arrangement, goal: &GoalContext<'_>) -> u32 {
    state
        .support_map()
        .iter()
        .filter(|&(block, support)| {
            goal.support
                .get(block)
                .is_some_and(|goal_support| goal_support != support)
        })
        .count() as u32
}

/// Length of the common bottom-up prefix of two stacks
fn common_prefix(stack: &[BlockId], goal_stack: &[BlockId]) -> usize {
    stack
        .iter()
        .zip(goal_stack)
        .take_while(|(a, b)| a == b)
        .count()
}

/// Sum over stacks of blocks above the best goal-prefix match
fn prefix_deficiency(state: &Arrangement, goal: &GoalContext<'_>) -> u32 {
    state
        .stacks()
        .iter()
        .map(|stack| {
            let best = goal
                .arrangement
                .stacks()
                .iter()
                .map(|goal_stack| common_prefix(stack, goal_stack))
                .max()
                .unwrap_or(0);
            (stack.len() - best) as u32
        })
        .sum()
}

/// Compute the heuristic with its two components
pub fn score_state(state: &Arrangement, goal: &GoalContext<'_>) -> HeuristicScore {
    let support_mismatch = support_mismatch(state, goal);
    let prefix_deficiency = prefix_deficiency(state, goal);

    HeuristicScore {
        support_mismatch,
        prefix_deficiency,
        total: support_mismatch + prefix_deficiency,
    }
}

/// Heuristic estimate `h(state, goal)`
pub fn estimate(state: &Arrangement, goal: &GoalContext<'_>) -> u32 {
    score_state(state, goal).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::BlockTable;

    fn pair(initial: Vec<Vec<&str>>, goal: Vec<Vec<&str>>) -> (Arrangement, Arrangement) {
        let mut table = BlockTable::new();
        let i = Arrangement::from_labels(&mut table, &initial);
        let g = Arrangement::from_labels(&mut table, &goal);
        (i, g)
    }

    #[test]
    fn test_zero_at_goal() {
        let (_, goal) = pair(vec![], vec![vec!["A", "B"], vec!["C", "D", "E"]]);
        let ctx = GoalContext::new(&goal, StackOrder::Significant);

        assert_eq!(score_state(&goal, &ctx), HeuristicScore::default());
    }

    #[test]
    fn test_single_misplaced_block() {
        let (state, goal) = pair(vec![vec!["A", "B"]], vec![vec!["A"], vec!["B"]]);
        let ctx = GoalContext::new(&goal, StackOrder::Significant);
        let score = score_state(&state, &ctx);

        // B sits on A instead of the table; [A B] matches only [A]
        assert_eq!(score.support_mismatch, 1);
        assert_eq!(score.prefix_deficiency, 1);
        assert_eq!(score.total, 2);
    }

    #[test]
    fn test_full_disassembly_estimate() {
        let (state, goal) = pair(vec![vec!["A", "B", "C"]], vec![vec!["A"], vec!["B"], vec!["C"]]);
        let ctx = GoalContext::new(&goal, StackOrder::Significant);
        let score = score_state(&state, &ctx);

        assert_eq!(score.support_mismatch, 2);
        assert_eq!(score.prefix_deficiency, 2);
        assert_eq!(estimate(&state, &ctx), 4);
    }

    #[test]
    fn test_prefix_uses_best_goal_stack_per_stack() {
        let (state, goal) = pair(
            vec![vec!["A", "B", "X"], vec!["C", "Y"]],
            vec![vec!["A", "B", "Q"], vec!["C", "Y", "X"]],
        );
        let ctx = GoalContext::new(&goal, StackOrder::Significant);

        // [A B X] matches [A B Q] for 2, [C Y] matches [C Y X] for 2
        assert_eq!(score_state(&state, &ctx).prefix_deficiency, 1);
    }

    #[test]
    fn test_wrong_bottom_counts_whole_stack() {
        let (state, goal) = pair(vec![vec!["B", "A"]], vec![vec!["A", "B"]]);
        let ctx = GoalContext::new(&goal, StackOrder::Significant);
        let score = score_state(&state, &ctx);

        assert_eq!(score.prefix_deficiency, 2);
        assert_eq!(score.support_mismatch, 2);
    }

    #[test]
    fn test_blocks_missing_from_goal_have_no_support_penalty() {
        let (state, goal) = pair(vec![vec!["A", "Z"]], vec![vec!["A"]]);
        let ctx = GoalContext::new(&goal, StackOrder::Significant);
        let score = score_state(&state, &ctx);

        assert_eq!(score.support_mismatch, 0);
        // Z still sits above the matched prefix
        assert_eq!(score.prefix_deficiency, 1);
    }

    #[test]
    fn test_repeated_block_counts_once() {
        // Only reachable with validation off; the later occurrence wins
        let (state, goal) = pair(vec![vec!["A", "B"], vec!["B"]], vec![vec!["A"], vec!["B"]]);
        let ctx = GoalContext::new(&goal, StackOrder::Significant);

        assert_eq!(score_state(&state, &ctx).support_mismatch, 0);
    }

    #[test]
    fn test_goal_context_respects_stack_order() {
        let (state, goal) = pair(vec![vec!["B"], vec!["A"]], vec![vec!["A"], vec!["B"]]);

        let strict = GoalContext::new(&goal, StackOrder::Significant);
        let loose = GoalContext::new(&goal, StackOrder::Ignored);

        assert!(!strict.is_satisfied_by(&state));
        assert!(loose.is_satisfied_by(&state));
        assert_eq!(estimate(&state, &strict), 0);
    }
}
