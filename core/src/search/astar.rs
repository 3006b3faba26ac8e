//! A*-style best-first search
//!
//! Expands the frontier node with the smallest `f = g + h`, prunes states whose
//! fingerprint has already been expanded, and stops on the first goal pop, on
//! exhaustion, or when the wall-clock budget runs out.

use crate::error::{PlanError, PlanResult};
use crate::ir::{
    apply_move, legal_moves, validate_problem, Arrangement, Fingerprint, Move, Plan, StackOrder,
};
use crate::search::frontier::{Frontier, MovePath, SearchNode};
use crate::search::heuristic::{estimate, GoalContext};
use log::{debug, error, info, trace, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Wall-clock budget for a single search
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(45);

/// Convert a budget given in seconds
///
/// Negative, non-finite and values too large for a [`Duration`] are rejected.
pub fn time_budget_from_secs(secs: f64) -> PlanResult<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|e| PlanError::InvalidConfig(format!("time budget of {} s: {}", secs, e)))
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Abort once this much wall time has elapsed
    pub time_budget: Duration,

    /// Whether stack order matters for the goal test and the visited set
    pub stack_order: StackOrder,

    /// Reject duplicate or mismatched blocks before searching
    pub validate_input: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            stack_order: StackOrder::Significant,
            validate_input: true,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets whether stack order is significant.
    pub fn with_stack_order(mut self, order: StackOrder) -> Self {
        self.stack_order = order;
        self
    }

    /// Enables or disables input validation.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_input = validate;
        self
    }
}

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// A goal node was popped; the plan leads to it
    Solved,
    /// The frontier emptied without reaching the goal
    Exhausted,
    /// The time budget ran out; no partial plan is kept
    TimedOut,
}

/// Counters collected during one search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes popped and expanded (each fingerprint at most once)
    pub nodes_expanded: usize,

    /// Successor nodes pushed onto the frontier
    pub nodes_generated: usize,

    /// Successors dropped because their state was already expanded
    pub duplicates_pruned: usize,

    /// Frontier entries skipped on pop because their state was expanded
    /// after they were queued
    pub stale_pops: usize,

    /// Largest frontier size observed
    pub max_frontier: usize,

    /// Size of the visited set when the search ended
    pub visited: usize,

    /// `g` of the goal node, if one was popped
    pub goal_cost: Option<usize>,

    pub elapsed: Duration,
}

/// Search result
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: SearchOutcome,

    /// Moves to the goal; empty unless solved
    pub plan: Plan,

    pub stats: SearchStats,
}

impl SearchResult {
    pub fn is_solved(&self) -> bool {
        self.outcome == SearchOutcome::Solved
    }
}

/// Best-first solver for block-stacking problems
///
/// Holds only configuration; the goal is passed to each call, so a single
/// solver can be shared by searches towards different goals.
#[derive(Debug, Clone, Default)]
pub struct AStarSolver {
    config: SearchConfig,
}

impl AStarSolver {
    /// Create a new solver
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for a move sequence turning `initial` into `goal`
    ///
    /// Timeout and exhaustion are reported through [`SearchOutcome`]. Errors
    /// are reserved for invalid input and internal invariant violations.
    pub fn search(&self, initial: &Arrangement, goal: &Arrangement) -> PlanResult<SearchResult> {
        let start = Instant::now();
        let order = self.config.stack_order;

        if self.config.validate_input {
            validate_problem(initial, goal)?;
        }

        let goal = GoalContext::new(goal, order);
        let mut frontier = Frontier::new();
        let mut visited: FxHashSet<Fingerprint> = FxHashSet::default();
        let mut stats = SearchStats::default();

        let h0 = estimate(initial, &goal) as usize;
        debug!(
            "Starting search: {} blocks in {} stacks, goal has {} stacks, h0 = {}",
            initial.num_blocks(),
            initial.num_stacks(),
            goal.arrangement().num_stacks(),
            h0
        );

        frontier.push(SearchNode {
            fingerprint: initial.fingerprint(order),
            state: initial.clone(),
            g: 0,
            h: h0,
            path: MovePath::new(),
        });
        stats.max_frontier = 1;

        while !frontier.is_empty() {
            if start.elapsed() > self.config.time_budget {
                stats.visited = visited.len();
                stats.elapsed = start.elapsed();
                warn!(
                    "Search timed out after {:?} ({} nodes expanded, frontier {})",
                    stats.elapsed,
                    stats.nodes_expanded,
                    frontier.len()
                );
                return Ok(SearchResult {
                    outcome: SearchOutcome::TimedOut,
                    plan: Plan::new(),
                    stats,
                });
            }

            let Some(node) = frontier.pop() else {
                break;
            };

            // Lazy deletion: the same state may have been queued more than once
            if visited.contains(&node.fingerprint) {
                stats.stale_pops += 1;
                continue;
            }

            if node.fingerprint == *goal.fingerprint() {
                stats.visited = visited.len();
                stats.goal_cost = Some(node.g);
                stats.elapsed = start.elapsed();
                info!(
                    "Solved in {} moves ({} nodes expanded, {:?})",
                    node.g, stats.nodes_expanded, stats.elapsed
                );

                let mut plan = Plan::from_moves(node.path.to_vec(), node.fingerprint.digest());
                plan.cost = node.g;
                plan.add_metadata("nodes_expanded", stats.nodes_expanded.to_string());
                return Ok(SearchResult {
                    outcome: SearchOutcome::Solved,
                    plan,
                    stats,
                });
            }

            trace!("Expanding node g = {}, h = {}", node.g, node.h);
            visited.insert(node.fingerprint.clone());
            stats.nodes_expanded += 1;

            for mv in legal_moves(&node.state) {
                let next = match apply_move(&node.state, &mv) {
                    Ok(next) => next,
                    Err(e) => {
                        error!("Generated move {} could not be applied: {}", mv, e);
                        return Err(e);
                    }
                };

                let fingerprint = next.fingerprint(order);
                if visited.contains(&fingerprint) {
                    stats.duplicates_pruned += 1;
                    continue;
                }

                let h = estimate(&next, &goal) as usize;
                frontier.push(SearchNode {
                    fingerprint,
                    state: next,
                    g: node.g + 1,
                    h,
                    path: node.path.push(mv),
                });
                stats.nodes_generated += 1;
            }

            stats.max_frontier = stats.max_frontier.max(frontier.len());
        }

        stats.visited = visited.len();
        stats.elapsed = start.elapsed();
        info!(
            "Search space exhausted without reaching the goal ({} nodes expanded)",
            stats.nodes_expanded
        );

        Ok(SearchResult {
            outcome: SearchOutcome::Exhausted,
            plan: Plan::new(),
            stats,
        })
    }

    /// Move sequence, empty on exhaustion; a timeout becomes [`PlanError::Timeout`]
    pub fn solve(&self, initial: &Arrangement, goal: &Arrangement) -> PlanResult<Vec<Move>> {
        let result = self.search(initial, goal)?;
        match result.outcome {
            SearchOutcome::Solved => Ok(result.plan.moves),
            SearchOutcome::Exhausted => Ok(Vec::new()),
            SearchOutcome::TimedOut => Err(PlanError::Timeout {
                budget: self.config.time_budget,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BlockTable, Destination};

    fn problem(initial: Vec<Vec<&str>>, goal: Vec<Vec<&str>>) -> (BlockTable, Arrangement, Arrangement) {
        let mut table = BlockTable::new();
        let i = Arrangement::from_labels(&mut table, &initial);
        let g = Arrangement::from_labels(&mut table, &goal);
        (table, i, g)
    }

    fn labels(table: &BlockTable, moves: &[Move]) -> Vec<(String, String)> {
        moves.iter().map(|m| m.to_labels(table)).collect()
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
    }

    #[test]
    fn test_solver_creation() {
        let solver = AStarSolver::new(SearchConfig::default());
        assert_eq!(solver.config().time_budget, Duration::from_secs(45));
        assert_eq!(solver.config().stack_order, StackOrder::Significant);
        assert!(solver.config().validate_input);
    }

    #[test]
    fn test_already_solved() {
        let (_, initial, goal) = problem(vec![vec!["A", "B"]], vec![vec!["A", "B"]]);
        let result = AStarSolver::default().search(&initial, &goal).unwrap();

        assert!(result.is_solved());
        assert!(result.plan.is_empty());
        assert_eq!(result.stats.nodes_expanded, 0);
        assert_eq!(result.stats.goal_cost, Some(0));
    }

    #[test]
    fn test_unstack_one_block() {
        let (table, initial, goal) = problem(vec![vec!["A", "B"]], vec![vec!["A"], vec!["B"]]);
        let moves = AStarSolver::default().solve(&initial, &goal).unwrap();

        assert_eq!(labels(&table, &moves), pairs(&[("B", "Table")]));
    }

    #[test]
    fn test_stack_one_block() {
        let (table, initial, goal) = problem(vec![vec!["A"], vec!["B"]], vec![vec!["A", "B"]]);
        let moves = AStarSolver::default().solve(&initial, &goal).unwrap();

        assert_eq!(labels(&table, &moves), pairs(&[("B", "A")]));
    }

    #[test]
    fn test_disassembly_with_significant_stack_order() {
        let (table, initial, goal) =
            problem(vec![vec!["A", "B", "C"]], vec![vec!["A"], vec!["B"], vec!["C"]]);
        let result = AStarSolver::default().search(&initial, &goal).unwrap();

        // C has to be lifted again so its stack ends up after B's
        assert!(result.is_solved());
        assert_eq!(
            labels(&table, &result.plan.moves),
            pairs(&[("C", "Table"), ("B", "Table"), ("C", "Table")])
        );
        assert_eq!(result.plan.replay(&initial).unwrap(), goal);
    }

    #[test]
    fn test_disassembly_ignoring_stack_order() {
        let (table, initial, goal) =
            problem(vec![vec!["A", "B", "C"]], vec![vec!["A"], vec!["B"], vec!["C"]]);
        let config = SearchConfig::default().with_stack_order(StackOrder::Ignored);
        let result = AStarSolver::new(config).search(&initial, &goal).unwrap();

        assert_eq!(
            labels(&table, &result.plan.moves),
            pairs(&[("C", "Table"), ("B", "Table")])
        );
        let end = result.plan.replay(&initial).unwrap();
        assert!(end.same_as(&goal, StackOrder::Ignored));
        assert!(!end.same_as(&goal, StackOrder::Significant));
    }

    #[test]
    fn test_reverse_tower() {
        let (table, initial, goal) =
            problem(vec![vec!["A", "B", "C", "D"]], vec![vec!["D", "C", "B", "A"]]);
        let result = AStarSolver::default().search(&initial, &goal).unwrap();

        assert_eq!(
            labels(&table, &result.plan.moves),
            pairs(&[("D", "Table"), ("C", "D"), ("B", "C"), ("A", "B")])
        );
        assert_eq!(result.stats.goal_cost, Some(4));
    }

    #[test]
    fn test_missing_goal_block_rejected_by_validation() {
        let (_, initial, goal) = problem(vec![vec!["A"], vec!["B"]], vec![vec!["A", "B", "C"]]);
        let err = AStarSolver::default().search(&initial, &goal).unwrap_err();

        assert!(matches!(err, PlanError::Validation(_)));
    }

    #[test]
    fn test_missing_goal_block_exhausts_without_validation() {
        let (_, initial, goal) = problem(vec![vec!["A"], vec!["B"]], vec![vec!["A", "B", "C"]]);
        let config = SearchConfig::default().with_validation(false);
        let solver = AStarSolver::new(config);

        let result = solver.search(&initial, &goal).unwrap();
        assert_eq!(result.outcome, SearchOutcome::Exhausted);
        assert!(result.plan.is_empty());
        // two blocks reach exactly four arrangements
        assert_eq!(result.stats.nodes_expanded, 4);

        assert_eq!(solver.solve(&initial, &goal).unwrap(), Vec::<Move>::new());
    }

    #[test]
    fn test_zero_budget_times_out() {
        let (_, initial, goal) =
            problem(vec![vec!["A", "B", "C"]], vec![vec!["C", "B", "A"]]);
        let config = SearchConfig::default().with_time_budget(Duration::ZERO);
        let solver = AStarSolver::new(config);

        let result = solver.search(&initial, &goal).unwrap();
        assert_eq!(result.outcome, SearchOutcome::TimedOut);
        assert!(result.plan.is_empty());

        let err = solver.solve(&initial, &goal).unwrap_err();
        assert!(matches!(err, PlanError::Timeout { budget } if budget == Duration::ZERO));
    }

    #[test]
    fn test_visited_once() {
        let (_, initial, goal) = problem(
            vec![vec!["B", "A"], vec!["D", "C"], vec!["E"]],
            vec![vec!["A", "B", "C", "D", "E"]],
        );
        let result = AStarSolver::default().search(&initial, &goal).unwrap();

        assert!(result.is_solved());
        assert_eq!(result.stats.nodes_expanded, result.stats.visited);
    }

    #[test]
    fn test_pruning_counters() {
        let (_, initial, goal) = problem(
            vec![vec!["A", "B", "C", "D"]],
            vec![vec!["A"], vec!["B"], vec!["C"], vec!["D"]],
        );
        let result = AStarSolver::default().search(&initial, &goal).unwrap();

        assert_eq!(result.plan.len(), 5);
        assert_eq!(result.stats.nodes_expanded, 17);
        assert_eq!(result.stats.nodes_generated, 179);
        assert_eq!(result.stats.duplicates_pruned, 38);
        assert_eq!(result.stats.stale_pops, 1);
    }

    #[test]
    fn test_time_budget_from_secs() {
        assert_eq!(time_budget_from_secs(2.5).unwrap(), Duration::from_millis(2500));
        assert_eq!(time_budget_from_secs(0.0).unwrap(), Duration::ZERO);

        for bad in [1e30, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                time_budget_from_secs(bad),
                Err(PlanError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_plan_cost_matches_length() {
        let (_, initial, goal) = problem(
            vec![vec!["C", "A"], vec!["B"]],
            vec![vec!["A", "B", "C"]],
        );
        let result = AStarSolver::default().search(&initial, &goal).unwrap();

        assert_eq!(result.stats.goal_cost, Some(result.plan.len()));
        assert_eq!(result.plan.cost, result.plan.len());
        assert_eq!(result.plan.statistics().moves_to_table, 1);
        assert!(matches!(result.plan.moves[0].destination, Destination::Table));
    }

    #[test]
    fn test_solver_serves_different_goals() {
        let (_, initial, goal1) = problem(vec![vec!["A", "B"]], vec![vec!["A"], vec!["B"]]);
        let mut table = BlockTable::new();
        table.get_or_intern("A");
        table.get_or_intern("B");
        let goal2 = Arrangement::from_labels(&mut table, &[vec!["B", "A"]]);

        let solver = AStarSolver::default();
        let r1 = solver.search(&initial, &goal1).unwrap();
        let r2 = solver.search(&initial, &goal2).unwrap();

        assert_eq!(r1.plan.replay(&initial).unwrap(), goal1);
        assert_eq!(r2.plan.replay(&initial).unwrap(), goal2);
    }
}
