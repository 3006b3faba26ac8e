//! Frontier of not-yet-expanded search nodes
//!
//! Pops the node with the smallest `f = g + h`, then the smallest `g`, then
//! the earliest insertion. The insertion counter makes the order total
//! without ever comparing arrangements.

use crate::ir::{Arrangement, Fingerprint, Move};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// Immutable snapshot of one point in the search
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: Arrangement,
    /// Visited-set key of `state`, computed once when the node is built
    pub fingerprint: Fingerprint,
    /// Cost so far
    pub g: usize,
    /// Heuristic estimate
    pub h: usize,
    /// Moves from the start, shared with ancestors
    pub path: MovePath,
}

impl SearchNode {
    pub fn f(&self) -> usize {
        self.g + self.h
    }
}

/// Persistent move list: a successor shares its parent's prefix
///
/// Appending never touches the parent, so nodes stay independent snapshots
/// while avoiding a full copy of the path per successor.
#[derive(Debug, Clone, Default)]
pub struct MovePath(Option<Arc<PathLink>>);

#[derive(Debug)]
struct PathLink {
    mv: Move,
    len: usize,
    parent: MovePath,
}

impl MovePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |link| link.len)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// A new path with `mv` appended
    pub fn push(&self, mv: Move) -> Self {
        MovePath(Some(Arc::new(PathLink {
            mv,
            len: self.len() + 1,
            parent: self.clone(),
        })))
    }

    /// Moves in application order
    pub fn to_vec(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.len());
        let mut cursor = self.0.as_ref();
        while let Some(link) = cursor {
            moves.push(link.mv);
            cursor = link.parent.0.as_ref();
        }
        moves.reverse();
        moves
    }
}

struct Entry {
    f: usize,
    g: usize,
    seq: u64,
    node: SearchNode,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    // BinaryHeap is a max-heap; reverse so the smallest key pops first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of search nodes with deterministic tie-breaking
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            f: node.f(),
            g: node.g,
            seq,
            node,
        });
    }

    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of nodes ever pushed
    pub fn pushed(&self) -> u64 {
        self.next_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BlockId, StackOrder};

    fn node(g: usize, h: usize, tag: u32) -> SearchNode {
        let state = Arrangement::new(vec![vec![BlockId(tag)]]);
        SearchNode {
            fingerprint: state.fingerprint(StackOrder::Significant),
            state,
            g,
            h,
            path: MovePath::new(),
        }
    }

    fn tag(node: &SearchNode) -> u32 {
        node.state.stacks()[0][0].0
    }

    #[test]
    fn test_pops_smallest_f_first() {
        let mut frontier = Frontier::new();
        frontier.push(node(0, 5, 1));
        frontier.push(node(2, 1, 2));
        frontier.push(node(1, 3, 3));

        let order: Vec<u32> = std::iter::from_fn(|| frontier.pop()).map(|n| tag(&n)).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_broken_by_smaller_g() {
        let mut frontier = Frontier::new();
        frontier.push(node(3, 1, 1));
        frontier.push(node(1, 3, 2));

        assert_eq!(tag(&frontier.pop().unwrap()), 2);
    }

    #[test]
    fn test_full_ties_broken_by_insertion_order() {
        let mut frontier = Frontier::new();
        for t in 0..5 {
            frontier.push(node(2, 2, t));
        }

        let order: Vec<u32> = std::iter::from_fn(|| frontier.pop()).map(|n| tag(&n)).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert_eq!(frontier.pushed(), 5);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_move_path_shares_prefix() {
        let root = MovePath::new();
        let a = root.push(Move::to_table(BlockId(0)));
        let ab = a.push(Move::onto(BlockId(1), BlockId(0)));
        let ac = a.push(Move::to_table(BlockId(2)));

        assert!(root.is_empty());
        assert_eq!(a.len(), 1);
        assert_eq!(
            ab.to_vec(),
            vec![Move::to_table(BlockId(0)), Move::onto(BlockId(1), BlockId(0))]
        );
        assert_eq!(
            ac.to_vec(),
            vec![Move::to_table(BlockId(0)), Move::to_table(BlockId(2))]
        );
        assert_eq!(a.to_vec(), vec![Move::to_table(BlockId(0))], "parent path unchanged");
    }
}
