//! Block label interning
//!
//! Blocks are opaque to the planner. Callers name them with strings; the
//! [`BlockTable`] maps each distinct label to a compact [`BlockId`] so that
//! states can be copied and hashed cheaply during search.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype wrapper for block identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Symbol table for interning block labels
///
/// Maintains bidirectional mappings between labels and ids. Each unique label
/// maps to exactly one id, assigned in first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockTable {
    block_map: FxHashMap<String, BlockId>,
    block_labels: Vec<String>,
}

impl BlockTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a label, returning its id (creates a new id if the label was not seen before)
    pub fn get_or_intern(&mut self, label: &str) -> BlockId {
        if let Some(&id) = self.block_map.get(label) {
            return id;
        }
        let id = BlockId(self.block_labels.len() as u32);
        self.block_map.insert(label.to_string(), id);
        self.block_labels.push(label.to_string());
        id
    }

    /// Look up a label without interning it
    pub fn get(&self, label: &str) -> Option<BlockId> {
        self.block_map.get(label).copied()
    }

    /// Get the label for a block id
    pub fn label(&self, id: BlockId) -> Option<&str> {
        self.block_labels.get(id.0 as usize).map(|s| s.as_str())
    }

    /// Label for display, falling back to the raw id for unknown blocks
    pub fn display(&self, id: BlockId) -> String {
        self.label(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    /// Number of interned blocks
    pub fn len(&self) -> usize {
        self.block_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block_labels.is_empty()
    }

    /// Iterate over all `(id, label)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &str)> {
        self.block_labels
            .iter()
            .enumerate()
            .map(|(i, label)| (BlockId(i as u32), label.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_is_idempotent() {
        let mut table = BlockTable::new();
        let a1 = table.get_or_intern("A");
        let b = table.get_or_intern("B");
        let a2 = table.get_or_intern("A");

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_ids_follow_first_seen_order() {
        let mut table = BlockTable::new();
        assert_eq!(table.get_or_intern("C"), BlockId(0));
        assert_eq!(table.get_or_intern("A"), BlockId(1));
        assert_eq!(table.get_or_intern("B"), BlockId(2));
    }

    #[test]
    fn test_reverse_lookup() {
        let mut table = BlockTable::new();
        let id = table.get_or_intern("red");

        assert_eq!(table.label(id), Some("red"));
        assert_eq!(table.get("red"), Some(id));
        assert_eq!(table.get("blue"), None);
        assert_eq!(table.label(BlockId(42)), None);
        assert_eq!(table.display(BlockId(42)), "#42");
    }

    #[test]
    fn test_iter_pairs() {
        let mut table = BlockTable::new();
        table.get_or_intern("x");
        table.get_or_intern("y");

        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(BlockId(0), "x"), (BlockId(1), "y")]);
        assert!(!table.is_empty());
    }
}
