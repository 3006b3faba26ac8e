//! Plans: the move sequence returned by a successful search
//!
//! A [`Plan`] carries the moves in application order together with their cost
//! and a digest of the state they lead to, and can be replayed, summarised and
//! exported to JSON.

use super::moves::{apply_move, Destination, Move};
use super::state::Arrangement;
use super::symbols::{BlockId, BlockTable};
use crate::error::PlanResult;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Ordered sequence of moves from the initial arrangement to the goal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Moves in application order
    pub moves: Vec<Move>,

    /// Path cost (`g` of the goal node); one per move
    pub cost: usize,

    /// Digest of the fingerprint of the state the plan ends in
    pub final_digest: u64,

    /// Additional metadata about the run that produced the plan
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl Plan {
    /// Create a new empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plan from a move sequence with unit move cost
    pub fn from_moves(moves: Vec<Move>, final_digest: u64) -> Self {
        Self {
            cost: moves.len(),
            moves,
            final_digest,
            metadata: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }

    /// Apply every move in order to `initial`, returning the final arrangement
    pub fn replay(&self, initial: &Arrangement) -> PlanResult<Arrangement> {
        let mut state = initial.clone();
        for mv in &self.moves {
            state = apply_move(&state, mv)?;
        }
        Ok(state)
    }

    /// Render each move as a sentence, e.g. `Move B onto Table`
    pub fn describe(&self, table: &BlockTable) -> Vec<String> {
        self.moves
            .iter()
            .map(|mv| {
                let (block, destination) = mv.to_labels(table);
                format!("Move {} onto {}", block, destination)
            })
            .collect()
    }

    /// Moves as `(block, destination)` label pairs
    pub fn to_labels(&self, table: &BlockTable) -> Vec<(String, String)> {
        self.moves.iter().map(|mv| mv.to_labels(table)).collect()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> PlanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to compact JSON string
    pub fn to_json_compact(&self) -> PlanResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> PlanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write pretty JSON to `path`
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> PlanResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Get statistics about the plan
    pub fn statistics(&self) -> PlanStatistics {
        let mut per_block: FxHashMap<BlockId, usize> = FxHashMap::default();
        let mut moves_to_table = 0;

        for mv in &self.moves {
            *per_block.entry(mv.block).or_insert(0) += 1;
            if mv.destination == Destination::Table {
                moves_to_table += 1;
            }
        }

        // Ties go to the smaller id so the result does not depend on map order
        let most_moved_block = per_block
            .iter()
            .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
            .map(|(&block, &count)| (block, count));

        PlanStatistics {
            num_moves: self.moves.len(),
            moves_to_table,
            moves_onto_blocks: self.moves.len() - moves_to_table,
            distinct_blocks_moved: per_block.len(),
            most_moved_block,
        }
    }
}

/// Statistics about a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStatistics {
    pub num_moves: usize,
    pub moves_to_table: usize,
    pub moves_onto_blocks: usize,
    pub distinct_blocks_moved: usize,
    /// Block moved most often and how many times
    pub most_moved_block: Option<(BlockId, usize)>,
}
