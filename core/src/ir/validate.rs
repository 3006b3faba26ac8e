//! Input validation
//!
//! Rejects malformed problems before any search work is done: a block that
//! appears twice in one arrangement, or a block set that differs between the
//! start and the goal.

use super::state::Arrangement;
use super::symbols::{BlockId, BlockTable};
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Which side of the problem an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Initial,
    Goal,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Initial => write!(f, "initial"),
            Side::Goal => write!(f, "goal"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("block {block} appears more than once in the {side} arrangement")]
    DuplicateBlock { block: BlockId, side: Side },

    #[error("block {block} appears only in the {side} arrangement")]
    UnmatchedBlock { block: BlockId, side: Side },
}

impl ValidationError {
    pub fn block(&self) -> BlockId {
        match self {
            ValidationError::DuplicateBlock { block, .. }
            | ValidationError::UnmatchedBlock { block, .. } => *block,
        }
    }

    /// Same message as `Display`, naming the block by its label
    pub fn render(&self, table: &BlockTable) -> String {
        match self {
            ValidationError::DuplicateBlock { block, side } => format!(
                "block {} appears more than once in the {} arrangement",
                table.display(*block),
                side
            ),
            ValidationError::UnmatchedBlock { block, side } => format!(
                "block {} appears only in the {} arrangement",
                table.display(*block),
                side
            ),
        }
    }
}

fn block_set(state: &Arrangement, side: Side) -> Result<FxHashSet<BlockId>, ValidationError> {
    let mut seen = FxHashSet::default();
    for block in state.blocks() {
        if !seen.insert(block) {
            return Err(ValidationError::DuplicateBlock { block, side });
        }
    }
    Ok(seen)
}

/// Check that `initial` and `goal` partition the same set of blocks
pub fn validate_problem(initial: &Arrangement, goal: &Arrangement) -> Result<(), ValidationError> {
    let initial_blocks = block_set(initial, Side::Initial)?;
    let goal_blocks = block_set(goal, Side::Goal)?;

    // Report in arrangement order so the first offending block is deterministic
    if let Some(block) = initial.blocks().find(|b| !goal_blocks.contains(b)) {
        return Err(ValidationError::UnmatchedBlock {
            block,
            side: Side::Initial,
        });
    }
    if let Some(block) = goal.blocks().find(|b| !initial_blocks.contains(b)) {
        return Err(ValidationError::UnmatchedBlock {
            block,
            side: Side::Goal,
        });
    }

    Ok(())
}
