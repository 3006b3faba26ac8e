//! Moves: legal-move generation and state transition
//!
//! Only the top block of a stack is ever eligible to move, and it may only
//! land on the table or on the exposed top of another stack.

use super::state::Arrangement;
use super::symbols::{BlockId, BlockTable};
use crate::error::{PlanError, PlanResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for the table when moves are rendered as strings
pub const TABLE_LABEL: &str = "Table";

/// Where a moved block ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// Start a new singleton stack
    Table,
    /// On top of the stack whose current top is this block
    Block(BlockId),
}

/// A single-block relocation, meaningful relative to the state it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub block: BlockId,
    pub destination: Destination,
}

impl Move {
    pub fn to_table(block: BlockId) -> Self {
        Self {
            block,
            destination: Destination::Table,
        }
    }

    pub fn onto(block: BlockId, target: BlockId) -> Self {
        Self {
            block,
            destination: Destination::Block(target),
        }
    }

    /// `(block, destination)` labels, with [`TABLE_LABEL`] for the table
    pub fn to_labels(&self, table: &BlockTable) -> (String, String) {
        let destination = match self.destination {
            Destination::Table => TABLE_LABEL.to_string(),
            Destination::Block(target) => table.display(target),
        };
        (table.display(self.block), destination)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.destination {
            Destination::Table => write!(f, "{} -> {}", self.block, TABLE_LABEL),
            Destination::Block(target) => write!(f, "{} -> {}", self.block, target),
        }
    }
}

/// Enumerate every legal move from `state`
///
/// For each stack, in stack order: its top to the table, then its top onto
/// the top of every other stack (in stack order). No deduplication of moves
/// that happen to produce equal states.
pub fn legal_moves(state: &Arrangement) -> Vec<Move> {
    let stacks = state.stacks();
    let mut moves = Vec::with_capacity(stacks.len() * stacks.len());

    for (i, stack) in stacks.iter().enumerate() {
        let Some(&block) = stack.last() else {
            continue;
        };

        moves.push(Move::to_table(block));

        for (j, target_stack) in stacks.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(&target) = target_stack.last() {
                moves.push(Move::onto(block, target));
            }
        }
    }

    moves
}

/// Apply `mv` to `state`, producing a new arrangement
///
/// The input is left untouched. A stack emptied by the move is dropped; a move
/// to the table appends a new singleton stack at the end.
///
/// Fails with [`PlanError::InvariantViolation`] if the moving block is not the
/// top of some stack, or if the destination is not an exposed top after the
/// block has been lifted.
pub fn apply_move(state: &Arrangement, mv: &Move) -> PlanResult<Arrangement> {
    let mut stacks: Vec<Vec<BlockId>> = state.stacks().to_vec();

    let source = stacks
        .iter()
        .position(|s| s.last() == Some(&mv.block))
        .ok_or_else(|| {
            PlanError::InvariantViolation(format!(
                "block {} is not on top of any stack",
                mv.block
            ))
        })?;

    stacks[source].pop();
    if stacks[source].is_empty() {
        stacks.remove(source);
    }

    match mv.destination {
        Destination::Table => stacks.push(vec![mv.block]),
        Destination::Block(target) => {
            let stack = stacks
                .iter_mut()
                .find(|s| s.last() == Some(&target))
                .ok_or_else(|| {
                    PlanError::InvariantViolation(format!(
                        "destination {} is not on top of any stack",
                        target
                    ))
                })?;
            stack.push(mv.block);
        }
    }

    Ok(Arrangement::from_stacks(stacks))
}
