//! Intermediate representation for block-stacking problems
//!
//! - **symbols**: block identifiers and label interning
//! - **state**: arrangements, support maps and fingerprints
//! - **moves**: legal-move generation and state transition
//! - **validate**: eager rejection of malformed problems
//! - **plan**: the move sequence a search returns
//!
//! # Example
//!
//! ```rust
//! use blocks_planner_core::ir::*;
//!
//! let mut table = BlockTable::new();
//! let state = Arrangement::from_labels(&mut table, &[vec!["A", "B"], vec!["C"]]);
//!
//! let moves = legal_moves(&state);
//! let next = apply_move(&state, &moves[0]).unwrap();
//!
//! assert_eq!(next.render(&table), "[A] [C] [B]");
//! assert_eq!(state.render(&table), "[A B] [C]");
//! ```

mod moves;
mod plan;
mod state;
mod symbols;
mod validate;

pub use moves::{apply_move, legal_moves, Destination, Move, TABLE_LABEL};
pub use plan::{Plan, PlanStatistics};
pub use state::{Arrangement, Fingerprint, StackOrder, Support, SupportMap};
pub use symbols::{BlockId, BlockTable};
pub use validate::{validate_problem, Side, ValidationError};
