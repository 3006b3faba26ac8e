//! Blocks Planner Core
//!
//! Informed best-first planning for the block-stacking problem: given a start
//! arrangement of blocks in stacks and a goal arrangement, find a short
//! sequence of single-block moves that turns one into the other.
//!
//! ```rust
//! use blocks_planner_core::*;
//!
//! let mut table = BlockTable::new();
//! let initial = Arrangement::from_labels(&mut table, &[vec!["A", "B"]]);
//! let goal = Arrangement::from_labels(&mut table, &[vec!["A"], vec!["B"]]);
//!
//! let moves = solve(&initial, &goal).unwrap();
//! assert_eq!(moves.len(), 1);
//! assert_eq!(moves[0].to_labels(&table), ("B".to_string(), "Table".to_string()));
//! ```

pub mod error;
pub mod ir;       // Arrangements, moves, validation, plans
pub mod loader;   // JSON problem files
pub mod search;   // A* search and heuristic

pub use error::{PlanError, PlanResult};
pub use ir::*;
pub use loader::{BlocksProblem, LoadError, LoadResult, ProblemInstance};
pub use search::{
    time_budget_from_secs, AStarSolver, SearchConfig, SearchOutcome, SearchResult, SearchStats,
};

/// Plan with the default configuration
///
/// Returns the moves on success and an empty sequence if the search space is
/// exhausted. Running out of the 45-second budget yields [`PlanError::Timeout`].
pub fn solve(initial: &Arrangement, goal: &Arrangement) -> PlanResult<Vec<Move>> {
    AStarSolver::default().solve(initial, goal)
}
