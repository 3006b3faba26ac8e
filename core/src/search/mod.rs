//! Search module - A* best-first search over arrangements
//!
//! The solver owns the frontier and visited set for one call; the heuristic
//! scores successors against an explicitly passed goal.

pub mod astar;
pub mod frontier;
pub mod heuristic;

pub use astar::*;
pub use heuristic::{estimate, score_state, GoalContext, HeuristicScore};
