//! Planner error types

use crate::ir::{BlockTable, ValidationError};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while planning
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Search exceeded its time budget of {budget:?}")]
    Timeout { budget: Duration },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlanError {
    /// Message with block ids replaced by their labels from `table`
    pub fn render(&self, table: &BlockTable) -> String {
        match self {
            PlanError::Validation(e) => format!("Invalid input: {}", e.render(table)),
            other => other.to_string(),
        }
    }
}

/// Result type for planner operations
pub type PlanResult<T> = Result<T, PlanError>;
