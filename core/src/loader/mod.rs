//! Problem loader for JSON block-stacking problems
//!
//! A problem file names blocks with strings:
//!
//! ```json
//! { "id": "p01", "description": "Unstack one block",
//!   "initial": [["A", "B"]], "goal": [["A"], ["B"]],
//!   "expected_moves": 1 }
//! ```

pub mod json;

pub use json::{load_problem, load_problems};

use crate::ir::{Arrangement, BlockTable};
use crate::search::{time_budget_from_secs, SearchConfig};
use serde::{Deserialize, Serialize};

/// A block-stacking problem with labelled blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlocksProblem {
    /// Problem ID
    pub id: String,

    /// Problem description
    #[serde(default)]
    pub description: String,

    /// Start arrangement, stacks listed bottom to top
    pub initial: Vec<Vec<String>>,

    /// Goal arrangement, stacks listed bottom to top
    pub goal: Vec<Vec<String>>,

    /// Optional: plan length a solver is expected to find
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_moves: Option<usize>,

    /// Optional: time budget override in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_budget_secs: Option<f64>,
}

/// Arrangements interned against a shared block table
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub table: BlockTable,
    pub initial: Arrangement,
    pub goal: Arrangement,
}

impl BlocksProblem {
    /// Intern labels and build both arrangements
    pub fn to_instance(&self) -> ProblemInstance {
        let mut table = BlockTable::new();
        let initial = Arrangement::from_labels(&mut table, &self.initial);
        let goal = Arrangement::from_labels(&mut table, &self.goal);

        ProblemInstance {
            table,
            initial,
            goal,
        }
    }

    /// Default search configuration with this problem's budget override applied
    ///
    /// Fails if the override is negative or does not fit a `Duration`.
    pub fn config(&self) -> LoadResult<SearchConfig> {
        let config = SearchConfig::default();
        match self.time_budget_secs {
            Some(secs) => {
                let budget = time_budget_from_secs(secs)
                    .map_err(|e| LoadError::InvalidFormat(format!("{}: {}", self.id, e)))?;
                Ok(config.with_time_budget(budget))
            }
            None => Ok(config),
        }
    }
}

/// Problem loader result
pub type LoadResult<T> = Result<T, LoadError>;

/// Problem loading errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// File not found
    FileNotFound(String),

    /// JSON parsing error
    ParseError(String),

    /// Invalid problem format
    InvalidFormat(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FileNotFound(path) => write!(f, "File not found: {}", path),
            LoadError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            LoadError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}
