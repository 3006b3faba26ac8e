//! JSON problem files
//!
//! Loads single problems or every `*.json` problem in a directory.

use super::{BlocksProblem, LoadError, LoadResult};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

fn check(problem: &BlocksProblem) -> LoadResult<()> {
    if let Some(label) = problem
        .initial
        .iter()
        .chain(&problem.goal)
        .flatten()
        .find(|label| label.trim().is_empty())
    {
        return Err(LoadError::InvalidFormat(format!(
            "{}: blank block label {:?}",
            problem.id, label
        )));
    }
    problem.config()?;
    Ok(())
}

/// Parse a problem from a JSON string
pub fn parse_problem(json: &str) -> LoadResult<BlocksProblem> {
    let problem: BlocksProblem =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;
    check(&problem)?;
    Ok(problem)
}

/// Load a single problem from a JSON file
pub fn load_problem<P: AsRef<Path>>(path: P) -> LoadResult<BlocksProblem> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path)
        .map_err(|e| LoadError::FileNotFound(format!("{}: {}", path.display(), e)))?;

    parse_problem(&contents)
}

/// Load every `*.json` problem in a directory, in file-name order
///
/// Files that fail to load are skipped with a warning.
pub fn load_problems<P: AsRef<Path>>(dir: P) -> LoadResult<Vec<BlocksProblem>> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(LoadError::FileNotFound(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)
        .map_err(|e| LoadError::FileNotFound(format!("{}: {}", dir.display(), e)))?
    {
        let entry = entry.map_err(|e| LoadError::FileNotFound(e.to_string()))?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut problems = Vec::new();
    for path in paths {
        match load_problem(&path) {
            Ok(problem) => problems.push(problem),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    Ok(problems)
}
