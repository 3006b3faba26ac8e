//! Python bindings for the blocks planner
//!
//! ```python
//! import blocks_planner
//! blocks_planner.solve([["A", "B"]], [["A"], ["B"]])  # [("B", "Table")]
//! ```

use blocks_planner_core::{
    time_budget_from_secs, AStarSolver, Arrangement, BlockTable, PlanError, SearchConfig,
    StackOrder,
};
use pyo3::exceptions::{PyRuntimeError, PyTimeoutError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: PlanError, table: &BlockTable) -> PyErr {
    let message = err.render(table);
    match err {
        PlanError::Timeout { .. } => PyTimeoutError::new_err(message),
        PlanError::Validation(_) | PlanError::InvalidConfig(_) => PyValueError::new_err(message),
        _ => PyRuntimeError::new_err(message),
    }
}

/// Plan moves from `initial` to `goal`; each stack is listed bottom to top.
///
/// Returns `(block, destination)` pairs, with "Table" as the table's name.
/// An empty list means the goal is unreachable.
#[pyfunction]
#[pyo3(signature = (initial, goal, time_budget_secs = 45.0, ignore_stack_order = false))]
fn solve(
    py: Python<'_>,
    initial: Vec<Vec<String>>,
    goal: Vec<Vec<String>>,
    time_budget_secs: f64,
    ignore_stack_order: bool,
) -> PyResult<Vec<(String, String)>> {
    let mut table = BlockTable::new();
    let budget = time_budget_from_secs(time_budget_secs).map_err(|e| to_py_err(e, &table))?;

    let order = if ignore_stack_order {
        StackOrder::Ignored
    } else {
        StackOrder::Significant
    };
    let config = SearchConfig::default()
        .with_time_budget(budget)
        .with_stack_order(order);

    let initial = Arrangement::from_labels(&mut table, &initial);
    let goal = Arrangement::from_labels(&mut table, &goal);

    let moves = py
        .allow_threads(|| AStarSolver::new(config).solve(&initial, &goal))
        .map_err(|e| to_py_err(e, &table))?;

    Ok(moves.iter().map(|m| m.to_labels(&table)).collect())
}

#[pymodule]
fn blocks_planner(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(solve, m)?)?;
    m.add("DEFAULT_TIME_BUDGET_SECS", 45.0)?;
    Ok(())
}
