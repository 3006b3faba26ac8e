//! Blocks planner CLI
//!
//! Solves block-stacking problems from JSON files or from the command line.

use blocks_planner_core::{
    loader, time_budget_from_secs, AStarSolver, Arrangement, BlockTable, BlocksProblem, LoadResult,
    PlanResult, ProblemInstance, SearchConfig, SearchOutcome, SearchResult, StackOrder,
};
use clap::{Args, Parser, Subcommand};
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "blocks-plan")]
#[command(about = "Plan block-stacking moves with best-first search")]
#[command(version)]
struct Cli {
    /// Log search progress at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single problem file (JSON)
    Solve {
        /// Input problem file
        problem: PathBuf,

        #[command(flatten)]
        search: SearchArgs,

        /// Write the plan as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Solve every problem file in a directory
    Batch {
        /// Directory containing *.json problem files
        dir: PathBuf,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Solve arrangements given inline, e.g. --initial "A,B;C" --goal "A;B;C"
    Inline {
        /// Start arrangement: stacks separated by ';', blocks by ',' bottom to top
        #[arg(long)]
        initial: String,

        /// Goal arrangement, same syntax as --initial
        #[arg(long)]
        goal: String,

        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args, Clone, Debug, Default)]
struct SearchArgs {
    /// Time budget in seconds (default 45, or the problem's own budget)
    #[arg(short, long, value_parser = parse_time_budget)]
    time_budget: Option<Duration>,

    /// Treat stacks as an unordered collection in the goal test
    #[arg(long)]
    ignore_stack_order: bool,

    /// Skip checking for duplicate or mismatched blocks
    #[arg(long)]
    no_validate: bool,
}

fn parse_time_budget(arg: &str) -> Result<Duration, String> {
    let secs: f64 = arg
        .parse()
        .map_err(|_| format!("`{}` is not a number of seconds", arg))?;
    time_budget_from_secs(secs).map_err(|e| e.to_string())
}

impl SearchArgs {
    fn apply(&self, mut config: SearchConfig) -> SearchConfig {
        if let Some(budget) = self.time_budget {
            config = config.with_time_budget(budget);
        }
        if self.ignore_stack_order {
            config = config.with_stack_order(StackOrder::Ignored);
        }
        if self.no_validate {
            config = config.with_validation(false);
        }
        config
    }

    /// The problem's own configuration with command-line overrides on top
    fn config_for(&self, problem: &BlocksProblem) -> LoadResult<SearchConfig> {
        Ok(self.apply(problem.config()?))
    }
}

/// Parse `A,B;C` into `[["A", "B"], ["C"]]`
fn parse_arrangement(spec: &str) -> Vec<Vec<String>> {
    spec.split(';')
        .map(|stack| {
            stack
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|stack| !stack.is_empty())
        .collect()
}

fn run(instance: &ProblemInstance, config: SearchConfig) -> PlanResult<SearchResult> {
    debug!("Search config: {:?}", config);
    AStarSolver::new(config).search(&instance.initial, &instance.goal)
}

fn print_result(table: &BlockTable, initial: &Arrangement, goal: &Arrangement, result: &SearchResult) {
    println!("Initial: {}", initial.render(table));
    println!("Goal:    {}", goal.render(table));

    match result.outcome {
        SearchOutcome::Solved => {
            println!("Solved in {} moves:", result.plan.len());
            for (i, line) in result.plan.describe(table).iter().enumerate() {
                println!("  {:>3}. {}", i + 1, line);
            }
        }
        SearchOutcome::Exhausted => println!("No solution: search space exhausted"),
        SearchOutcome::TimedOut => println!("No solution: time budget exceeded"),
    }

    let stats = &result.stats;
    println!(
        "Expanded {} nodes, generated {}, pruned {} duplicates and {} stale entries, max frontier {}, {:.3}s",
        stats.nodes_expanded,
        stats.nodes_generated,
        stats.duplicates_pruned,
        stats.stale_pops,
        stats.max_frontier,
        stats.elapsed.as_secs_f64()
    );
}

fn solve_file(path: &Path, search: &SearchArgs, json: Option<&Path>) -> ExitCode {
    let problem = match loader::load_problem(path) {
        Ok(problem) => problem,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match search.config_for(&problem) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let instance = problem.to_instance();
    let result = match run(&instance, config) {
        Ok(result) => result,
        Err(e) => {
            error!("{}: {}", problem.id, e.render(&instance.table));
            return ExitCode::FAILURE;
        }
    };

    println!("Problem: {}", problem.id);
    print_result(&instance.table, &instance.initial, &instance.goal, &result);

    if let Some(out) = json {
        if let Err(e) = result.plan.to_json_file(out) {
            error!("Failed to write {}: {}", out.display(), e);
            return ExitCode::FAILURE;
        }
        println!("Plan written to {}", out.display());
    }

    if result.is_solved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// One summary line per problem; returns whether it solved as expected
fn batch_line(problem: &BlocksProblem, search: &SearchArgs) -> bool {
    let config = match search.config_for(problem) {
        Ok(config) => config,
        Err(e) => {
            println!("{:<24} error: {}", problem.id, e);
            return false;
        }
    };

    let instance = problem.to_instance();
    match run(&instance, config) {
        Ok(result) => {
            let moves = result.plan.len();
            let expected_ok = problem.expected_moves.map_or(true, |n| n == moves);
            let status = match (result.outcome, expected_ok) {
                (SearchOutcome::Solved, true) => "ok".to_string(),
                (SearchOutcome::Solved, false) => format!(
                    "unexpected length (expected {})",
                    problem.expected_moves.unwrap_or_default()
                ),
                (SearchOutcome::Exhausted, _) => "exhausted".to_string(),
                (SearchOutcome::TimedOut, _) => "timed out".to_string(),
            };
            println!(
                "{:<24} {:>4} moves {:>8} expanded {:>8.3}s  {}",
                problem.id,
                moves,
                result.stats.nodes_expanded,
                result.stats.elapsed.as_secs_f64(),
                status
            );
            result.is_solved() && expected_ok
        }
        Err(e) => {
            println!("{:<24} error: {}", problem.id, e.render(&instance.table));
            false
        }
    }
}

fn solve_batch(dir: &Path, search: &SearchArgs) -> ExitCode {
    let problems = match loader::load_problems(dir) {
        Ok(problems) => problems,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let passed = problems.iter().filter(|p| batch_line(p, search)).count();
    println!("{}/{} problems solved as expected", passed, problems.len());

    if passed == problems.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn solve_inline(initial: &str, goal: &str, search: &SearchArgs) -> ExitCode {
    let problem = BlocksProblem {
        id: "inline".to_string(),
        description: String::new(),
        initial: parse_arrangement(initial),
        goal: parse_arrangement(goal),
        expected_moves: None,
        time_budget_secs: None,
    };
    let instance = problem.to_instance();

    // inline problems carry no budget of their own
    match run(&instance, search.apply(SearchConfig::default())) {
        Ok(result) => {
            print_result(&instance.table, &instance.initial, &instance.goal, &result);
            if result.is_solved() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{}", e.render(&instance.table));
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match &cli.command {
        Commands::Solve {
            problem,
            search,
            json,
        } => solve_file(problem, search, json.as_deref()),
        Commands::Batch { dir, search } => solve_batch(dir, search),
        Commands::Inline {
            initial,
            goal,
            search,
        } => solve_inline(initial, goal, search),
    }
}
