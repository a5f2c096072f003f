use anyhow::{Context, Result};
use clap::Parser;
use dense_linear_assignment::io::{read_problem, write_assignment};
use dense_linear_assignment::{solve_matrix, SolverOptions};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Solve a dense linear assignment problem with the Hungarian algorithm.
///
/// Input holds the number of rows and columns followed by the row-major costs. The report lists
/// the 1-based column of every row (0 if unassigned) and then the total cost.
#[derive(Parser, Debug)]
#[command(name = "hungarian")]
#[command(version)]
struct Cli {
    /// Input file, standard input if omitted
    input: Option<PathBuf>,

    /// Find the maximum-cost assignment
    #[arg(long)]
    maximize: bool,

    /// Abort after this many solver iterations
    #[arg(long, value_name = "N")]
    max_iterations: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("dense_linear_assignment=debug,hungarian=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let matrix = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            read_problem(BufReader::new(file))?
        }
        None => read_problem(io::stdin().lock())?,
    };

    let options = SolverOptions::default()
        .maximize(cli.maximize)
        .max_iterations(cli.max_iterations);
    let (rows, cols) = (matrix.rows(), matrix.cols());
    let assignment = solve_matrix(matrix, &options).context("solver failed")?;
    info!(
        "solved {}x{} instance, total cost {}",
        rows, cols, assignment.total_cost
    );

    write_assignment(io::stdout().lock(), &assignment)
}
