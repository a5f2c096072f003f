//! Solver for the dense linear assignment problem.
//!
//! Finds a minimum-cost (or maximum-cost) matching between the rows and the columns of a
//! rectangular integer cost matrix with the Kuhn-Munkres (Hungarian) primal-dual algorithm.
//!
//! ```
//! use dense_linear_assignment::solve;
//!
//! let costs = [4, 1, 3, 2, 0, 5, 3, 2, 2];
//! let assignment = solve(&costs, 3, 3).unwrap();
//! assert_eq!(assignment.columns(), Some(vec![1, 0, 2]));
//! assert_eq!(assignment.total_cost, 5);
//! ```
pub mod error;
pub mod instance;
pub mod io;
pub mod matrix;
pub mod solution;
pub mod solver;

pub use crate::error::MunkresError;
pub use crate::instance::{Label, ProblemInstance};
pub use crate::matrix::Matrix;
pub use crate::solution::{Assignment, Cost};
pub use crate::solver::{MunkresSolver, SolverOptions, Step};

use tracing::debug;

/// Minimum-cost assignment of a row-major `rows x cols` cost matrix.
///
/// Every row is assigned when `rows <= cols`. With more rows than columns every column is
/// assigned and the excess rows stay unassigned.
pub fn solve<C: Cost>(costs: &[C], rows: usize, cols: usize) -> Result<Assignment<C>, MunkresError> {
    solve_with_options(costs, rows, cols, &SolverOptions::default())
}

/// Assignment of a row-major `rows x cols` cost matrix under the given objective and iteration limit.
pub fn solve_with_options<C: Cost>(
    costs: &[C],
    rows: usize,
    cols: usize,
    options: &SolverOptions,
) -> Result<Assignment<C>, MunkresError> {
    let matrix = Matrix::from_slice(rows, cols, costs)?;
    solve_matrix(matrix, options)
}

/// Solves an owned cost matrix.
///
/// Matrices with more rows than columns are solved in transposed form, so the state machine
/// always sees at most as many rows as columns.
pub fn solve_matrix<C: Cost>(
    costs: Matrix<C>,
    options: &SolverOptions,
) -> Result<Assignment<C>, MunkresError> {
    let transpose = costs.rows() > costs.cols();
    debug!(
        "solving {}x{} instance, maximize: {}, transpose: {}",
        costs.rows(),
        costs.cols(),
        options.maximize,
        transpose
    );
    let costs = if transpose { costs.transposed()? } else { costs };
    let instance = ProblemInstance::new(costs, options.maximize)?;
    let mut solver = MunkresSolver::new(instance, options);
    let assignment = solver.run()?;
    Ok(if transpose {
        assignment.transposed()
    } else {
        assignment
    })
}

/// Writes the column of every row into `out` and returns the total cost.
///
/// `out` must hold exactly `rows` entries.
pub fn solve_into<C: Cost>(
    costs: &[C],
    rows: usize,
    cols: usize,
    out: &mut [Option<usize>],
) -> Result<C, MunkresError> {
    if out.len() != rows {
        return Err(MunkresError::OutputLength {
            expected: rows,
            actual: out.len(),
        });
    }
    let assignment = solve(costs, rows, cols)?;
    out.copy_from_slice(&assignment.row_to_column);
    Ok(assignment.total_cost)
}
