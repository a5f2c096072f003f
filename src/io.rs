//! Plain text adapters around the solver.
//!
//! Input is a whitespace separated list of integers: the number of rows `m`, the number of
//! columns `n` and `m * n` costs in row-major order. The report holds the 1-based column of every
//! row (`0` for a row left unassigned) followed by the total cost, one value per line.
use crate::matrix::Matrix;
use crate::solution::{Assignment, Cost};
use anyhow::{bail, ensure, Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

fn next_token<'a, I>(tokens: &mut I, what: &str) -> Result<i64>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    match tokens.next() {
        Some((line, token)) => token
            .parse::<i64>()
            .with_context(|| format!("line {}: {} is not an integer: {:?}", line, what, token)),
        None => bail!("unexpected end of input while reading {}", what),
    }
}

/// Reads a cost matrix in the text format
pub fn read_problem<R: BufRead>(reader: R) -> Result<Matrix<i64>> {
    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .context("failed to read input")?;
    let mut tokens = lines
        .iter()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)));

    let rows = next_token(&mut tokens, "number of rows")?;
    let cols = next_token(&mut tokens, "number of columns")?;
    ensure!(rows > 0 && cols > 0, "dimensions must be positive, got {}x{}", rows, cols);
    let rows = usize::try_from(rows).context("number of rows")?;
    let cols = usize::try_from(cols).context("number of columns")?;
    let cells = rows
        .checked_mul(cols)
        .with_context(|| format!("{}x{} matrix is too large", rows, cols))?;

    let mut costs = Vec::new();
    costs
        .try_reserve_exact(cells)
        .with_context(|| format!("cannot allocate {}x{} matrix", rows, cols))?;
    for idx in 0..cells {
        let what = format!("cost ({}, {})", idx / cols + 1, idx % cols + 1);
        costs.push(next_token(&mut tokens, &what)?);
    }
    if let Some((line, token)) = tokens.next() {
        bail!("line {}: unexpected trailing token {:?}", line, token);
    }
    debug!("read {}x{} cost matrix", rows, cols);
    Ok(Matrix::from_vec(rows, cols, costs)?)
}

/// Writes the 1-based column of every row followed by the total cost
pub fn write_assignment<W: Write, C: Cost>(mut writer: W, assignment: &Assignment<C>) -> Result<()> {
    for column in &assignment.row_to_column {
        writeln!(writer, "{}", column.map_or(0, |j| j + 1))?;
    }
    writeln!(writer, "{}", assignment.total_cost)?;
    writer.flush()?;
    Ok(())
}
