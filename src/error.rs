use thiserror::Error;

/// Errors reported by the Kuhn-Munkres solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MunkresError {
    /// Zero rows or columns, or a cost buffer whose length is not `rows * cols`.
    #[error("invalid dimension: {rows}x{cols} matrix with {len} cost entries")]
    InvalidDimension { rows: usize, cols: usize, len: usize },

    /// Output buffer does not hold one entry per row.
    #[error("output buffer holds {actual} entries, expected {expected}")]
    OutputLength { expected: usize, actual: usize },

    #[error("unable to allocate storage for {cells} cells")]
    OutOfMemory { cells: usize },

    #[error("cost arithmetic overflowed during {0}")]
    CostOverflow(&'static str),

    /// The caller supplied iteration ceiling was reached before the matching completed.
    #[error("iteration limit of {0} reached before the matching was complete")]
    IterationLimitExceeded(u64),

    /// An internal invariant failed. This is a solver defect, never a property of the input.
    #[error("algorithm invariant violated: {0}")]
    AlgorithmInvariantViolation(&'static str),
}
