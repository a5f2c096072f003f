use num_traits::{CheckedNeg, NumAssign, PrimInt, Signed};
use std::fmt::{Debug, Display};

/// Signed integer cost accepted by the solver
pub trait Cost: PrimInt + Signed + CheckedNeg + NumAssign + Display + Debug {}

impl<T> Cost for T where T: PrimInt + Signed + CheckedNeg + NumAssign + Display + Debug {}

///
/// Solution of the linear assignment problem
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<C>
where
    C: Cost,
{
    /// index i gives the column, j, assigned to row i
    ///
    /// Rows are left unassigned only when there are more rows than columns
    pub row_to_column: Vec<Option<usize>>,
    /// index j gives the row, i, assigned to column j
    pub column_to_row: Vec<Option<usize>>,
    /// sum of the original costs over all assigned pairs
    pub total_cost: C,
    /// number of unassigned rows
    pub num_unassigned: usize,
}

impl<C> Assignment<C>
where
    C: Cost,
{
    pub(crate) fn from_row_to_column(
        row_to_column: Vec<Option<usize>>,
        num_cols: usize,
        total_cost: C,
    ) -> Self {
        let mut column_to_row = vec![None; num_cols];
        for (i, j) in row_to_column.iter().enumerate() {
            if let Some(j) = j {
                column_to_row[*j] = Some(i);
            }
        }
        let num_unassigned = row_to_column.iter().filter(|j| j.is_none()).count();
        Assignment {
            row_to_column,
            column_to_row,
            total_cost,
            num_unassigned,
        }
    }

    /// Swaps the roles of rows and columns
    pub(crate) fn transposed(self) -> Self {
        let num_unassigned = self.column_to_row.iter().filter(|i| i.is_none()).count();
        Assignment {
            row_to_column: self.column_to_row,
            column_to_row: self.row_to_column,
            total_cost: self.total_cost,
            num_unassigned,
        }
    }

    /// Column of every row, or `None` if some row stayed unassigned
    pub fn columns(&self) -> Option<Vec<usize>> {
        self.row_to_column.iter().copied().collect()
    }

    /// Iterates assigned `(row, column)` pairs in row order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.row_to_column
            .iter()
            .enumerate()
            .filter_map(|(i, j)| j.map(|j| (i, j)))
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_unassigned == 0
    }
}

#[cfg(test)]
mod tests {
    use super::Assignment;

    #[test]
    fn test_inverse_mapping() {
        let a = Assignment::from_row_to_column(vec![Some(2), None, Some(0)], 3, 7i32);
        assert_eq!(a.column_to_row, vec![Some(2), None, Some(0)]);
        assert_eq!(a.num_unassigned, 1);
        assert_eq!(a.columns(), None);
        assert_eq!(a.pairs().collect::<Vec<_>>(), vec![(0, 2), (2, 0)]);
    }

    #[test]
    fn test_transposed() {
        let a = Assignment::from_row_to_column(vec![Some(1), Some(0)], 3, 4i64).transposed();
        assert_eq!(a.row_to_column, vec![Some(1), Some(0), None]);
        assert_eq!(a.column_to_row, vec![Some(1), Some(0)]);
        assert_eq!(a.num_unassigned, 1);
        assert!(!a.is_complete());
        assert_eq!(a.total_cost, 4);
    }
}
