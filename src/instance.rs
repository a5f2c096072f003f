use crate::error::MunkresError;
use crate::matrix::Matrix;
use crate::solution::Cost;
use tracing::trace;

/// Marking of a reduced cost zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Label {
    #[default]
    None,
    /// zero included in the current matching
    Starred,
    /// candidate zero found during the search for an augmenting path
    Primed,
}

/// Fixed capacity buffer of cells forming an alternating path of primed and starred zeros
#[derive(Debug, Clone)]
pub struct AugmentingPath {
    cells: Vec<(usize, usize)>,
    len: usize,
}

impl AugmentingPath {
    /// Path buffer for an instance with `num_rows` rows
    ///
    /// An augmenting path visits at most one starred zero per row, so `2 * num_rows + 1`
    /// cells always suffice.
    pub fn for_rows(num_rows: usize) -> Self {
        let capacity = 2 * num_rows + 1;
        AugmentingPath {
            cells: vec![(0, 0); capacity],
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn push(&mut self, row: usize, col: usize) -> Result<(), MunkresError> {
        if self.len == self.cells.len() {
            return Err(MunkresError::AlgorithmInvariantViolation(
                "augmenting path exceeds 2m+1 cells",
            ));
        }
        self.cells[self.len] = (row, col);
        self.len += 1;
        Ok(())
    }

    #[inline]
    pub fn last(&self) -> Option<(usize, usize)> {
        self.as_slice().last().copied()
    }

    pub fn as_slice(&self) -> &[(usize, usize)] {
        &self.cells[..self.len]
    }
}

/// Mutable state of a single Kuhn-Munkres run
#[derive(Debug, Clone)]
pub struct ProblemInstance<C: Cost> {
    // caller's costs, used only for the final tally
    original: Matrix<C>,
    // reduced costs
    cost: Matrix<C>,
    labels: Matrix<Label>,
    row_covered: Vec<bool>,
    col_covered: Vec<bool>,
    pub(crate) path: AugmentingPath,
}

impl<C: Cost> ProblemInstance<C> {
    /// Builds an instance owning `costs`.
    ///
    /// With `maximize` the working matrix holds negated costs, so the minimum-cost matching of
    /// the working matrix is the maximum-cost matching of `costs`.
    pub fn new(costs: Matrix<C>, maximize: bool) -> Result<Self, MunkresError> {
        let (num_rows, num_cols) = (costs.rows(), costs.cols());
        let mut cost = Matrix::from_slice(num_rows, num_cols, costs.as_slice())?;
        if maximize {
            for i in 0..num_rows {
                for value in cost.row_mut(i) {
                    *value = value
                        .checked_neg()
                        .ok_or(MunkresError::CostOverflow("negation of costs"))?;
                }
            }
        }
        let labels = Matrix::filled(num_rows, num_cols, Label::None)?;
        Ok(ProblemInstance {
            original: costs,
            cost,
            labels,
            row_covered: vec![false; num_rows],
            col_covered: vec![false; num_cols],
            path: AugmentingPath::for_rows(num_rows),
        })
    }

    /// Copies `num_rows * num_cols` row-major costs into a new instance.
    pub fn from_slice(costs: &[C], num_rows: usize, num_cols: usize) -> Result<Self, MunkresError> {
        Self::new(Matrix::from_slice(num_rows, num_cols, costs)?, false)
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.cost.rows()
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.cost.cols()
    }

    pub fn original_costs(&self) -> &Matrix<C> {
        &self.original
    }

    pub fn reduced_costs(&self) -> &Matrix<C> {
        &self.cost
    }

    pub fn labels(&self) -> &Matrix<Label> {
        &self.labels
    }

    #[inline]
    pub fn is_row_covered(&self, row: usize) -> bool {
        self.row_covered[row]
    }

    #[inline]
    pub fn is_col_covered(&self, col: usize) -> bool {
        self.col_covered[col]
    }

    pub fn path(&self) -> &AugmentingPath {
        &self.path
    }

    /// Subtracts the row minimum from every entry of each row
    pub(crate) fn reduce_rows(&mut self) -> Result<(), MunkresError> {
        for i in 0..self.num_rows() {
            let row = self.cost.row_mut(i);
            let min = row.iter().copied().fold(row[0], |acc, v| acc.min(v));
            for value in row.iter_mut() {
                *value = value
                    .checked_sub(&min)
                    .ok_or(MunkresError::CostOverflow("row reduction"))?;
            }
        }
        trace!("reduced costs: {:?}", self.cost);
        Ok(())
    }

    /// Greedily stars zeros with no other star in their row or column
    pub(crate) fn star_initial_zeros(&mut self) {
        for i in 0..self.num_rows() {
            for j in 0..self.num_cols() {
                if self.cost[(i, j)].is_zero() && !self.row_covered[i] && !self.col_covered[j] {
                    self.labels[(i, j)] = Label::Starred;
                    self.row_covered[i] = true;
                    self.col_covered[j] = true;
                }
            }
        }
        self.clear_covers();
    }

    /// Covers the columns of starred zeros and returns number of covered columns
    pub(crate) fn cover_starred_columns(&mut self) -> usize {
        for (_, j, label) in self.labels.iter_cells() {
            if *label == Label::Starred {
                self.col_covered[j] = true;
            }
        }
        self.col_covered.iter().filter(|covered| **covered).count()
    }

    pub(crate) fn clear_covers(&mut self) {
        self.row_covered.iter_mut().for_each(|c| *c = false);
        self.col_covered.iter_mut().for_each(|c| *c = false);
    }

    pub(crate) fn clear_primes(&mut self) {
        for i in 0..self.num_rows() {
            for label in self.labels.row_mut(i) {
                if *label == Label::Primed {
                    *label = Label::None;
                }
            }
        }
    }

    #[inline]
    pub(crate) fn cover_row(&mut self, row: usize) {
        self.row_covered[row] = true;
    }

    #[inline]
    pub(crate) fn uncover_col(&mut self, col: usize) {
        self.col_covered[col] = false;
    }

    #[inline]
    pub(crate) fn prime(&mut self, row: usize, col: usize) {
        self.labels[(row, col)] = Label::Primed;
    }

    pub fn find_star_in_row(&self, row: usize) -> Option<usize> {
        self.labels.row(row).iter().position(|l| *l == Label::Starred)
    }

    pub fn find_star_in_col(&self, col: usize) -> Option<usize> {
        (0..self.num_rows()).find(|i| self.labels[(*i, col)] == Label::Starred)
    }

    pub fn find_prime_in_row(&self, row: usize) -> Option<usize> {
        self.labels.row(row).iter().position(|l| *l == Label::Primed)
    }

    /// First uncovered zero in row-major order
    pub(crate) fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        (0..self.num_rows())
            .filter(|i| !self.row_covered[*i])
            .find_map(|i| {
                (0..self.num_cols())
                    .find(|j| self.cost[(i, *j)].is_zero() && !self.col_covered[*j])
                    .map(|j| (i, j))
            })
    }

    /// Smallest reduced cost among cells with uncovered row and column
    pub(crate) fn min_uncovered(&self) -> Option<C> {
        self.cost
            .iter_cells()
            .filter(|(i, j, _)| !self.row_covered[*i] && !self.col_covered[*j])
            .map(|(_, _, v)| *v)
            .min()
    }

    /// Flips the labels along the current path: stars are removed, every other cell is starred
    pub(crate) fn augment_path(&mut self) {
        for &(i, j) in self.path.as_slice() {
            let label = &mut self.labels[(i, j)];
            *label = if *label == Label::Starred {
                Label::None
            } else {
                Label::Starred
            };
        }
    }

    /// Adds `delta` to covered rows and subtracts it from uncovered columns
    pub(crate) fn shift_potentials(&mut self, delta: C) -> Result<(), MunkresError> {
        let overflow = || MunkresError::CostOverflow("dual update");
        for i in 0..self.num_rows() {
            let row_covered = self.row_covered[i];
            for (j, value) in self.cost.row_mut(i).iter_mut().enumerate() {
                // covered row with uncovered column is left unchanged
                match (row_covered, self.col_covered[j]) {
                    (true, true) => *value = value.checked_add(&delta).ok_or_else(overflow)?,
                    (false, false) => *value = value.checked_sub(&delta).ok_or_else(overflow)?,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Column starred in every row
    pub fn starred_columns(&self) -> Vec<Option<usize>> {
        (0..self.num_rows())
            .map(|i| self.find_star_in_row(i))
            .collect()
    }

    /// Sum of original costs over starred cells
    pub fn starred_cost(&self) -> Result<C, MunkresError> {
        self.labels
            .iter_cells()
            .filter(|(_, _, label)| **label == Label::Starred)
            .try_fold(C::zero(), |acc, (i, j, _)| {
                acc.checked_add(&self.original[(i, j)])
                    .ok_or(MunkresError::CostOverflow("total cost"))
            })
    }

    /// Checks the optimality certificate of a finished run
    ///
    /// Every reduced cost is non-negative, every starred cell has zero reduced cost and no row or
    /// column holds more than one star.
    pub fn complementary_slackness_holds(&self) -> bool {
        let mut stars_in_col = vec![0usize; self.num_cols()];
        for (i, row) in self.labels.iter_rows().enumerate() {
            let mut stars_in_row = 0;
            for (j, label) in row.iter().enumerate() {
                let value = self.cost[(i, j)];
                if value < C::zero() {
                    trace!("negative reduced cost at ({}, {})", i, j);
                    return false;
                }
                if *label == Label::Starred {
                    if !value.is_zero() {
                        trace!("starred cell ({}, {}) has non-zero reduced cost", i, j);
                        return false;
                    }
                    stars_in_row += 1;
                    stars_in_col[j] += 1;
                }
            }
            if stars_in_row > 1 {
                return false;
            }
        }
        stars_in_col.iter().all(|n| *n <= 1)
    }
}
