use crate::error::MunkresError;
use std::ops::{Index, IndexMut};

///
/// Owned dense matrix stored in row-major order
///
/// All constructors validate the shape, so a `Matrix` always has at least one row and one
/// column and exactly `rows * cols` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Returns number of cells for the given shape or `InvalidDimension`
fn checked_len(rows: usize, cols: usize, len: usize) -> Result<usize, MunkresError> {
    let invalid = MunkresError::InvalidDimension { rows, cols, len };
    if rows == 0 || cols == 0 {
        return Err(invalid);
    }
    rows.checked_mul(cols).ok_or(invalid)
}

fn allocate<T>(cells: usize) -> Result<Vec<T>, MunkresError> {
    let mut data = Vec::new();
    data.try_reserve_exact(cells)
        .map_err(|_| MunkresError::OutOfMemory { cells })?;
    Ok(data)
}

impl<T> Matrix<T> {
    /// Takes ownership of row-major `data`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, MunkresError> {
        let cells = checked_len(rows, cols, data.len())?;
        if cells != data.len() {
            return Err(MunkresError::InvalidDimension {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.offset(row, col).map(|idx| &self.data[idx])
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        let idx = self.offset(row, col)?;
        Some(&mut self.data[idx])
    }

    /// Slice of a single row. Panics if `row` is out of range.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row {} out of range for {} rows", row, self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        assert!(row < self.rows, "row {} out of range for {} rows", row, self.rows);
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates rows in ascending order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.cols)
    }

    /// Iterates `(row, col, value)` in row-major ascending order
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, value)| (idx / cols, idx % cols, value))
    }

    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }
}

impl<T: Clone> Matrix<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self, MunkresError> {
        let cells = checked_len(rows, cols, 0)?;
        let mut data = allocate(cells)?;
        data.resize(cells, value);
        Ok(Matrix { rows, cols, data })
    }

    /// Copies row-major `data` into a freshly allocated matrix.
    pub fn from_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self, MunkresError> {
        let cells = checked_len(rows, cols, data.len())?;
        if cells != data.len() {
            return Err(MunkresError::InvalidDimension {
                rows,
                cols,
                len: data.len(),
            });
        }
        let mut storage = allocate(cells)?;
        storage.extend_from_slice(data);
        Ok(Matrix {
            rows,
            cols,
            data: storage,
        })
    }

    /// Builds a matrix from a slice of equally sized rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, MunkresError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let len = rows.iter().map(|r| r.as_ref().len()).sum();
        let cells = checked_len(num_rows, num_cols, len)?;
        if rows.iter().any(|r| r.as_ref().len() != num_cols) {
            return Err(MunkresError::InvalidDimension {
                rows: num_rows,
                cols: num_cols,
                len,
            });
        }
        let mut data = allocate(cells)?;
        rows.iter().for_each(|r| data.extend_from_slice(r.as_ref()));
        Ok(Matrix {
            rows: num_rows,
            cols: num_cols,
            data,
        })
    }

    pub fn transposed(&self) -> Result<Self, MunkresError> {
        let mut data = allocate(self.data.len())?;
        for col in 0..self.cols {
            data.extend((0..self.rows).map(|row| self.data[row * self.cols + col].clone()));
        }
        Ok(Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        })
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.offset(row, col) {
            Some(idx) => &self.data[idx],
            None => panic!(
                "index ({}, {}) out of range for {}x{} matrix",
                row, col, self.rows, self.cols
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        match self.offset(row, col) {
            Some(idx) => &mut self.data[idx],
            None => panic!(
                "index ({}, {}) out of range for {}x{} matrix",
                row, col, self.rows, self.cols
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Matrix;
    use crate::error::MunkresError;

    #[test]
    fn test_from_slice_validates_shape() {
        assert_eq!(
            Matrix::from_slice(2, 2, &[1, 2, 3]),
            Err(MunkresError::InvalidDimension {
                rows: 2,
                cols: 2,
                len: 3
            })
        );
        assert!(matches!(
            Matrix::<i32>::from_slice(0, 3, &[]),
            Err(MunkresError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Matrix::filled(usize::MAX, 2, 0u8),
            Err(MunkresError::InvalidDimension { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_allocation_failure() {
        assert_eq!(
            Matrix::filled(1 << 40, 1 << 20, 0u8),
            Err(MunkresError::OutOfMemory { cells: 1 << 60 })
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let ragged: Vec<Vec<i32>> = vec![vec![1, 2], vec![3]];
        assert!(matches!(
            Matrix::from_rows(&ragged),
            Err(MunkresError::InvalidDimension { rows: 2, cols: 2, len: 3 })
        ));
        let empty: Vec<Vec<i32>> = vec![];
        assert!(Matrix::from_rows(&empty).is_err());
    }

    #[test]
    fn test_checked_access() {
        let mut m = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(m.get(1, 2), Some(&6));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m[(1, 0)], 4);
        assert_eq!(m.row(1), &[4, 5, 6]);
        *m.get_mut(0, 0).unwrap() = 9;
        assert_eq!(m[(0, 0)], 9);
        assert!(m.get_mut(2, 2).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range_panics() {
        let m = Matrix::filled(2, 2, 0).unwrap();
        let _ = m[(0, 2)];
    }

    #[test]
    fn test_iteration_is_row_major() {
        let m = Matrix::from_slice(2, 3, &[0, 1, 2, 3, 4, 5]).unwrap();
        let cells: Vec<_> = m.iter_cells().map(|(r, c, v)| (r, c, *v)).collect();
        assert_eq!(
            cells,
            vec![(0, 0, 0), (0, 1, 1), (0, 2, 2), (1, 0, 3), (1, 1, 4), (1, 2, 5)]
        );
        assert_eq!(m.iter_rows().count(), 2);
    }

    #[test]
    fn test_transposed() {
        let m = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        let t = m.transposed().unwrap();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.as_slice(), &[1, 4, 2, 5, 3, 6]);
    }
}
