//! Dense row/column matrix of `f64` cells with the arithmetic and triangularization used by the
//! solvers in this workspace.
//!
use std::fmt;
use std::ops::{Index, IndexMut};

use nalgebra::{DMatrix, DVector};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::Error;

/// Owned dense matrix. The shape is fixed at construction and always at least 1x1; copies never
/// share storage.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    /// Creates a matrix from a row-major literal.
    ///
    /// Fails with [`Error::EmptyInput`] if there are no rows, the rows are empty, or the rows have
    /// different lengths.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if nrows == 0 || ncols == 0 || rows.iter().any(|row| row.len() != ncols) {
            return Err(Error::EmptyInput);
        }

        Ok(Matrix {
            data: DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]),
        })
    }

    /// Zero-filled matrix of the given shape.
    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self, Error> {
        if nrows == 0 || ncols == 0 {
            return Err(Error::EmptyInput);
        }
        Ok(Matrix {
            data: DMatrix::zeros(nrows, ncols),
        })
    }

    pub fn identity(n: usize) -> Result<Self, Error> {
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        Ok(Matrix {
            data: DMatrix::identity(n, n),
        })
    }

    /// An `n x 1` column matrix holding `values`.
    pub fn column(values: &[f64]) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Matrix {
            data: DMatrix::from_column_slice(values.len(), 1, values),
        })
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn is_square(&self) -> bool {
        self.data.is_square()
    }

    /// Borrow the underlying storage.
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Deep copy; the result shares no storage with `self`.
    pub fn copy(&self) -> Matrix {
        self.clone()
    }

    /// Owned copy of row `i`.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.data.row(i).iter().copied().collect()
    }

    /// Owned copy of column `j` as a vector.
    pub fn col(&self, j: usize) -> DVector<f64> {
        self.data.column(j).into_owned()
    }

    /// Row-major copy of every cell.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows()).map(|i| self.row(i)).collect()
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap_rows(a, b);
    }

    pub fn swap_columns(&mut self, a: usize, b: usize) {
        self.data.swap_columns(a, b);
    }

    /// New matrix whose column `k` is column `order[k]` of `self`.
    ///
    /// `order` must be a permutation of `0..ncols`: a wrong length is a
    /// [`Error::ShapeMismatch`], an out-of-range or repeated index an [`Error::InvalidArgument`].
    pub fn permute_columns(&self, order: &[usize]) -> Result<Matrix, Error> {
        let n = self.ncols();
        if order.len() != n {
            return Err(Error::ShapeMismatch {
                op: "permute_columns",
                details: format!("{} columns, order of length {}", n, order.len()),
            });
        }
        let mut seen = vec![false; n];
        for &j in order {
            if j >= n || seen[j] {
                return Err(Error::InvalidArgument {
                    msg: format!("{:?} is not a permutation of 0..{}", order, n),
                });
            }
            seen[j] = true;
        }

        Ok(Matrix {
            data: DMatrix::from_fn(self.nrows(), n, |i, k| self.data[(i, order[k])]),
        })
    }

    /// Copy of `self` zero-padded or truncated to the given shape, keeping overlapping cells.
    pub fn resized(&self, nrows: usize, ncols: usize) -> Result<Matrix, Error> {
        if nrows == 0 || ncols == 0 {
            return Err(Error::EmptyInput);
        }
        Ok(Matrix {
            data: self.data.clone().resize(nrows, ncols, 0.0),
        })
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix, Error> {
        self.zip_map("add", other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix, Error> {
        self.zip_map("sub", other, |a, b| a - b)
    }

    fn zip_map(
        &self,
        op: &'static str,
        other: &Matrix,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Matrix, Error> {
        if self.shape() != other.shape() {
            return Err(Error::shape(op, self.shape(), other.shape()));
        }
        Ok(Matrix {
            data: self.data.zip_map(&other.data, f),
        })
    }

    /// Standard matrix product, computed with the plain triple loop.
    pub fn mul(&self, other: &Matrix) -> Result<Matrix, Error> {
        if self.ncols() != other.nrows() {
            return Err(Error::shape("mul", self.shape(), other.shape()));
        }

        let mut result = DMatrix::<f64>::zeros(self.nrows(), other.ncols());
        for i in 0..self.nrows() {
            for j in 0..other.ncols() {
                for k in 0..self.ncols() {
                    result[(i, j)] += self.data[(i, k)] * other.data[(k, j)];
                }
            }
        }

        Ok(Matrix { data: result })
    }

    /// `self` multiplied by itself `p` times; `p == 0` gives the identity.
    ///
    /// This is repeated multiplication rather than exponentiation by squaring. Both give the same
    /// result, and the powers used here are small.
    pub fn pow(&self, p: i32) -> Result<Matrix, Error> {
        if !self.is_square() {
            return Err(Error::not_square("pow", self.shape()));
        }
        if p < 0 {
            return Err(Error::InvalidArgument {
                msg: format!("negative matrix power {p} is not supported"),
            });
        }
        if p == 0 {
            return Matrix::identity(self.nrows());
        }

        let mut result = self.clone();
        for _ in 1..p {
            result = result.mul(self)?;
        }
        Ok(result)
    }

    /// Reduces a copy of the matrix to upper triangular form using Gaussian elimination with
    /// partial (row) pivoting.
    ///
    /// At elimination step `i` the row `j >= i` with the largest `|a(j,i)|` is swapped into row
    /// `i`, then `a(i,i)` eliminates the entries below it.
    ///
    /// A zero pivot means the whole remaining column is zero. The elimination factor for that
    /// step is then taken to be `0` and the rows below are left as they are; the zero ends up on
    /// the diagonal, which is exactly what [`Matrix::det`] needs.
    ///
    /// Returns the triangularized matrix and the number of row swaps performed.
    pub fn upper_triangular(&self) -> (Matrix, usize) {
        let mut mat = self.data.clone();
        let m = mat.nrows();
        let n = mat.ncols();
        let mut swaps = 0;

        for i in 0..m.min(n) {
            // find the pivot row
            let mut max_row = i;
            for j in (i + 1)..m {
                if mat[(j, i)].abs() > mat[(max_row, i)].abs() {
                    max_row = j;
                }
            }

            if max_row != i {
                mat.swap_rows(i, max_row);
                swaps += 1;
            }

            let pivot = mat[(i, i)];
            for j in (i + 1)..m {
                let factor = if pivot == 0.0 {
                    0.0
                } else {
                    -mat[(j, i)] / pivot
                };
                if factor == 0.0 {
                    continue;
                }
                // row_j = row_j + factor * row_i
                for k in i..n {
                    let a_ik = mat[(i, k)];
                    mat[(j, k)] += factor * a_ik;
                }
            }
        }

        (Matrix { data: mat }, swaps)
    }

    /// Determinant via [`Matrix::upper_triangular`]: the product of the diagonal, negated for an
    /// odd number of row swaps.
    pub fn det(&self) -> Result<f64, Error> {
        if !self.is_square() {
            return Err(Error::not_square("det", self.shape()));
        }

        let (upper, swaps) = self.upper_triangular();
        let d = upper.data.diagonal().iter().product::<f64>();
        Ok(if swaps % 2 == 0 { d } else { -d })
    }

    /// Determinant by recursive cofactor expansion along the first row.
    ///
    /// Exponential in the matrix size. Kept as a reference to cross-check [`Matrix::det`].
    pub fn det_slow(&self) -> Result<f64, Error> {
        if !self.is_square() {
            return Err(Error::not_square("det_slow", self.shape()));
        }
        Ok(cofactor_det(&self.data))
    }
}

fn cofactor_det(mat: &DMatrix<f64>) -> f64 {
    let n = mat.ncols();
    if n == 1 {
        return mat[(0, 0)];
    }

    (0..n)
        .map(|j| {
            let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
            let minor = mat.clone().remove_row(0).remove_column(j);
            sign * mat[(0, j)] * cofactor_det(&minor)
        })
        .sum()
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[index]
    }
}

impl TryFrom<DMatrix<f64>> for Matrix {
    type Error = Error;

    fn try_from(data: DMatrix<f64>) -> Result<Self, Error> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Matrix { data })
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows() {
            if i > 0 {
                writeln!(f)?;
            }
            for j in 0..self.ncols() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.data[(i, j)])?;
            }
        }
        Ok(())
    }
}
