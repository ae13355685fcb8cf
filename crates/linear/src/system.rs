use nalgebra::DVector;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{gaussian_elimination, Error, Matrix};

/// A square system `A x = b`, with `A` of shape `n x n` and `b` of shape `n x 1`.
///
/// Meant for building a system up cell by cell; resizing keeps whatever overlaps.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSystem {
    a: Matrix,
    b: Matrix,
}

impl LinearSystem {
    pub fn new(a: Matrix, b: Matrix) -> Result<Self, Error> {
        let n = a.nrows();
        if !a.is_square() || b.nrows() != n || b.ncols() != 1 {
            return Err(Error::shape("LinearSystem::new", a.shape(), b.shape()));
        }
        Ok(LinearSystem { a, b })
    }

    /// All-zero system of size `n`.
    pub fn zeros(n: usize) -> Result<Self, Error> {
        Ok(LinearSystem {
            a: Matrix::zeros(n, n)?,
            b: Matrix::zeros(n, 1)?,
        })
    }

    pub fn n(&self) -> usize {
        self.a.nrows()
    }

    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn b(&self) -> &Matrix {
        &self.b
    }

    /// The right-hand side as a plain vector.
    pub fn rhs(&self) -> Vec<f64> {
        self.b.col(0).iter().copied().collect()
    }

    pub fn set_a(&mut self, i: usize, j: usize, value: f64) -> Result<(), Error> {
        let n = self.n();
        if i >= n || j >= n {
            return Err(Error::InvalidArgument {
                msg: format!("cell ({i}, {j}) is outside a {n}x{n} system"),
            });
        }
        self.a[(i, j)] = value;
        Ok(())
    }

    pub fn set_b(&mut self, i: usize, value: f64) -> Result<(), Error> {
        let n = self.n();
        if i >= n {
            return Err(Error::InvalidArgument {
                msg: format!("row {i} is outside a system of size {n}"),
            });
        }
        self.b[(i, 0)] = value;
        Ok(())
    }

    /// Zero-pads or truncates the system to size `n`, keeping the overlapping entries.
    pub fn resize(&mut self, n: usize) -> Result<(), Error> {
        let a = self.a.resized(n, n)?;
        let b = self.b.resized(n, 1)?;
        self.a = a;
        self.b = b;
        Ok(())
    }

    /// Direct solution by [`gaussian_elimination`].
    pub fn solve_direct(&self) -> Result<DVector<f64>, Error> {
        gaussian_elimination(&self.a, &self.rhs())
    }
}
