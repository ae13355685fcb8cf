//! Direct solution of small dense systems by Gaussian elimination without pivoting.
//!
use nalgebra::{DMatrix, DVector};

use crate::{Error, Matrix};

/// Solves the N-dimensional system `A x = b` by forward elimination followed by back
/// substitution.
///
/// No pivoting is done: the caller guarantees that every pivot `a(i,i)` met during the forward
/// sweep is non-zero. A zero pivot is reported as [`Error::SingularPivot`] rather than letting
/// `inf`/`NaN` leak into the solution.
///
/// `A` and `b` are copied; the inputs are left untouched.
pub fn gaussian_elimination(mat_a: &Matrix, b: &[f64]) -> Result<DVector<f64>, Error> {
    let n = b.len();
    if mat_a.nrows() != n || mat_a.ncols() != n {
        return Err(Error::shape("gaussian_elimination", mat_a.shape(), (n, 1)));
    }

    let mut a: DMatrix<f64> = mat_a.as_dmatrix().clone();
    let mut b = DVector::from_column_slice(b);

    // forward elimination
    for i in 0..n {
        let pivot = a[(i, i)];
        if pivot == 0.0 {
            return Err(Error::SingularPivot { row: i });
        }

        for j in (i + 1)..n {
            // row_j = row_j - [a(j,i)/a(i,i)] row_i
            let factor = a[(j, i)] / pivot;
            for k in i..n {
                let a_ik = a[(i, k)];
                a[(j, k)] -= factor * a_ik;
            }
            let b_i = b[i];
            b[j] -= factor * b_i;
        }
    }

    // back substitution, the solution x overwrites b
    let mut x = DVector::<f64>::zeros(n);
    for i in (0..n).rev() {
        x[i] = b[i] / a[(i, i)];
        for j in 0..i {
            b[j] -= a[(j, i)] * x[i];
        }
    }

    Ok(x)
}
