use linear::Matrix;

use crate::{Error, IterationTrace, SolverState};

pub trait IterativeSolver {
    /// Solves `A x = b` iteratively.
    ///
    /// # Arguments
    ///
    /// * `mat_a` - the square coefficient matrix `A`.
    /// * `b` - the right-hand side, an `n x 1` matrix.
    ///
    /// # Returns
    ///
    /// * `Ok(trace)` - every iterate, starting with the initial guess. Running out of iterations
    ///     is not an error: check [`IterationTrace::state`] to tell it apart from convergence.
    ///
    /// # Errors
    ///
    /// * `Err(Error::SingularMatrix)` - `A` has a zero determinant.
    /// * `Err(Error::NotDiagonallyDominant)` - the method is not applicable to `A`.
    /// * `Err(Error::Linear(_))` - the shapes of `A` and `b` do not fit together.
    fn solve(&mut self, mat_a: &Matrix, b: &Matrix) -> Result<IterationTrace, Error>;

    /// State after the most recent call to `solve`.
    fn state(&self) -> SolverState;

    /// get the total number of iterations across all solves (optional)
    fn get_num_iters(&self) -> usize {
        0
    }

    /// get the iteration count for the current solve
    fn get_cur_iter(&self) -> usize;

    /// get the total number of solves that ran out of iterations (optional)
    fn get_num_conv_fails(&self) -> usize {
        0
    }
}
