//! Simple (Jacobi) iteration for linear systems, `x <- C x + d`, after reordering the unknowns so
//! that `A` is diagonally dominant.

use linear::{find_dominant_permutation, Matrix};
use log::{trace, warn};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{Criterion, Error, IterationTrace, IterativeSolver, SolverConfig, SolverState};

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct SimpleIteration {
    config: SolverConfig,
    /// state after the latest solve
    state: SolverState,
    /// current number of iterations in a solve attempt
    curiter: usize,
    /// total number of iterations across all solves
    niters: usize,
    /// total number of solves that ran out of iterations
    nconvfails: usize,
}

impl SimpleIteration {
    /// Create a new solver
    ///
    /// # Arguments
    /// * `criterion` - name of the stopping rule, `"abs_deviation"` or `"relative_diff"`
    /// * `eps` - convergence threshold for the criterion
    /// * `max_iter` - the maximum number of iterations per solve
    pub fn new(criterion: &str, eps: f64, max_iter: usize) -> Result<Self, Error> {
        Self::from_config(SolverConfig::new(criterion, eps, max_iter)?)
    }

    pub fn from_config(config: SolverConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(SimpleIteration {
            config,
            state: SolverState::Initialized,
            curiter: 0,
            niters: 0,
            nconvfails: 0,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn criterion(&self) -> Criterion {
        self.config.criterion
    }

    fn iterate(&mut self, mat_a: &Matrix, b: &Matrix) -> Result<IterationTrace, Error> {
        let n = mat_a.nrows();
        if !mat_a.is_square() || b.nrows() != n || b.ncols() != 1 {
            return Err(linear::Error::ShapeMismatch {
                op: "SimpleIteration::solve",
                details: format!(
                    "A is {}x{}, b is {}x{}; expected n x n and n x 1",
                    mat_a.nrows(),
                    mat_a.ncols(),
                    b.nrows(),
                    b.ncols()
                ),
            }
            .into());
        }

        if mat_a.det()? == 0.0 {
            return Err(Error::SingularMatrix);
        }

        let order = find_dominant_permutation(mat_a)?.ok_or(Error::NotDiagonallyDominant)?;
        let dominant = mat_a.permute_columns(&order)?;
        trace!("column order {:?}", order);

        // x = C x + d, with C(i,j) = -a(i,j)/a(i,i) off the diagonal and d(i) = b(i)/a(i,i)
        let mut mat_c = Matrix::zeros(n, n)?;
        let mut d = Matrix::zeros(n, 1)?;
        for i in 0..n {
            let a_ii = dominant[(i, i)];
            for j in (0..n).filter(|&j| j != i) {
                mat_c[(i, j)] = -dominant[(i, j)] / a_ii;
            }
            d[(i, 0)] = b[(i, 0)] / a_ii;
        }

        let mut x = Matrix::zeros(n, 1)?;
        let mut trace = IterationTrace::new(x.col(0), order);
        self.state = SolverState::Iterating;

        let criterion = self.config.criterion;
        while self.curiter < self.config.max_iter {
            self.curiter += 1;
            self.niters += 1;

            let x_next = mat_c.mul(&x)?.add(&d)?;
            let (next, prev) = (x_next.col(0), x.col(0));
            let distance = criterion.distance(next.as_slice(), prev.as_slice())?;
            trace!("iter {}: {} = {:.6e}", self.curiter, criterion, distance);

            trace.push(next, distance);
            if distance < self.config.eps {
                self.state = SolverState::Converged;
                trace.finish(self.state);
                return Ok(trace);
            }
            x = x_next;
        }

        warn!(
            "simple iteration did not converge within {} iterations",
            self.config.max_iter
        );
        self.nconvfails += 1;
        self.state = SolverState::ExhaustedIterations;
        trace.finish(self.state);
        Ok(trace)
    }
}

impl IterativeSolver for SimpleIteration {
    fn solve(&mut self, mat_a: &Matrix, b: &Matrix) -> Result<IterationTrace, Error> {
        trace!("SimpleIteration::solve");

        self.state = SolverState::Initialized;
        self.curiter = 0;

        let retval = self.iterate(mat_a, b);
        if retval.is_err() {
            self.state = SolverState::Failed;
        }
        retval
    }

    fn state(&self) -> SolverState {
        self.state
    }

    fn get_num_iters(&self) -> usize {
        self.niters
    }

    fn get_cur_iter(&self) -> usize {
        self.curiter
    }

    fn get_num_conv_fails(&self) -> usize {
        self.nconvfails
    }
}
