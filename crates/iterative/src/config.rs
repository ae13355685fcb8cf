#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{Criterion, Error};

/// Settings shared by the iterative solvers.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// stopping rule applied to successive iterates
    pub criterion: Criterion,
    /// the iteration stops once the criterion drops below `eps`
    pub eps: f64,
    /// maximum number of iterations per solve
    pub max_iter: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            criterion: Criterion::AbsDeviation,
            eps: 1e-6,
            max_iter: 100,
        }
    }
}

impl SolverConfig {
    /// Looks the criterion up by name, failing with [`Error::UnknownCriterion`] for unknown names.
    pub fn new(criterion: &str, eps: f64, max_iter: usize) -> Result<Self, Error> {
        let config = SolverConfig {
            criterion: criterion.parse()?,
            eps,
            max_iter,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// `eps` must be finite and positive, `max_iter` at least one.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(Error::InvalidArgument {
                msg: format!("eps must be a positive number, got {}", self.eps),
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidArgument {
                msg: "max_iter must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}
