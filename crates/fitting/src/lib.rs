mod least_squares;
mod statistics;

pub use least_squares::{
    fit_cubic, fit_exponential, fit_linear, fit_logarithmic, fit_polynomial, fit_power,
    fit_quadratic, Fit, FitKind,
};
pub use statistics::{mean_squared_error, pearson_correlation, r_squared};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Sample arrays must have the same length ({x} and {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("At least {needed} points are needed for this fit, got {got}")]
    NotEnoughPoints { needed: usize, got: usize },

    /// A logarithmic transform was applied to a value that is not strictly positive.
    #[error("All {what} values must be strictly positive for this fit")]
    NonPositive { what: &'static str },

    /// All x values coincide, so the fitted line is undetermined.
    #[error("The fit is undetermined for the given points")]
    Degenerate,

    #[error(transparent)]
    Linear(#[from] linear::Error),
}
