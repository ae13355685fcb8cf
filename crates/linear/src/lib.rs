mod cramer;
mod dominance;
mod elimination;
mod matrix;
mod system;

pub use cramer::cramer_2d;
pub use dominance::{
    find_dominant_permutation, get_diagonally_dominant, is_diagonally_dominant,
    BRUTEFORCE_MAX_COLS,
};
pub use elimination::gaussian_elimination;
pub use matrix::Matrix;
pub use system::LinearSystem;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Incompatible operand shapes in `{op}`: {details}")]
    ShapeMismatch { op: &'static str, details: String },

    /// A zero pivot was hit during elimination without pivoting.
    #[error("A zero pivot was encountered during Gaussian elimination (row {row})")]
    SingularPivot { row: usize },

    #[error("One of the input arguments was illegal: {msg}")]
    InvalidArgument { msg: String },

    #[error("A matrix needs at least one row and one column, and rows of equal length")]
    EmptyInput,
}

impl Error {
    pub(crate) fn shape(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Error::ShapeMismatch {
            op,
            details: format!("{}x{} and {}x{}", lhs.0, lhs.1, rhs.0, rhs.1),
        }
    }

    pub(crate) fn not_square(op: &'static str, shape: (usize, usize)) -> Self {
        Error::ShapeMismatch {
            op,
            details: format!("expected a square matrix, got {}x{}", shape.0, shape.1),
        }
    }
}
