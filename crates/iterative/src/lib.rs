use thiserror::Error;

pub mod config;
pub mod criterion;
pub mod simple_iteration;
pub mod trace;
pub mod traits;

pub use config::SolverConfig;
pub use criterion::Criterion;
pub use simple_iteration::SimpleIteration;
pub use trace::{IterationTrace, SolverState, TraceEntry};
pub use traits::*;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The coefficient matrix has a zero determinant.
    #[error("The matrix A is singular")]
    SingularMatrix,

    /// No column order of A is diagonally dominant (or the search was cut off), so simple
    /// iteration is not applicable.
    #[error("The matrix A cannot be made diagonally dominant; the method is not applicable")]
    NotDiagonallyDominant,

    #[error("Criterion function `{name}` not found")]
    UnknownCriterion { name: String },

    #[error("One of the input arguments was illegal: {msg}")]
    InvalidArgument { msg: String },

    /// The two iterates handed to a criterion differ in length.
    #[error("Iterates of different lengths ({prev} and {cur}) cannot be compared")]
    LengthMismatch { prev: usize, cur: usize },

    #[error(transparent)]
    Linear(#[from] linear::Error),
}
