use nalgebra::DVector;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Where a solver is in its lifecycle.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SolverState {
    /// constructed, or reset at the start of a solve
    #[default]
    Initialized,
    /// iterates are being produced
    Iterating,
    /// the criterion dropped below `eps`
    Converged,
    /// `max_iter` iterations were done without converging
    ExhaustedIterations,
    /// the last solve returned an error
    Failed,
}

/// One step of an iterative method.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TraceEntry {
    pub iterate: DVector<f64>,
    /// criterion value against the previous iterate; `None` for the initial guess
    pub distance: Option<f64>,
}

/// The iterates of one solve, initial guess first.
///
/// Iterates are in the order of the unknowns of the reordered (diagonally dominant) system;
/// [`IterationTrace::permutation`] maps them back.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IterationTrace {
    entries: Vec<TraceEntry>,
    permutation: Vec<usize>,
    state: SolverState,
}

impl IterationTrace {
    pub(crate) fn new(initial: DVector<f64>, permutation: Vec<usize>) -> Self {
        IterationTrace {
            entries: vec![TraceEntry {
                iterate: initial,
                distance: None,
            }],
            permutation,
            state: SolverState::Iterating,
        }
    }

    pub(crate) fn push(&mut self, iterate: DVector<f64>, distance: f64) {
        self.entries.push(TraceEntry {
            iterate,
            distance: Some(distance),
        });
    }

    pub(crate) fn finish(&mut self, state: SolverState) {
        self.state = state;
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a trace produced by a solver: the initial guess is always recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of iterations performed, not counting the initial guess.
    pub fn num_iters(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn is_converged(&self) -> bool {
        self.state == SolverState::Converged
    }

    /// Column `k` of the iterated system is unknown `permutation()[k]` of the original one.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// The last iterate, in the order of the original unknowns.
    pub fn solution(&self) -> Option<DVector<f64>> {
        let last = &self.entries.last()?.iterate;
        let mut x = DVector::zeros(last.len());
        for (k, &j) in self.permutation.iter().enumerate() {
            x[j] = last[k];
        }
        Some(x)
    }
}
