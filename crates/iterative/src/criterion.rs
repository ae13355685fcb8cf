//! Stopping rules for iterative methods: a distance between two successive iterates, compared
//! against `eps` by the solver.
use std::fmt;
use std::str::FromStr;

use num_traits::Float;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// `max_i |prev_i - cur_i|`
    #[default]
    AbsDeviation,
    /// `max_i |prev_i - cur_i| / |cur_i|`, infinite where `cur_i == 0`
    RelativeDiff,
}

impl Criterion {
    pub const ALL: [Criterion; 2] = [Criterion::AbsDeviation, Criterion::RelativeDiff];

    /// Name the criterion is selected by.
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::AbsDeviation => "abs_deviation",
            Criterion::RelativeDiff => "relative_diff",
        }
    }

    /// The distance function behind this criterion.
    pub fn func<T: Float>(&self) -> fn(&[T], &[T]) -> T {
        match self {
            Criterion::AbsDeviation => abs_deviation,
            Criterion::RelativeDiff => relative_diff,
        }
    }

    /// Distance between two iterates of equal length.
    pub fn distance<T: Float>(&self, prev: &[T], cur: &[T]) -> Result<T, Error> {
        if prev.len() != cur.len() {
            return Err(Error::LengthMismatch {
                prev: prev.len(),
                cur: cur.len(),
            });
        }
        Ok(self.func::<T>()(prev, cur))
    }
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        Criterion::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::UnknownCriterion {
                name: name.to_owned(),
            })
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Largest absolute componentwise difference. Both slices must have the same length.
///
/// A NaN component makes the whole distance NaN, which never passes an `< eps` test.
pub fn abs_deviation<T: Float>(prev: &[T], cur: &[T]) -> T {
    prev.iter()
        .zip(cur)
        .map(|(&p, &c)| (p - c).abs())
        .fold(T::zero(), nan_max)
}

/// Largest relative componentwise difference, measured against `cur`.
///
/// A zero component of `cur` yields `+inf`, which then dominates the maximum: the solver keeps
/// iterating until its budget runs out. Both slices must have the same length.
pub fn relative_diff<T: Float>(prev: &[T], cur: &[T]) -> T {
    prev.iter()
        .zip(cur)
        .map(|(&p, &c)| {
            if c == T::zero() {
                T::infinity()
            } else {
                ((p - c) / c).abs()
            }
        })
        .fold(T::zero(), nan_max)
}

/// `max` that propagates NaN instead of dropping it like [`Float::max`].
fn nan_max<T: Float>(acc: T, d: T) -> T {
    if d.is_nan() || d > acc {
        d
    } else {
        acc
    }
}
