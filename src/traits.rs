//! Core trait for storeless statistics and the crate error type
//!
//! Every per-dimension moment tracked by a
//! [`MultivariateSummary`](crate::multivariate::MultivariateSummary) is a
//! [`StorelessStatistic`] trait object, so a caller can swap the algorithm
//! used for one moment without touching the others.

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::boxed::Box;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// Error raised by summary construction, ingestion or queries
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Construction parameters are unusable
    InvalidConfig { reason: &'static str },
    /// A vector or implementation array does not have length k
    DimensionMismatch { expected: usize, found: usize },
    /// The operation is undefined for the current number of values
    InvalidState { operation: &'static str, n: u64 },
    /// A value outside the domain of a log-based moment
    DomainError { dimension: usize, value: f64 },
}

impl core::fmt::Display for StatsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatsError::InvalidConfig { reason } => write!(f, "invalid config: {}", reason),
            StatsError::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {}, found {}", expected, found)
            }
            StatsError::InvalidState { operation, n } => {
                write!(f, "invalid state: {} is not allowed with n = {}", operation, n)
            }
            StatsError::DomainError { dimension, value } => write!(
                f,
                "domain error: value {} in dimension {} must be strictly positive",
                value, dimension
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {}

/// An online statistic that consumes values one at a time
///
/// Implementations keep only the state needed to answer [`result`](Self::result);
/// the input sequence itself is never stored.
///
/// # Example
///
/// ```
/// use multistats::storeless::Sum;
/// use multistats::traits::StorelessStatistic;
///
/// let mut sum = Sum::new();
/// sum.increment_all(&[1.0, 2.0, 3.0]);
///
/// assert_eq!(sum.result(), 6.0);
/// assert_eq!(sum.n(), 3);
///
/// let copy = sum.copy();
/// sum.clear();
/// assert_eq!(sum.result(), 0.0);
/// assert_eq!(copy.result(), 6.0);
/// ```
pub trait StorelessStatistic: Debug + Send {
    /// Feed one value
    fn increment(&mut self, value: f64);

    /// Feed every value of `values` in order
    fn increment_all(&mut self, values: &[f64]) {
        for &value in values {
            self.increment(value);
        }
    }

    /// Current value of the statistic
    fn result(&self) -> f64;

    /// Number of values fed since construction or the last clear
    fn n(&self) -> u64;

    /// Reset to the identity state
    fn clear(&mut self);

    /// Independent instance with identical state
    fn copy(&self) -> Box<dyn StorelessStatistic>;
}

impl Clone for Box<dyn StorelessStatistic> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = StatsError::DimensionMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, found 2");

        let err = StatsError::InvalidState {
            operation: "mean",
            n: 0,
        };
        assert_eq!(err.to_string(), "invalid state: mean is not allowed with n = 0");

        let err = StatsError::DomainError {
            dimension: 1,
            value: -2.0,
        };
        assert!(err.to_string().contains("dimension 1"));
    }
}
