//! Arithmetic and geometric means
//!
//! The arithmetic mean uses Welford's update, which avoids the cancellation a
//! naive `sum / n` suffers once the sum grows large relative to the spread of
//! the values.

use super::SumOfLogs;
use crate::math;
use crate::traits::StorelessStatistic;

#[cfg(feature = "std")]
use std::boxed::Box;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// Running arithmetic mean
///
/// # Example
///
/// ```
/// use multistats::storeless::Mean;
/// use multistats::traits::StorelessStatistic;
///
/// let mut mean = Mean::new();
/// mean.increment_all(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
///
/// assert!((mean.result() - 5.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mean {
    /// Number of values seen
    count: u64,
    /// Running mean
    mean: f64,
}

impl Mean {
    /// Create an empty mean
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorelessStatistic for Mean {
    fn increment(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
    }

    /// NaN until a value has been seen
    fn result(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.mean
        }
    }

    fn n(&self) -> u64 {
        self.count
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn copy(&self) -> Box<dyn StorelessStatistic> {
        Box::new(self.clone())
    }
}

/// Running geometric mean, `exp(sum_of_logs / n)`
///
/// Only meaningful when every value seen was strictly positive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometricMean {
    sum_of_logs: SumOfLogs,
}

impl GeometricMean {
    /// Create an empty geometric mean
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorelessStatistic for GeometricMean {
    fn increment(&mut self, value: f64) {
        self.sum_of_logs.increment(value);
    }

    /// NaN until a value has been seen
    fn result(&self) -> f64 {
        let n = self.sum_of_logs.n();
        if n == 0 {
            f64::NAN
        } else {
            math::exp(self.sum_of_logs.result() / n as f64)
        }
    }

    fn n(&self) -> u64 {
        self.sum_of_logs.n()
    }

    fn clear(&mut self) {
        self.sum_of_logs.clear();
    }

    fn copy(&self) -> Box<dyn StorelessStatistic> {
        Box::new(self.clone())
    }
}
