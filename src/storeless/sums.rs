//! Running sums: plain, squared and logarithmic

use crate::math;
use crate::traits::StorelessStatistic;

#[cfg(feature = "std")]
use std::boxed::Box;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// Running sum of the values seen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sum {
    value: f64,
    count: u64,
}

impl Sum {
    /// Create an empty sum
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorelessStatistic for Sum {
    fn increment(&mut self, value: f64) {
        self.value += value;
        self.count += 1;
    }

    fn result(&self) -> f64 {
        self.value
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

/// Running sum of squared values
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SumOfSquares {
    value: f64,
    count: u64,
}

impl SumOfSquares {
    /// Create an empty sum of squares
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorelessStatistic for SumOfSquares {
    fn increment(&mut self, value: f64) {
        self.value += value * value;
        self.count += 1;
    }

    fn result(&self) -> f64 {
        self.value
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

/// Running sum of natural logarithms
///
/// The logarithm is only defined for strictly positive values. Feeding zero
/// drives the sum to `-inf` and feeding a negative value drives it to NaN;
/// the summary rejects such vectors up front unless configured with
/// [`LogDomain::Propagate`](crate::multivariate::LogDomain::Propagate).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SumOfLogs {
    value: f64,
    count: u64,
}

impl SumOfLogs {
    /// Create an empty sum of logs
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorelessStatistic for SumOfLogs {
    fn increment(&mut self, value: f64) {
        self.value += math::ln(value);
        self.count += 1;
    }

    fn result(&self) -> f64 {
        self.value
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
