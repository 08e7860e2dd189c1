//! Running minimum and maximum

use crate::traits::StorelessStatistic;

#[cfg(feature = "std")]
use std::boxed::Box;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// Running minimum
///
/// NaN values are counted but never become the minimum.
#[derive(Clone, Debug, PartialEq)]
pub struct Min {
    value: f64,
    count: u64,
}

impl Default for Min {
    fn default() -> Self {
        Self::new()
    }
}

impl Min {
    /// Create an empty minimum (identity `+inf`)
    pub fn new() -> Self {
        Self {
            value: f64::INFINITY,
            count: 0,
        }
    }
}

impl StorelessStatistic for Min {
    fn increment(&mut self, value: f64) {
        if value < self.value {
            self.value = value;
        }
        self.count += 1;
    }

    /// NaN until a value has been seen
    fn result(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.value
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

/// Running maximum
///
/// NaN values are counted but never become the maximum.
#[derive(Clone, Debug, PartialEq)]
pub struct Max {
    value: f64,
    count: u64,
}

impl Default for Max {
    fn default() -> Self {
        Self::new()
    }
}

impl Max {
    /// Create an empty maximum (identity `-inf`)
    pub fn new() -> Self {
        Self {
            value: f64::NEG_INFINITY,
            count: 0,
        }
    }
}

impl StorelessStatistic for Max {
    fn increment(&mut self, value: f64) {
        if value > self.value {
            self.value = value;
        }
        self.count += 1;
    }

    /// NaN until a value has been seen
    fn result(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.value
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let mut min = Min::new();
        let mut max = Max::new();

        for v in [3.0, -2.0, 8.0, 0.5] {
            min.increment(v);
            max.increment(v);
        }

        assert_eq!(min.result(), -2.0);
        assert_eq!(max.result(), 8.0);
    }

    #[test]
    fn test_empty() {
        assert!(Min::new().result().is_nan());
        assert!(Max::new().result().is_nan());
    }

    #[test]
    fn test_nan_ignored() {
        let mut min = Min::new();
        min.increment(2.0);
        min.increment(f64::NAN);
        min.increment(1.0);

        assert_eq!(min.result(), 1.0);
        assert_eq!(min.n(), 3);
    }

    #[test]
    fn test_infinity() {
        let mut max = Max::new();
        max.increment(1.0);
        max.increment(f64::INFINITY);

        assert_eq!(max.result(), f64::INFINITY);
    }

    #[test]
    fn test_clear_restores_identity() {
        let mut max = Max::new();
        max.increment(5.0);
        max.clear();
        max.increment(-5.0);

        assert_eq!(max.result(), -5.0);
        assert_eq!(max.n(), 1);
    }
}
