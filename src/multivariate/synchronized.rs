//! Thread-safe wrapper around [`MultivariateSummary`]
//!
//! Every operation runs inside one critical section on the instance's lock,
//! so a reader that combines several fields (covariance reads `n`, the sums
//! and the cross-product sums together) always sees the state left by some
//! sequence of completed `add_value` calls.
//!
//! The lock is reentrant: a thread that already holds it, for example inside
//! a [`with`](SynchronizedSummary::with) closure, can call any operation on
//! the same instance again.

use core::cell::RefCell;
use core::fmt;
use core::hash::{Hash, Hasher};

use parking_lot::ReentrantMutex;

use super::config::SummaryConfig;
use super::covariance::CovarianceMatrix;
use super::snapshot::SummarySnapshot;
use super::summary::{MultivariateSummary, StatisticVector};
use crate::traits::StatsError;

/// A [`MultivariateSummary`] that can be shared between threads
///
/// Share it with `Arc`. Several operations that must observe the same state
/// can be grouped in one critical section with [`with`](Self::with).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use multistats::multivariate::SynchronizedSummary;
///
/// let summary = Arc::new(SynchronizedSummary::new(2, true).unwrap());
///
/// let handles: Vec<_> = (1..=4)
///     .map(|i| {
///         let summary = Arc::clone(&summary);
///         thread::spawn(move || summary.add_value(&[i as f64, 2.0 * i as f64]))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap().unwrap();
/// }
///
/// assert_eq!(summary.n(), 4);
/// let mean = summary.mean().unwrap();
/// assert!((mean[0] - 2.5).abs() < 1e-12);
/// assert!((mean[1] - 5.0).abs() < 1e-12);
///
/// // n and mean observed together
/// let (n, mean) = summary.with(|s| (s.n(), s.mean()));
/// assert_eq!(n, 4);
/// assert!(mean.is_ok());
/// ```
pub struct SynchronizedSummary {
    dimension: usize,
    bias_corrected: bool,
    inner: ReentrantMutex<RefCell<MultivariateSummary>>,
}

/// Generates one delegate per operation, each running through
/// [`SynchronizedSummary::locked`]
macro_rules! guarded {
    ($(
        $(#[$meta:meta])*
        fn $name:ident($($arg:ident: $ty:ty),*) $(-> $ret:ty)?;
    )*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                self.locked(|summary| summary.$name($($arg),*))
            }
        )*
    };
}

impl SynchronizedSummary {
    /// Create a summary for `dimension`-vectors
    pub fn new(dimension: usize, bias_corrected: bool) -> Result<Self, StatsError> {
        MultivariateSummary::new(dimension, bias_corrected).map(Self::from)
    }

    /// Create a summary from a full config
    pub fn with_config(config: SummaryConfig) -> Result<Self, StatsError> {
        MultivariateSummary::with_config(config).map(Self::from)
    }

    /// Run one operation on the summary under the lock
    ///
    /// The cell stays borrowed only while `f` runs, and `f` is always a single
    /// summary method, so no caller code runs under the borrow and a nested
    /// call on the same thread always finds the cell free.
    fn locked<R>(&self, f: impl FnOnce(&mut MultivariateSummary) -> R) -> R {
        let guard = self.inner.lock();
        let mut summary = guard.borrow_mut();
        f(&mut summary)
    }

    /// Run `f` while holding the lock
    ///
    /// Other threads block until `f` returns, so every operation `f` calls on
    /// the summary it is given observes one state. The lock is released on
    /// every exit path, including unwinding. Calls back into this instance
    /// from inside `f`, directly or through another reference, do not block.
    pub fn with<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        let _guard = self.inner.lock();
        f(self)
    }

    /// Length of every accepted vector
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether variance and covariance divide by `n - 1`
    pub fn is_bias_corrected(&self) -> bool {
        self.bias_corrected
    }

    guarded! {
        /// Add one vector; see [`MultivariateSummary::add_value`]
        fn add_value(value: &[f64]) -> Result<(), StatsError>;
        /// Reset every moment and `n`
        fn clear();
        /// Number of vectors accepted
        fn n() -> u64;
        /// Per-dimension sums
        fn sum() -> Vec<f64>;
        /// Per-dimension sums of squares
        fn sum_sq() -> Vec<f64>;
        /// Per-dimension sums of natural logs
        fn sum_log() -> Vec<f64>;
        /// Per-dimension minimums
        fn min() -> Result<Vec<f64>, StatsError>;
        /// Per-dimension maximums
        fn max() -> Result<Vec<f64>, StatsError>;
        /// Per-dimension means
        fn mean() -> Result<Vec<f64>, StatsError>;
        /// Per-dimension geometric means
        fn geometric_mean() -> Result<Vec<f64>, StatsError>;
        /// Per-dimension standard deviations
        fn standard_deviation() -> Result<Vec<f64>, StatsError>;
        /// Covariance matrix
        fn covariance() -> Result<CovarianceMatrix, StatsError>;
        /// Every statistic from one consistent state
        fn snapshot() -> SummarySnapshot;
        /// Stable hash of the current state
        fn hash_code() -> u64;

        fn sum_impl() -> StatisticVector;
        fn set_sum_impl(sum_impl: StatisticVector) -> Result<(), StatsError>;
        fn sum_sq_impl() -> StatisticVector;
        fn set_sum_sq_impl(sum_sq_impl: StatisticVector) -> Result<(), StatsError>;
        fn sum_log_impl() -> StatisticVector;
        fn set_sum_log_impl(sum_log_impl: StatisticVector) -> Result<(), StatsError>;
        fn min_impl() -> StatisticVector;
        fn set_min_impl(min_impl: StatisticVector) -> Result<(), StatsError>;
        fn max_impl() -> StatisticVector;
        fn set_max_impl(max_impl: StatisticVector) -> Result<(), StatsError>;
        fn geo_mean_impl() -> StatisticVector;
        fn set_geo_mean_impl(geo_mean_impl: StatisticVector) -> Result<(), StatsError>;
        fn mean_impl() -> StatisticVector;
        fn set_mean_impl(mean_impl: StatisticVector) -> Result<(), StatsError>;
    }

    /// Deep copy of the current state
    pub fn to_summary(&self) -> MultivariateSummary {
        self.locked(|summary| summary.clone())
    }

    /// Unwrap the summary
    pub fn into_inner(self) -> MultivariateSummary {
        self.inner.into_inner().into_inner()
    }
}

impl From<MultivariateSummary> for SynchronizedSummary {
    fn from(summary: MultivariateSummary) -> Self {
        Self {
            dimension: summary.dimension(),
            bias_corrected: summary.is_bias_corrected(),
            inner: ReentrantMutex::new(RefCell::new(summary)),
        }
    }
}

impl Clone for SynchronizedSummary {
    fn clone(&self) -> Self {
        Self::from(self.to_summary())
    }
}

impl PartialEq for SynchronizedSummary {
    fn eq(&self, other: &Self) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }
        // never hold both locks at once
        let other = other.to_summary();
        self.locked(|summary| *summary == other)
    }
}

impl PartialEq<MultivariateSummary> for SynchronizedSummary {
    fn eq(&self, other: &MultivariateSummary) -> bool {
        self.locked(|summary| *summary == *other)
    }
}

impl Hash for SynchronizedSummary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.locked(|summary| summary.hash(state));
    }
}

impl fmt::Display for SynchronizedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.locked(|summary| fmt::Display::fmt(&*summary, f))
    }
}

impl fmt::Debug for SynchronizedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.locked(|summary| {
            f.debug_struct("SynchronizedSummary")
                .field("inner", &*summary)
                .finish()
        })
    }
}
