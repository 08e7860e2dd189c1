//! Storeless univariate statistics
//!
//! Each type here implements [`StorelessStatistic`](crate::traits::StorelessStatistic):
//! it is fed one value at a time and keeps only a constant amount of state.
//! A [`MultivariateSummary`](crate::multivariate::MultivariateSummary) holds one
//! instance per dimension for every moment it tracks.
//!
//! # Example
//!
//! ```
//! use multistats::storeless::{Max, Mean, Min};
//! use multistats::traits::StorelessStatistic;
//!
//! let mut min = Min::new();
//! let mut max = Max::new();
//! let mut mean = Mean::new();
//!
//! for value in [4.0, 1.0, 7.0] {
//!     min.increment(value);
//!     max.increment(value);
//!     mean.increment(value);
//! }
//!
//! assert_eq!(min.result(), 1.0);
//! assert_eq!(max.result(), 7.0);
//! assert!((mean.result() - 4.0).abs() < 1e-12);
//! ```

mod extrema;
mod means;
mod sums;

pub use extrema::{Max, Min};
pub use means::{GeometricMean, Mean};
pub use sums::{Sum, SumOfLogs, SumOfSquares};
