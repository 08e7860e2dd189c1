//! Multivariate summary statistics for streams of fixed-length vectors
//!
//! [`MultivariateSummary`] keeps per-dimension moments and cross-product sums
//! for every vector fed to it, without storing the vectors. Derived
//! statistics (mean, standard deviation, geometric mean, covariance) are
//! computed on demand.
//!
//! With the `std` feature, [`SynchronizedSummary`] wraps a summary in a mutex
//! so producers and readers on different threads can share it.
//!
//! # Example
//!
//! ```
//! use multistats::multivariate::MultivariateSummary;
//!
//! let mut summary = MultivariateSummary::new(3, true).unwrap();
//!
//! summary.add_value(&[1.0, 10.0, 100.0]).unwrap();
//! summary.add_value(&[2.0, 20.0, 200.0]).unwrap();
//!
//! println!("Mean: {:?}", summary.mean().unwrap());
//! println!("Stddev: {:?}", summary.standard_deviation().unwrap());
//! println!("{}", summary);
//! ```

mod config;
mod covariance;
mod snapshot;
mod summary;
#[cfg(feature = "std")]
mod synchronized;

pub use config::{LogDomain, SummaryConfig};
pub use covariance::{CovarianceMatrix, VectorialCovariance};
pub use snapshot::SummarySnapshot;
pub use summary::{MultivariateSummary, StatisticVector};
#[cfg(feature = "std")]
pub use synchronized::SynchronizedSummary;
