//! # Multistats
//!
//! Storeless multivariate summary statistics for Rust.
//!
//! Multistats ingests a stream of fixed-length `f64` vectors and keeps running
//! per-dimension moments plus the cross-product sums needed for a covariance
//! matrix. The input itself is never stored.
//!
//! ## Features
//!
//! - **Pluggable moments**: every moment of every dimension is a
//!   [`StorelessStatistic`](traits::StorelessStatistic) trait object that can
//!   be replaced before ingestion starts
//! - **Derived statistics**: mean, standard deviation, geometric mean and
//!   covariance, biased or bias corrected
//! - **Thread safety**: [`SynchronizedSummary`] serializes every operation on
//!   an instance, so compound reads always see a consistent state
//!
//! ## Quick Start
//!
//! ```rust
//! use multistats::prelude::*;
//!
//! let mut summary = MultivariateSummary::new(2, true).unwrap();
//! for row in [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]] {
//!     summary.add_value(&row).unwrap();
//! }
//!
//! assert_eq!(summary.n(), 3);
//! let covariance = summary.covariance().unwrap();
//! assert!((covariance.get(0, 1) - 4.0).abs() < 1e-12);
//! ```
//!
//! ## Sharing Between Threads
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use multistats::SynchronizedSummary;
//!
//! let summary = Arc::new(SynchronizedSummary::new(2, false).unwrap());
//!
//! let producer = {
//!     let summary = Arc::clone(&summary);
//!     thread::spawn(move || {
//!         for i in 1..=100 {
//!             summary.add_value(&[i as f64, 1.0]).unwrap();
//!         }
//!     })
//! };
//! producer.join().unwrap();
//!
//! assert_eq!(summary.n(), 100);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support, required for
//!   [`SynchronizedSummary`]
//! - `serde`: Enable serialization of snapshots and covariance matrices

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub(crate) mod math;

pub mod multivariate;
pub mod storeless;
pub mod traits;

pub mod prelude {
    pub use crate::multivariate::{
        CovarianceMatrix, LogDomain, MultivariateSummary, SummaryConfig, SummarySnapshot,
    };
    pub use crate::storeless::*;
    pub use crate::traits::*;

    #[cfg(feature = "std")]
    pub use crate::multivariate::SynchronizedSummary;
}

pub use multivariate::{MultivariateSummary, SummaryConfig};
pub use traits::{StatsError, StorelessStatistic};

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use multivariate::SynchronizedSummary;
