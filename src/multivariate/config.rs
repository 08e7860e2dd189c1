//! Construction parameters for a multivariate summary

use crate::traits::StatsError;

/// How vectors with non-positive components are handled
///
/// The sum-of-logs and geometric-mean moments are only defined for strictly
/// positive values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LogDomain {
    /// Refuse the whole vector with [`StatsError::DomainError`] before any
    /// state changes
    #[default]
    Reject,
    /// Accept the vector; the affected dimensions' log moments become NaN or
    /// `-inf`
    Propagate,
}

/// Parameters fixed for the lifetime of a summary
///
/// # Example
///
/// ```
/// use multistats::multivariate::{LogDomain, MultivariateSummary, SummaryConfig};
///
/// let config = SummaryConfig::new(3)
///     .bias_corrected(false)
///     .log_domain(LogDomain::Propagate);
///
/// let mut summary = MultivariateSummary::with_config(config).unwrap();
/// summary.add_value(&[-1.0, 0.0, 2.0]).unwrap();
/// assert_eq!(summary.n(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SummaryConfig {
    /// Length of every ingested vector
    pub dimension: usize,
    /// Divide by `n - 1` (true) or `n` (false) for variance and covariance
    pub bias_corrected: bool,
    /// Policy for non-positive components
    pub log_domain: LogDomain,
}

impl SummaryConfig {
    /// Config for `dimension`-vectors, bias corrected, rejecting
    /// non-positive components
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            bias_corrected: true,
            log_domain: LogDomain::Reject,
        }
    }

    /// Set the bias correction flag
    pub fn bias_corrected(mut self, bias_corrected: bool) -> Self {
        self.bias_corrected = bias_corrected;
        self
    }

    /// Set the non-positive value policy
    pub fn log_domain(mut self, log_domain: LogDomain) -> Self {
        self.log_domain = log_domain;
        self
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.dimension == 0 {
            return Err(StatsError::InvalidConfig {
                reason: "dimension must be positive",
            });
        }
        Ok(())
    }
}
