//! Storeless summary statistics over a stream of `k`-vectors
//!
//! Each moment (sum, sum of squares, sum of logs, min, max, mean, geometric
//! mean) is tracked by one [`StorelessStatistic`] per dimension. Cross-product
//! sums for the covariance matrix are kept alongside in a
//! [`VectorialCovariance`]. Nothing is retained from the input beyond that
//! running state.

use core::fmt;
use core::hash::{Hash, Hasher};

use super::config::{LogDomain, SummaryConfig};
use super::covariance::{variance_denominator, CovarianceMatrix, VectorialCovariance};
use super::snapshot::SummarySnapshot;
use crate::math;
use crate::storeless::{GeometricMean, Max, Mean, Min, Sum, SumOfLogs, SumOfSquares};
use crate::traits::{StatsError, StorelessStatistic};
use xxhash_rust::xxh3::xxh3_64;

#[cfg(feature = "std")]
use std::{boxed::Box, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec, vec::Vec};

/// One statistic per dimension for a single moment
pub type StatisticVector = Vec<Box<dyn StorelessStatistic>>;

fn statistic_vector<S>(dimension: usize) -> StatisticVector
where
    S: StorelessStatistic + Default + 'static,
{
    (0..dimension)
        .map(|_| Box::new(S::default()) as Box<dyn StorelessStatistic>)
        .collect()
}

fn results(statistics: &[Box<dyn StorelessStatistic>]) -> Vec<f64> {
    statistics.iter().map(|s| s.result()).collect()
}

/// Equality used for snapshot comparison: NaN matches NaN, -0.0 matches 0.0
fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Bit pattern consistent with [`same_value`]
fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

/// Running summary statistics for `k`-dimensional vectors
///
/// Not thread-safe on its own; wrap it in a
/// [`SynchronizedSummary`](super::SynchronizedSummary) to share it between
/// threads.
///
/// # Example
///
/// ```
/// use multistats::multivariate::MultivariateSummary;
///
/// let mut summary = MultivariateSummary::new(2, true).unwrap();
///
/// for row in [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]] {
///     summary.add_value(&row).unwrap();
/// }
///
/// assert_eq!(summary.n(), 3);
/// assert_eq!(summary.mean().unwrap(), vec![3.0, 4.0]);
///
/// let covariance = summary.covariance().unwrap();
/// assert!((covariance.get(0, 1) - 4.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct MultivariateSummary {
    dimension: usize,
    bias_corrected: bool,
    log_domain: LogDomain,
    /// Number of vectors accepted
    n: u64,
    sum_impl: StatisticVector,
    sum_sq_impl: StatisticVector,
    sum_log_impl: StatisticVector,
    min_impl: StatisticVector,
    max_impl: StatisticVector,
    geo_mean_impl: StatisticVector,
    mean_impl: StatisticVector,
    covariance: VectorialCovariance,
}

impl MultivariateSummary {
    /// Create a summary for `dimension`-vectors
    ///
    /// `bias_corrected` selects the `n - 1` denominator for variance and
    /// covariance. Fails with [`StatsError::InvalidConfig`] if `dimension`
    /// is zero.
    pub fn new(dimension: usize, bias_corrected: bool) -> Result<Self, StatsError> {
        Self::with_config(SummaryConfig::new(dimension).bias_corrected(bias_corrected))
    }

    /// Create a summary from a full config
    pub fn with_config(config: SummaryConfig) -> Result<Self, StatsError> {
        config.validate()?;
        let k = config.dimension;
        Ok(Self {
            dimension: k,
            bias_corrected: config.bias_corrected,
            log_domain: config.log_domain,
            n: 0,
            sum_impl: statistic_vector::<Sum>(k),
            sum_sq_impl: statistic_vector::<SumOfSquares>(k),
            sum_log_impl: statistic_vector::<SumOfLogs>(k),
            min_impl: statistic_vector::<Min>(k),
            max_impl: statistic_vector::<Max>(k),
            geo_mean_impl: statistic_vector::<GeometricMean>(k),
            mean_impl: statistic_vector::<Mean>(k),
            covariance: VectorialCovariance::new(k),
        })
    }

    /// Length of every accepted vector
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether variance and covariance divide by `n - 1`
    pub fn is_bias_corrected(&self) -> bool {
        self.bias_corrected
    }

    /// Policy for non-positive components
    pub fn log_domain(&self) -> LogDomain {
        self.log_domain
    }

    /// Number of vectors accepted
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Check if no vector has been accepted
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn check_dimension(&self, found: usize) -> Result<(), StatsError> {
        if found != self.dimension {
            return Err(StatsError::DimensionMismatch {
                expected: self.dimension,
                found,
            });
        }
        Ok(())
    }

    fn require_values(&self, operation: &'static str) -> Result<(), StatsError> {
        if self.n == 0 {
            return Err(StatsError::InvalidState { operation, n: 0 });
        }
        Ok(())
    }

    /// Add one vector
    ///
    /// The vector is validated before anything changes: on error neither `n`
    /// nor any moment has been touched.
    pub fn add_value(&mut self, value: &[f64]) -> Result<(), StatsError> {
        self.check_dimension(value.len())?;
        if self.log_domain == LogDomain::Reject {
            if let Some((dimension, &v)) = value.iter().enumerate().find(|(_, v)| !(**v > 0.0)) {
                return Err(StatsError::DomainError {
                    dimension,
                    value: v,
                });
            }
        }

        for (i, &v) in value.iter().enumerate() {
            self.sum_impl[i].increment(v);
            self.sum_sq_impl[i].increment(v);
            self.sum_log_impl[i].increment(v);
            self.min_impl[i].increment(v);
            self.max_impl[i].increment(v);
            self.geo_mean_impl[i].increment(v);
            self.mean_impl[i].increment(v);
        }
        self.covariance.increment(value)?;
        self.n += 1;
        Ok(())
    }

    /// Per-dimension sums (zeros when empty)
    pub fn sum(&self) -> Vec<f64> {
        results(&self.sum_impl)
    }

    /// Per-dimension sums of squares (zeros when empty)
    pub fn sum_sq(&self) -> Vec<f64> {
        results(&self.sum_sq_impl)
    }

    /// Per-dimension sums of natural logs (zeros when empty)
    pub fn sum_log(&self) -> Vec<f64> {
        results(&self.sum_log_impl)
    }

    /// Per-dimension minimums
    pub fn min(&self) -> Result<Vec<f64>, StatsError> {
        self.require_values("min")?;
        Ok(results(&self.min_impl))
    }

    /// Per-dimension maximums
    pub fn max(&self) -> Result<Vec<f64>, StatsError> {
        self.require_values("max")?;
        Ok(results(&self.max_impl))
    }

    /// Per-dimension means
    pub fn mean(&self) -> Result<Vec<f64>, StatsError> {
        self.require_values("mean")?;
        Ok(results(&self.mean_impl))
    }

    /// Per-dimension geometric means, `exp(sum_log / n)`
    ///
    /// NaN for any dimension that received a non-positive value under
    /// [`LogDomain::Propagate`].
    pub fn geometric_mean(&self) -> Result<Vec<f64>, StatsError> {
        self.require_values("geometric mean")?;
        Ok(results(&self.geo_mean_impl))
    }

    /// Per-dimension standard deviations
    ///
    /// `sqrt((sum_sq - sum^2 / n) / (n - b))`, `b` being 1 when bias
    /// corrected. Undefined (an error) for `n = 0`, and for `n = 1` when bias
    /// corrected; a biased summary with one vector yields zeros.
    pub fn standard_deviation(&self) -> Result<Vec<f64>, StatsError> {
        let denominator =
            variance_denominator("standard deviation", self.n, self.bias_corrected)?;
        let n = self.n as f64;

        Ok(self
            .sum_impl
            .iter()
            .zip(&self.sum_sq_impl)
            .map(|(sum, sum_sq)| {
                let s = sum.result();
                let variance = (sum_sq.result() - s * s / n) / denominator;
                // rounding can leave a tiny negative residue for constant input
                math::sqrt(if variance < 0.0 { 0.0 } else { variance })
            })
            .collect())
    }

    /// Covariance matrix, same definedness rules as
    /// [`standard_deviation`](Self::standard_deviation)
    pub fn covariance(&self) -> Result<CovarianceMatrix, StatsError> {
        self.covariance.covariance(self.bias_corrected)
    }

    /// Reset every moment and `n`; dimension and flags are kept
    pub fn clear(&mut self) {
        self.n = 0;
        for statistics in [
            &mut self.sum_impl,
            &mut self.sum_sq_impl,
            &mut self.sum_log_impl,
            &mut self.min_impl,
            &mut self.max_impl,
            &mut self.geo_mean_impl,
            &mut self.mean_impl,
        ] {
            statistics.iter_mut().for_each(|s| s.clear());
        }
        self.covariance.clear();
    }

    /// Every statistic at once
    pub fn snapshot(&self) -> SummarySnapshot {
        SummarySnapshot {
            dimension: self.dimension,
            n: self.n,
            bias_corrected: self.bias_corrected,
            sum: self.sum(),
            sum_sq: self.sum_sq(),
            sum_log: self.sum_log(),
            min: self.min().ok(),
            max: self.max().ok(),
            mean: self.mean().ok(),
            geometric_mean: self.geometric_mean().ok(),
            standard_deviation: self.standard_deviation().ok(),
            covariance: self.covariance().ok().map(|m| m.to_rows()),
        }
    }

    /// Raw values compared by equality and hashing, in a fixed order
    fn moment_values(&self) -> impl Iterator<Item = f64> + '_ {
        [
            &self.sum_impl,
            &self.sum_sq_impl,
            &self.sum_log_impl,
            &self.min_impl,
            &self.max_impl,
            &self.geo_mean_impl,
            &self.mean_impl,
        ]
        .into_iter()
        .flat_map(|statistics| statistics.iter().map(|s| s.result()))
        .chain(self.covariance.product_sums().iter().copied())
    }

    /// Stable 64-bit hash of the state compared by `==`
    ///
    /// Unlike [`Hash`], the value does not depend on the hasher, so it can be
    /// stored and compared across runs.
    pub fn hash_code(&self) -> u64 {
        xxh3_64(&self.state_bytes())
    }

    /// Header (dimension, bias flag, n), then 7k moment results and the
    /// k(k+1)/2 cross-product sums
    fn state_len(dimension: usize) -> usize {
        17 + 8 * (7 * dimension + dimension * (dimension + 1) / 2)
    }

    fn state_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::state_len(self.dimension));
        bytes.extend_from_slice(&(self.dimension as u64).to_le_bytes());
        bytes.push(self.bias_corrected as u8);
        bytes.extend_from_slice(&self.n.to_le_bytes());
        for value in self.moment_values() {
            bytes.extend_from_slice(&canonical_bits(value).to_le_bytes());
        }
        bytes
    }

    fn check_replaceable(
        &self,
        operation: &'static str,
        statistics: &[Box<dyn StorelessStatistic>],
    ) -> Result<(), StatsError> {
        if self.n > 0 {
            return Err(StatsError::InvalidState { operation, n: self.n });
        }
        self.check_dimension(statistics.len())?;
        if let Some(used) = statistics.iter().find(|s| s.n() > 0) {
            return Err(StatsError::InvalidState {
                operation,
                n: used.n(),
            });
        }
        Ok(())
    }

    /// Copies of the per-dimension sum statistics
    pub fn sum_impl(&self) -> StatisticVector {
        self.sum_impl.clone()
    }

    /// Replace the per-dimension sum statistics
    ///
    /// Only allowed before the first vector is added, with `dimension` fresh
    /// statistics. The same rules apply to every `set_*_impl` method.
    pub fn set_sum_impl(&mut self, sum_impl: StatisticVector) -> Result<(), StatsError> {
        self.check_replaceable("set_sum_impl", &sum_impl)?;
        self.sum_impl = sum_impl;
        Ok(())
    }

    /// Copies of the per-dimension sum-of-squares statistics
    pub fn sum_sq_impl(&self) -> StatisticVector {
        self.sum_sq_impl.clone()
    }

    /// Replace the per-dimension sum-of-squares statistics
    pub fn set_sum_sq_impl(&mut self, sum_sq_impl: StatisticVector) -> Result<(), StatsError> {
        self.check_replaceable("set_sum_sq_impl", &sum_sq_impl)?;
        self.sum_sq_impl = sum_sq_impl;
        Ok(())
    }

    /// Copies of the per-dimension sum-of-logs statistics
    pub fn sum_log_impl(&self) -> StatisticVector {
        self.sum_log_impl.clone()
    }

    /// Replace the per-dimension sum-of-logs statistics
    pub fn set_sum_log_impl(&mut self, sum_log_impl: StatisticVector) -> Result<(), StatsError> {
        self.check_replaceable("set_sum_log_impl", &sum_log_impl)?;
        self.sum_log_impl = sum_log_impl;
        Ok(())
    }

    /// Copies of the per-dimension minimum statistics
    pub fn min_impl(&self) -> StatisticVector {
        self.min_impl.clone()
    }

    /// Replace the per-dimension minimum statistics
    pub fn set_min_impl(&mut self, min_impl: StatisticVector) -> Result<(), StatsError> {
        self.check_replaceable("set_min_impl", &min_impl)?;
        self.min_impl = min_impl;
        Ok(())
    }

    /// Copies of the per-dimension maximum statistics
    pub fn max_impl(&self) -> StatisticVector {
        self.max_impl.clone()
    }

    /// Replace the per-dimension maximum statistics
    pub fn set_max_impl(&mut self, max_impl: StatisticVector) -> Result<(), StatsError> {
        self.check_replaceable("set_max_impl", &max_impl)?;
        self.max_impl = max_impl;
        Ok(())
    }

    /// Copies of the per-dimension geometric mean statistics
    pub fn geo_mean_impl(&self) -> StatisticVector {
        self.geo_mean_impl.clone()
    }

    /// Replace the per-dimension geometric mean statistics
    pub fn set_geo_mean_impl(&mut self, geo_mean_impl: StatisticVector) -> Result<(), StatsError> {
        self.check_replaceable("set_geo_mean_impl", &geo_mean_impl)?;
        self.geo_mean_impl = geo_mean_impl;
        Ok(())
    }

    /// Copies of the per-dimension mean statistics
    pub fn mean_impl(&self) -> StatisticVector {
        self.mean_impl.clone()
    }

    /// Replace the per-dimension mean statistics
    pub fn set_mean_impl(&mut self, mean_impl: StatisticVector) -> Result<(), StatsError> {
        self.check_replaceable("set_mean_impl", &mean_impl)?;
        self.mean_impl = mean_impl;
        Ok(())
    }
}

impl PartialEq for MultivariateSummary {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && self.bias_corrected == other.bias_corrected
            && self.n == other.n
            && self
                .moment_values()
                .zip(other.moment_values())
                .all(|(a, b)| same_value(a, b))
    }
}

impl Hash for MultivariateSummary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        self.bias_corrected.hash(state);
        self.n.hash(state);
        for value in self.moment_values() {
            canonical_bits(value).hash(state);
        }
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, values: &[f64]) -> fmt::Result {
    write!(f, "{}: ", label)?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    writeln!(f)
}

impl fmt::Display for MultivariateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let undefined = || vec![f64::NAN; self.dimension];

        writeln!(f, "MultivariateSummary:")?;
        writeln!(f, "n: {}", self.n)?;
        write_row(f, "min", &results(&self.min_impl))?;
        write_row(f, "max", &results(&self.max_impl))?;
        write_row(f, "mean", &results(&self.mean_impl))?;
        write_row(f, "geometric mean", &results(&self.geo_mean_impl))?;
        write_row(f, "sum of squares", &self.sum_sq())?;
        write_row(f, "sum of logarithms", &self.sum_log())?;
        write_row(
            f,
            "standard deviation",
            &self.standard_deviation().unwrap_or_else(|_| undefined()),
        )?;

        write!(f, "covariance: ")?;
        match self.covariance() {
            Ok(matrix) => {
                write!(f, "[")?;
                for (i, row) in matrix.rows().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[")?;
                    for (j, value) in row.iter().enumerate() {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", value)?;
                    }
                    write!(f, "]")?;
                }
                writeln!(f, "]")
            }
            Err(_) => writeln!(f, "NaN"),
        }
    }
}
