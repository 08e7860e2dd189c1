//! Running cross-product sums and the covariance matrix derived from them

use crate::traits::StatsError;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Symmetric `k x k` covariance matrix, stored row-major
#[derive(Clone, Debug, PartialEq)]
pub struct CovarianceMatrix {
    dimension: usize,
    data: Vec<f64>,
}

impl CovarianceMatrix {
    fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            data: vec![0.0; dimension * dimension],
        }
    }

    fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.dimension + j] = value;
        self.data[j * self.dimension + i] = value;
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Entry at row `i`, column `j`
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not below [`dimension`](Self::dimension).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.dimension && j < self.dimension,
            "index ({}, {}) out of bounds for dimension {}",
            i,
            j,
            self.dimension
        );
        self.data[i * self.dimension + j]
    }

    /// Row `i` as a slice
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Iterate over the rows
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.dimension)
    }

    /// The diagonal, i.e. the per-dimension variances
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.dimension).map(|i| self.get(i, i)).collect()
    }

    /// Row-major entries
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copy into nested row vectors
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl core::ops::Index<(usize, usize)> for CovarianceMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.dimension + j]
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CovarianceMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("CovarianceMatrix", 2)?;
        state.serialize_field("dimension", &self.dimension)?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

/// Running sums and cross-product sums for a stream of `k`-vectors
///
/// Keeps `k` sums plus the packed lower triangle of `sum(x_i * x_j)`
/// (diagonal included, `k(k+1)/2` entries), which is everything needed to
/// produce the covariance matrix for the current `n`.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorialCovariance {
    dimension: usize,
    sums: Vec<f64>,
    product_sums: Vec<f64>,
    count: u64,
}

impl VectorialCovariance {
    /// Create an empty accumulator for `dimension`-vectors
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            sums: vec![0.0; dimension],
            product_sums: vec![0.0; dimension * (dimension + 1) / 2],
            count: 0,
        }
    }

    /// Vector length this accumulator expects
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vectors seen
    pub fn n(&self) -> u64 {
        self.count
    }

    /// Per-dimension sums
    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    /// Packed lower-triangular cross-product sums, row by row
    pub fn product_sums(&self) -> &[f64] {
        &self.product_sums
    }

    /// Feed one vector
    pub fn increment(&mut self, value: &[f64]) -> Result<(), StatsError> {
        if value.len() != self.dimension {
            return Err(StatsError::DimensionMismatch {
                expected: self.dimension,
                found: value.len(),
            });
        }

        let mut k = 0;
        for i in 0..self.dimension {
            self.sums[i] += value[i];
            for j in 0..=i {
                self.product_sums[k] += value[i] * value[j];
                k += 1;
            }
        }
        self.count += 1;
        Ok(())
    }

    /// Covariance matrix for the vectors seen so far
    ///
    /// `cov[i][j] = (sum(x_i x_j) - sum(x_i) sum(x_j) / n) / (n - b)` where
    /// `b` is 1 when bias corrected and 0 otherwise. Fails with
    /// [`StatsError::InvalidState`] when `n` is 0, or 1 with bias correction.
    pub fn covariance(&self, bias_corrected: bool) -> Result<CovarianceMatrix, StatsError> {
        let denominator = variance_denominator("covariance", self.count, bias_corrected)?;
        let n = self.count as f64;

        let mut matrix = CovarianceMatrix::zeros(self.dimension);
        let mut k = 0;
        for i in 0..self.dimension {
            for j in 0..=i {
                let centered = self.product_sums[k] - self.sums[i] * self.sums[j] / n;
                matrix.set_symmetric(i, j, centered / denominator);
                k += 1;
            }
        }
        Ok(matrix)
    }

    /// Reset every sum to zero
    pub fn clear(&mut self) {
        self.sums.iter_mut().for_each(|s| *s = 0.0);
        self.product_sums.iter_mut().for_each(|s| *s = 0.0);
        self.count = 0;
    }
}

/// Denominator shared by variance and covariance: `n - 1` when bias
/// corrected, `n` otherwise
pub(crate) fn variance_denominator(
    operation: &'static str,
    n: u64,
    bias_corrected: bool,
) -> Result<f64, StatsError> {
    match (n, bias_corrected) {
        (0, _) | (1, true) => Err(StatsError::InvalidState { operation, n }),
        (n, true) => Ok((n - 1) as f64),
        (n, false) => Ok(n as f64),
    }
}
