//! Plain-data copy of every statistic in a summary

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Every statistic of a [`MultivariateSummary`](super::MultivariateSummary)
/// at one point in time
///
/// Statistics that are undefined for the snapshot's `n` are `None`.
///
/// With the `serde` feature, non-finite values (a NaN log sum under
/// [`LogDomain::Propagate`](super::LogDomain::Propagate), an infinite input)
/// are written as the strings `"NaN"`, `"inf"` and `"-inf"`, so formats
/// without those numbers still read the snapshot back unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct SummarySnapshot {
    pub dimension: usize,
    pub n: u64,
    pub bias_corrected: bool,
    pub sum: Vec<f64>,
    pub sum_sq: Vec<f64>,
    pub sum_log: Vec<f64>,
    pub min: Option<Vec<f64>>,
    pub max: Option<Vec<f64>>,
    pub mean: Option<Vec<f64>>,
    pub geometric_mean: Option<Vec<f64>>,
    pub standard_deviation: Option<Vec<f64>>,
    /// Row-major rows of the covariance matrix
    pub covariance: Option<Vec<Vec<f64>>>,
}

/// One statistic on the wire
#[cfg(feature = "serde")]
#[derive(Clone, Copy)]
struct Float(f64);

#[cfg(feature = "serde")]
impl serde::Serialize for Float {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let value = self.0;
        if value.is_finite() {
            serializer.serialize_f64(value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Float {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct FloatVisitor;

        impl<'de> serde::de::Visitor<'de> for FloatVisitor {
            type Value = Float;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a number, \"NaN\", \"inf\" or \"-inf\"")
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Float, E> {
                Ok(Float(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Float, E> {
                Ok(Float(v as f64))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Float, E> {
                Ok(Float(v as f64))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Float, E> {
                match v {
                    "NaN" => Ok(Float(f64::NAN)),
                    "inf" => Ok(Float(f64::INFINITY)),
                    "-inf" => Ok(Float(f64::NEG_INFINITY)),
                    other => Err(E::invalid_value(serde::de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(FloatVisitor)
    }
}

#[cfg(feature = "serde")]
fn to_wire(values: &[f64]) -> Vec<Float> {
    values.iter().copied().map(Float).collect()
}

#[cfg(feature = "serde")]
fn from_wire(values: Vec<Float>) -> Vec<f64> {
    values.into_iter().map(|v| v.0).collect()
}

#[cfg(feature = "serde")]
impl serde::Serialize for SummarySnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let optional = |values: &Option<Vec<f64>>| values.as_deref().map(to_wire);
        let covariance = self
            .covariance
            .as_ref()
            .map(|rows| rows.iter().map(|row| to_wire(row)).collect::<Vec<_>>());

        let mut state = serializer.serialize_struct("SummarySnapshot", 12)?;
        state.serialize_field("dimension", &self.dimension)?;
        state.serialize_field("n", &self.n)?;
        state.serialize_field("bias_corrected", &self.bias_corrected)?;
        state.serialize_field("sum", &to_wire(&self.sum))?;
        state.serialize_field("sum_sq", &to_wire(&self.sum_sq))?;
        state.serialize_field("sum_log", &to_wire(&self.sum_log))?;
        state.serialize_field("min", &optional(&self.min))?;
        state.serialize_field("max", &optional(&self.max))?;
        state.serialize_field("mean", &optional(&self.mean))?;
        state.serialize_field("geometric_mean", &optional(&self.geometric_mean))?;
        state.serialize_field("standard_deviation", &optional(&self.standard_deviation))?;
        state.serialize_field("covariance", &covariance)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SummarySnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct SnapshotData {
            dimension: usize,
            n: u64,
            bias_corrected: bool,
            sum: Vec<Float>,
            sum_sq: Vec<Float>,
            sum_log: Vec<Float>,
            min: Option<Vec<Float>>,
            max: Option<Vec<Float>>,
            mean: Option<Vec<Float>>,
            geometric_mean: Option<Vec<Float>>,
            standard_deviation: Option<Vec<Float>>,
            covariance: Option<Vec<Vec<Float>>>,
        }

        let data = <SnapshotData as serde::Deserialize>::deserialize(deserializer)?;
        Ok(SummarySnapshot {
            dimension: data.dimension,
            n: data.n,
            bias_corrected: data.bias_corrected,
            sum: from_wire(data.sum),
            sum_sq: from_wire(data.sum_sq),
            sum_log: from_wire(data.sum_log),
            min: data.min.map(from_wire),
            max: data.max.map(from_wire),
            mean: data.mean.map(from_wire),
            geometric_mean: data.geometric_mean.map(from_wire),
            standard_deviation: data.standard_deviation.map(from_wire),
            covariance: data
                .covariance
                .map(|rows| rows.into_iter().map(from_wire).collect()),
        })
    }
}
