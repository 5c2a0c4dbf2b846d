//! NaN-aware weighted means.
//!
//! `ndarray`'s `mean` neither skips NaNs nor takes weights. The weighted mean
//! here drops every NaN element of `x` together with its weight and returns
//! `Σ w·x / Σ w` over what remains.
//!
//! Weighting along an axis before averaging is not the same as averaging the
//! per-axis means: with NaNs present, the valid elements of a partially
//! missing row get relatively more weight.

use ndarray::{ArrayBase, ArrayView1, ArrayViewD, Axis, Data, Dimension, Zip};
use thiserror::Error;

/// Weights for [`weighted_nanmean`].
#[derive(Debug, Clone)]
pub enum Weights<'a> {
    /// Every element weighs 1.
    Uniform,
    /// One weight per element; must match the data's shape.
    Full(ArrayViewD<'a, f64>),
    /// One weight per index along `axis`, broadcast over the other axes.
    AlongAxis {
        axis: usize,
        weights: ArrayView1<'a, f64>,
    },
}

/// Weights that do not fit the data.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("weights have shape {weights:?} but data has shape {data:?}")]
    ShapeMismatch { weights: Vec<usize>, data: Vec<usize> },

    #[error("axis {axis} out of range for {ndim}-dimensional data")]
    AxisOutOfRange { axis: usize, ndim: usize },

    #[error("{len} weights given for axis {axis} of length {expected}")]
    AxisLengthMismatch {
        axis: usize,
        len: usize,
        expected: usize,
    },
}

/// Weighted mean of `x`, ignoring NaN elements.
///
/// Returns NaN when no element survives (or all surviving weights sum to 0).
pub fn weighted_nanmean(x: ArrayViewD<'_, f64>, weights: Weights<'_>) -> Result<f64, StatsError> {
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    match weights {
        Weights::Uniform => {
            for &value in x.iter().filter(|v| !v.is_nan()) {
                numerator += value;
                denominator += 1.0;
            }
        }
        Weights::Full(w) => {
            if w.shape() != x.shape() {
                return Err(StatsError::ShapeMismatch {
                    weights: w.shape().to_vec(),
                    data: x.shape().to_vec(),
                });
            }
            Zip::from(&x).and(&w).for_each(|&value, &weight| {
                if !value.is_nan() {
                    numerator += weight * value;
                    denominator += weight;
                }
            });
        }
        Weights::AlongAxis { axis, weights: w } => {
            if axis >= x.ndim() {
                return Err(StatsError::AxisOutOfRange {
                    axis,
                    ndim: x.ndim(),
                });
            }
            let expected = x.len_of(Axis(axis));
            if w.len() != expected {
                return Err(StatsError::AxisLengthMismatch {
                    axis,
                    len: w.len(),
                    expected,
                });
            }
            for (lane, &weight) in x.axis_iter(Axis(axis)).zip(w.iter()) {
                for &value in lane.iter().filter(|v| !v.is_nan()) {
                    numerator += weight * value;
                    denominator += weight;
                }
            }
        }
    }

    Ok(numerator / denominator)
}

/// Unweighted mean of all non-NaN elements.
pub fn nanmean<S, D>(x: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (sum, count) = x
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), &v| (sum + v, count + 1));
    sum / count as f64
}
