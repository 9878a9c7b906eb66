//! Descriptive statistics.
//!
//! Conventions match the usual data-frame `describe` output: the standard
//! deviation is the sample estimate (divisor n − 1) and quantiles use
//! linear interpolation between order statistics.

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (divisor n − 1). `NaN` when fewer than 2 values.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Quantile `q ∈ [0, 1]` of an ascending-sorted slice, linearly interpolated.
///
/// Position `h = (n − 1)·q`; the result interpolates between the order
/// statistics at `floor(h)` and `ceil(h)`. `NaN` for an empty slice.
///
/// # Examples
///
/// ```
/// use eva_core::math::stats::quantile_sorted;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_sorted(&sorted, 0.5), 2.5);
/// assert_eq!(quantile_sorted(&sorted, 0.25), 1.75);
/// ```
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let h = (n - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Returns a sorted copy of `values` (total order, NaN last).
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Summary of a sample: count, mean, spread and quartiles.
///
/// # Examples
///
/// ```
/// use eva_core::math::stats::DescriptiveStats;
///
/// let stats = DescriptiveStats::from_values(&[0.0, 0.0, 10.0, 30.0]).unwrap();
/// assert_eq!(stats.count, 4);
/// assert_eq!(stats.mean, 10.0);
/// assert_eq!(stats.median, 5.0);
/// assert_eq!(stats.max, 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptiveStats {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (`NaN` for a single value).
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// First quartile.
    pub q25: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q75: f64,
    /// Largest value.
    pub max: f64,
}

impl DescriptiveStats {
    /// Computes the summary; `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);
        Some(Self {
            count: values.len(),
            mean: mean(values),
            std: sample_std(values),
            min: sorted[0],
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}
