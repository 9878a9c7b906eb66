//! Peaks-over-threshold (POT) extraction with declustering.
//!
//! Exceedances are points strictly above the threshold. They are walked in
//! date order and grouped into clusters: an exceedance joins the current
//! cluster unless it lies more than the declustering window after the
//! cluster's current peak, in which case it opens a new cluster. Within a
//! cluster a later point replaces the peak only if it is strictly larger,
//! so ties keep the earlier date. The cluster peaks are the extremes.
//!
//! With daily data and a 24 hour window, exceedances on consecutive days
//! merge and exceedances two or more days apart stay separate.

use chrono::Duration;
use eva_core::types::{DailySeries, Date};

/// One declustered extreme event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extreme {
    /// Date of the cluster peak
    pub date: Date,
    /// Peak value
    pub value: f64,
}

/// Declustered extremes together with the context they were drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremesSet {
    extremes: Vec<Extreme>,
    threshold: f64,
    window: Duration,
    series_start: Date,
    series_end: Date,
}

impl ExtremesSet {
    /// Extremes in chronological order.
    pub fn extremes(&self) -> &[Extreme] {
        &self.extremes
    }

    /// Peak values in chronological order.
    pub fn values(&self) -> Vec<f64> {
        self.extremes.iter().map(|e| e.value).collect()
    }

    /// Number of extremes.
    pub fn len(&self) -> usize {
        self.extremes.len()
    }

    /// True when nothing exceeded the threshold.
    pub fn is_empty(&self) -> bool {
        self.extremes.is_empty()
    }

    /// The POT threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The declustering window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// First day of the source series.
    pub fn series_start(&self) -> Date {
        self.series_start
    }

    /// Last day of the source series.
    pub fn series_end(&self) -> Date {
        self.series_end
    }

    /// Days covered by the source series, `last − first`.
    pub fn span_days(&self) -> i64 {
        self.series_end - self.series_start
    }
}

/// Longest accepted declustering window, in hours (about 114 years).
pub const MAX_WINDOW_HOURS: f64 = 1.0e6;

/// Converts a window in (possibly fractional) hours to a chrono duration.
///
/// Rounded to the nearest second. Windows beyond chrono's range saturate
/// at [`Duration::MAX`]; configuration validation caps them at
/// [`MAX_WINDOW_HOURS`].
pub fn window_from_hours(hours: f64) -> Duration {
    Duration::try_seconds((hours * 3600.0).round() as i64).unwrap_or(Duration::MAX)
}

/// Extracts declustered exceedances of `threshold` from `series`.
///
/// # Examples
///
/// ```
/// use eva_core::types::{DailySeries, Date};
/// use eva_risk::extremes::{extract_peaks_over_threshold, window_from_hours};
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// // Days 1-2 form one cluster (peak 250), day 5 is separate
/// let series = DailySeries::from_values(start, vec![0.0, 200.0, 250.0, 0.0, 0.0, 170.0]).unwrap();
///
/// let set = extract_peaks_over_threshold(&series, 160.0, window_from_hours(24.0));
/// assert_eq!(set.values(), vec![250.0, 170.0]);
/// assert_eq!(set.extremes()[0].date, start.add_days(2));
/// ```
pub fn extract_peaks_over_threshold(
    series: &DailySeries,
    threshold: f64,
    window: Duration,
) -> ExtremesSet {
    let mut extremes: Vec<Extreme> = Vec::new();

    for (date, value) in series.iter().filter(|&(_, v)| v > threshold) {
        match extremes.last_mut() {
            Some(peak) if date.elapsed_since(peak.date) <= window => {
                if value > peak.value {
                    *peak = Extreme { date, value };
                }
            }
            _ => extremes.push(Extreme { date, value }),
        }
    }

    ExtremesSet {
        extremes,
        threshold,
        window,
        series_start: series.start(),
        series_end: series.end(),
    }
}
