//! Daily observation series.
//!
//! This module provides:
//! - `Observation`: a single (date, value) record as read from input
//! - `DuplicatePolicy`: how repeated dates are handled
//! - `DailySeries`: a dense series with exactly one value per calendar day
//!
//! `DailySeries` stores a start date and a contiguous `Vec<f64>`, so the
//! "one entry per day, no gaps" invariant holds by construction.

use std::collections::BTreeMap;

use super::error::SeriesError;
use super::time::Date;

/// A single dated observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Calendar date of the observation.
    pub date: Date,
    /// Observed count.
    pub value: f64,
}

impl Observation {
    /// Creates a new observation.
    #[inline]
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

/// Handling of observations that share a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DuplicatePolicy {
    /// Fail with [`SeriesError::DuplicateDate`].
    #[default]
    Reject,
    /// Add same-day values together.
    Sum,
}

/// Dense daily series spanning `[start, end]` with no missing days.
///
/// # Examples
///
/// ```
/// use eva_core::types::{Date, DailySeries};
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let series = DailySeries::from_values(start, vec![1.0, 0.0, 3.0]).unwrap();
///
/// assert_eq!(series.end(), Date::from_ymd(2024, 1, 3).unwrap());
/// assert_eq!(series.get(start.add_days(2)), Some(3.0));
/// assert_eq!(series.total(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: Date,
    values: Vec<f64>,
}

impl DailySeries {
    /// Builds a gap-free series from observations in arbitrary order.
    ///
    /// Every observed value is kept on its date; days between the first
    /// and last observed date that have no observation are set to 0.
    ///
    /// # Errors
    ///
    /// - [`SeriesError::Empty`] if `observations` is empty
    /// - [`SeriesError::InvalidValue`] for negative or non-finite values
    /// - [`SeriesError::DuplicateDate`] for a repeated date under
    ///   [`DuplicatePolicy::Reject`]
    pub fn from_observations(
        observations: &[Observation],
        duplicates: DuplicatePolicy,
    ) -> Result<Self, SeriesError> {
        let mut by_date: BTreeMap<Date, f64> = BTreeMap::new();

        for obs in observations {
            validate_value(obs.date, obs.value)?;
            match by_date.get_mut(&obs.date) {
                Some(existing) => match duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(SeriesError::DuplicateDate { date: obs.date })
                    }
                    DuplicatePolicy::Sum => *existing += obs.value,
                },
                None => {
                    by_date.insert(obs.date, obs.value);
                }
            }
        }

        let (&start, _) = by_date.iter().next().ok_or(SeriesError::Empty)?;
        let (&end, _) = by_date.iter().next_back().ok_or(SeriesError::Empty)?;

        let mut values = vec![0.0; (end - start) as usize + 1];
        for (date, value) in by_date {
            values[(date - start) as usize] = value;
        }

        Ok(Self { start, values })
    }

    /// Wraps already-dense values starting at `start`.
    ///
    /// # Errors
    ///
    /// [`SeriesError::Empty`] for an empty vector and
    /// [`SeriesError::InvalidValue`] for negative or non-finite values.
    pub fn from_values(start: Date, values: Vec<f64>) -> Result<Self, SeriesError> {
        if values.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (offset, &value) in values.iter().enumerate() {
            validate_value(start.add_days(offset as i64), value)?;
        }
        Ok(Self { start, values })
    }

    /// First calendar day of the series.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Last calendar day of the series.
    #[inline]
    pub fn end(&self) -> Date {
        self.start.add_days(self.values.len() as i64 - 1)
    }

    /// Number of days (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a series holds at least one day.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Daily values in chronological order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value on `date`, or `None` outside `[start, end]`.
    pub fn get(&self, date: Date) -> Option<f64> {
        let offset = date - self.start;
        if offset < 0 {
            return None;
        }
        self.values.get(offset as usize).copied()
    }

    /// Iterates `(date, value)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        let start = self.start;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (start.add_days(i as i64), v))
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Largest value.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Days between the first and last date (0 for a single-day series).
    #[inline]
    pub fn span_days(&self) -> i64 {
        self.values.len() as i64 - 1
    }
}

fn validate_value(date: Date, value: f64) -> Result<(), SeriesError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SeriesError::InvalidValue { date, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_gap_fill_inserts_zeros() {
        let obs = vec![
            Observation::new(d(2024, 1, 5), 7.0),
            Observation::new(d(2024, 1, 1), 2.0),
        ];
        let series = DailySeries::from_observations(&obs, DuplicatePolicy::Reject).unwrap();

        assert_eq!(series.start(), d(2024, 1, 1));
        assert_eq!(series.end(), d(2024, 1, 5));
        assert_eq!(series.values(), &[2.0, 0.0, 0.0, 0.0, 7.0]);
        assert_eq!(series.span_days(), 4);
    }

    #[test]
    fn test_single_observation() {
        let obs = vec![Observation::new(d(2024, 2, 29), 3.0)];
        let series = DailySeries::from_observations(&obs, DuplicatePolicy::Reject).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.start(), series.end());
        assert_eq!(series.span_days(), 0);
    }

    #[test]
    fn test_empty_is_error() {
        let result = DailySeries::from_observations(&[], DuplicatePolicy::Reject);
        assert_eq!(result, Err(SeriesError::Empty));
    }

    #[test]
    fn test_duplicate_rejected() {
        let obs = vec![
            Observation::new(d(2024, 1, 1), 1.0),
            Observation::new(d(2024, 1, 1), 4.0),
        ];
        let result = DailySeries::from_observations(&obs, DuplicatePolicy::Reject);
        assert_eq!(
            result,
            Err(SeriesError::DuplicateDate {
                date: d(2024, 1, 1)
            })
        );
    }

    #[test]
    fn test_duplicate_summed() {
        let obs = vec![
            Observation::new(d(2024, 1, 1), 1.0),
            Observation::new(d(2024, 1, 2), 2.0),
            Observation::new(d(2024, 1, 1), 4.0),
        ];
        let series = DailySeries::from_observations(&obs, DuplicatePolicy::Sum).unwrap();
        assert_eq!(series.values(), &[5.0, 2.0]);
    }

    #[test]
    fn test_negative_value_rejected() {
        let obs = vec![Observation::new(d(2024, 1, 1), -1.0)];
        let result = DailySeries::from_observations(&obs, DuplicatePolicy::Reject);
        assert!(matches!(result, Err(SeriesError::InvalidValue { .. })));
    }

    #[test]
    fn test_nan_value_rejected() {
        let result = DailySeries::from_values(d(2024, 1, 1), vec![1.0, f64::NAN]);
        match result {
            Err(SeriesError::InvalidValue { date, .. }) => assert_eq!(date, d(2024, 1, 2)),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_get_outside_range() {
        let series = DailySeries::from_values(d(2024, 1, 1), vec![1.0, 2.0]).unwrap();
        assert_eq!(series.get(d(2023, 12, 31)), None);
        assert_eq!(series.get(d(2024, 1, 3)), None);
        assert_eq!(series.get(d(2024, 1, 2)), Some(2.0));
    }

    #[test]
    fn test_iter_dates_are_consecutive() {
        let series = DailySeries::from_values(d(2024, 2, 28), vec![0.0; 3]).unwrap();
        let dates: Vec<Date> = series.iter().map(|(date, _)| date).collect();
        assert_eq!(dates, vec![d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1)]);
    }

    #[test]
    fn test_max_and_total() {
        let series = DailySeries::from_values(d(2024, 1, 1), vec![3.0, 9.0, 1.0]).unwrap();
        assert_eq!(series.max(), 9.0);
        assert_eq!(series.total(), 13.0);
    }
}
