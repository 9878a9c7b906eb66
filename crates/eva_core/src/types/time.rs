//! Calendar dates for daily observation series.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Parsing with an explicit chrono format (input files use `%d/%m/%Y`)
//! - Day arithmetic used by gap filling and declustering
//!
//! # Examples
//!
//! ```
//! use eva_core::types::time::Date;
//!
//! let start = Date::parse_with_format("28/02/2024", "%d/%m/%Y").unwrap();
//! let end = start.add_days(2);
//!
//! // 2024 is a leap year
//! assert_eq!(end.to_string(), "2024-03-01");
//! assert_eq!(end - start, 2);
//! ```

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Date format used by the fatality input files (day/month/year).
pub const DAY_MONTH_YEAR: &str = "%d/%m/%Y";

/// ISO 8601 calendar date format.
pub const ISO_8601: &str = "%Y-%m-%d";

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Observations are daily, so a `Date` stands for midnight of that day
/// whenever a timestamp is needed (see [`Date::midnight`]).
///
/// # Examples
///
/// ```
/// use eva_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// // ISO 8601 via FromStr
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Examples
    ///
    /// ```
    /// use eva_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        Self::parse_with_format(s, ISO_8601)
    }

    /// Parses a date using a chrono format string.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use eva_core::types::time::{Date, DAY_MONTH_YEAR};
    ///
    /// let date = Date::parse_with_format("17/05/2023", DAY_MONTH_YEAR).unwrap();
    /// assert_eq!(date.month(), 5);
    ///
    /// // Month 13 does not exist
    /// assert!(Date::parse_with_format("17/13/2023", DAY_MONTH_YEAR).is_err());
    /// ```
    pub fn parse_with_format(s: &str, format: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), format)
            .map(Date)
            .map_err(|_| DateError::ParseError {
                input: s.to_string(),
                format: format.to_string(),
            })
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the date shifted by `days` (negative shifts go backwards).
    pub fn add_days(self, days: i64) -> Self {
        Date(self.0 + Duration::days(days))
    }

    /// Midnight at the start of this day.
    pub fn midnight(self) -> NaiveDateTime {
        self.0.and_time(chrono::NaiveTime::MIN)
    }

    /// Elapsed time from `earlier` to `self`.
    ///
    /// Negative when `earlier` is actually later.
    pub fn elapsed_since(self, earlier: Date) -> Duration {
        self.0 - earlier.0
    }

    /// Formats the date with a chrono format string.
    pub fn format(&self, format: &str) -> String {
        self.0.format(format).to_string()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_8601))
    }
}
