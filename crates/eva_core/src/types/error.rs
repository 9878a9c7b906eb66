//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction and parsing
//! - `SeriesError`: Errors from building a gap-free daily series
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

use super::time::Date;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Text did not match the expected date format
///
/// # Examples
/// ```
/// use eva_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: '{input}' does not match format '{format}'")]
    ParseError {
        /// The raw text that failed to parse
        input: String,
        /// The chrono format string that was expected
        format: String,
    },
}

/// Errors raised while building a [`DailySeries`](super::DailySeries).
///
/// # Examples
/// ```
/// use eva_core::types::SeriesError;
///
/// let err = SeriesError::Empty;
/// assert!(format!("{}", err).contains("no observations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// No observations were supplied.
    #[error("Series has no observations")]
    Empty,

    /// The same calendar date appeared more than once.
    #[error("Duplicate observation for {date}")]
    DuplicateDate {
        /// The repeated date
        date: Date,
    },

    /// A value was negative, NaN or infinite.
    #[error("Invalid value {value} on {date}: counts must be finite and non-negative")]
    InvalidValue {
        /// Date of the offending observation
        date: Date,
        /// The rejected value
        value: f64,
    },
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: Non-finite function values or degenerate input
///
/// # Examples
/// ```
/// use eva_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parse_error_display() {
        let err = DateError::ParseError {
            input: "2024-13-01".to_string(),
            format: "%d/%m/%Y".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("2024-13-01"));
        assert!(msg.contains("%d/%m/%Y"));
    }

    #[test]
    fn test_duplicate_date_display() {
        let date = Date::from_ymd(2023, 5, 17).unwrap();
        let err = SeriesError::DuplicateDate { date };
        assert_eq!(format!("{}", err), "Duplicate observation for 2023-05-17");
    }

    #[test]
    fn test_invalid_value_display() {
        let date = Date::from_ymd(2023, 5, 17).unwrap();
        let err = SeriesError::InvalidValue { date, value: -3.0 };
        let msg = format!("{}", err);
        assert!(msg.contains("-3"));
        assert!(msg.contains("non-negative"));
    }

    #[test]
    fn test_no_bracket_display() {
        let err = SolverError::NoBracket { a: 0.0, b: 1.0 };
        assert!(format!("{}", err).contains("same sign"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = SolverError::NumericalInstability("NaN".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
