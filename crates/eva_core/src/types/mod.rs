//! Calendar, series and error types.
//!
//! This module provides:
//! - `time`: `Date` wrapper around chrono::NaiveDate with format-aware parsing
//! - `series`: `Observation` records and the gap-free `DailySeries`
//! - `error`: Structured error types for dates, series construction and solvers
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`Observation`], [`DailySeries`], [`DuplicatePolicy`] from `series`
//! - [`DateError`], [`SeriesError`], [`SolverError`] from `error`

pub mod error;
pub mod series;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, SeriesError, SolverError};
pub use series::{DailySeries, DuplicatePolicy, Observation};
pub use time::Date;
