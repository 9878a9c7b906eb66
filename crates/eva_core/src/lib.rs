//! # eva_core: Foundation for Extreme Value Analysis
//!
//! ## Layer 1 (Foundation) Role
//!
//! eva_core is the bottom layer of the workspace, providing:
//! - Calendar dates with configurable parsing (`types::time`)
//! - Dense daily series with gap filling (`types::series`)
//! - Error types: `DateError`, `SeriesError`, `SolverError` (`types::error`)
//! - Descriptive statistics and empirical quantiles (`math::stats`)
//! - Evaluation grids and bracketing root finders used by the model fitters
//!   (`math::grid`, `math::solvers`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other eva_* crates:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use eva_core::types::{Date, DailySeries, DuplicatePolicy, Observation};
//!
//! let observations = vec![
//!     Observation::new(Date::parse_with_format("03/01/2024", "%d/%m/%Y").unwrap(), 12.0),
//!     Observation::new(Date::parse_with_format("01/01/2024", "%d/%m/%Y").unwrap(), 5.0),
//! ];
//!
//! // Missing 2 January is filled with zero
//! let series = DailySeries::from_observations(&observations, DuplicatePolicy::Reject).unwrap();
//! assert_eq!(series.len(), 3);
//! assert_eq!(series.values(), &[5.0, 0.0, 12.0]);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date`, `Observation`, `DescriptiveStats`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
