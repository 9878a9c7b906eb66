//! # eva_risk: Tail Risk (L3: Application)
//!
//! Turns a gap-free daily series into tail-risk figures:
//!
//! - Peaks-over-threshold extraction with declustering (`extremes`)
//! - Return values / Value at Risk and Expected Shortfall (`metrics`)
//! - Bootstrap confidence intervals for the return value (`metrics::bootstrap`)
//! - The end-to-end pipeline and its parameters (`analysis`)
//!
//! ## Example
//!
//! ```rust
//! use eva_core::types::{DailySeries, Date};
//! use eva_risk::analysis::{AnalysisConfig, AnalysisOutcome, EvaAnalysis};
//!
//! let mut values = vec![0.0; 1000];
//! for (i, day) in [100, 300, 500, 700, 900].iter().enumerate() {
//!     values[*day] = 180.0 + 10.0 * i as f64;
//! }
//! let series = DailySeries::from_values(Date::from_ymd(2020, 1, 1).unwrap(), values).unwrap();
//!
//! let config = AnalysisConfig { confidence_level: 0.99, ..AnalysisConfig::default() };
//! match EvaAnalysis::new(config).run(&series).unwrap() {
//!     AnalysisOutcome::Fitted(report) => {
//!         assert_eq!(report.extremes.len(), 5);
//!         assert!(report.risk.is_ok());
//!     }
//!     AnalysisOutcome::NoExtremes { .. } => unreachable!(),
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Rayon-parallel bootstrap resampling
//! - `serde` (default): Serialisation of reports and configuration

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analysis;
pub mod error;
pub mod extremes;
pub mod metrics;

pub use error::{AnalysisError, RiskError};
