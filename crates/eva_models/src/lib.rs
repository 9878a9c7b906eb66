//! # eva_models: Tail Models (L2: Business Logic)
//!
//! Distribution functions and fitting procedures for threshold exceedances.
//!
//! This crate provides:
//! - The Generalized Pareto Distribution (`distributions::gpd`)
//! - The asymptotic Kolmogorov distribution (`distributions::kolmogorov`)
//! - Maximum-likelihood GPD fitting via the profile likelihood
//!   (`calibration::gpd_mle`)
//! - Kolmogorov–Smirnov goodness-of-fit testing (`calibration::goodness_of_fit`)
//!
//! ## Example
//!
//! ```rust
//! use eva_models::calibration::GpdMaximumLikelihood;
//!
//! // Extreme values above a threshold of 160
//! let extremes = [175.0, 162.0, 230.0, 190.0, 168.0, 205.0, 181.0];
//! let fit = GpdMaximumLikelihood::default().fit(160.0, &extremes).unwrap();
//!
//! assert_eq!(fit.params().location, 160.0);
//! assert!(fit.params().scale > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calibration;
pub mod distributions;
