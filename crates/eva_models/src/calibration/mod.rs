//! Fitting tail models to exceedances and checking the fit.
//!
//! ## Components
//!
//! - [`GpdMaximumLikelihood`]: profile-likelihood MLE for the GPD with fixed location
//! - [`KolmogorovSmirnov`]: goodness-of-fit test against a fitted GPD
//! - [`CalibrationError`]: error type for fitting failures
//! - [`CalibrationResult`], [`CalibrationDiagnostics`]: fitted parameters and diagnostics
//!
//! ## Example
//!
//! ```
//! use eva_models::calibration::{GpdMaximumLikelihood, KolmogorovSmirnov};
//!
//! let extremes = [171.0, 166.0, 240.0, 183.0, 161.0, 198.0, 215.0, 175.0];
//! let fit = GpdMaximumLikelihood::default().fit(160.0, &extremes).unwrap();
//!
//! let ks = KolmogorovSmirnov::new(0.05)
//!     .test(&extremes, &fit.params().distribution().unwrap())
//!     .unwrap();
//! assert!(ks.p_value > 0.0 && ks.p_value <= 1.0);
//! ```

mod error;
pub mod goodness_of_fit;
pub mod gpd_mle;
mod result;

pub use error::CalibrationError;
pub use goodness_of_fit::{KolmogorovSmirnov, KsTestResult};
pub use gpd_mle::{GpdMaximumLikelihood, GpdMleConfig};
pub use result::{CalibrationDiagnostics, CalibrationResult, GpdFit, GpdParameters};
