//! Probability distributions.
//!
//! - [`GeneralizedPareto`]: threshold-exceedance tail model, generic over `T: Float`
//! - [`kolmogorov`]: limiting distribution of the scaled KS statistic

pub mod gpd;
pub mod kolmogorov;

pub use gpd::{GeneralizedPareto, TailKind};
