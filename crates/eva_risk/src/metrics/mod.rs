//! Risk metrics derived from a fitted GPD tail.
//!
//! - [`return_value`]: return period, extremes rate, exceedance probability, VaR
//! - [`shortfall`]: closed-form Expected Shortfall
//! - [`bootstrap`]: resampling confidence interval for the return value

pub mod bootstrap;
pub mod return_value;
pub mod shortfall;

pub use bootstrap::{BootstrapConfig, ConfidenceInterval};
pub use return_value::{ReturnValueCalculator, ReturnValueEstimate};
pub use shortfall::expected_shortfall;

use eva_models::calibration::GpdParameters;

/// Value at Risk and Expected Shortfall for one confidence level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// Confidence level c
    pub confidence_level: f64,
    /// Return-period quantities and the VaR itself
    pub return_value: ReturnValueEstimate,
    /// Expected Shortfall beyond the VaR
    pub expected_shortfall: f64,
    /// Bootstrap interval for the VaR, when requested
    pub confidence_interval: Option<ConfidenceInterval>,
}

impl RiskMetrics {
    /// Value at Risk (the return value).
    pub fn value_at_risk(&self) -> f64 {
        self.return_value.value
    }

    /// Computes VaR and ES for `params` at `confidence_level`.
    ///
    /// Deterministic: identical inputs give identical outputs.
    pub fn compute(
        calculator: &ReturnValueCalculator,
        params: &GpdParameters,
        extremes_count: usize,
        span_days: i64,
        confidence_level: f64,
    ) -> Result<Self, crate::RiskError> {
        let return_value =
            calculator.estimate(params, extremes_count, span_days, confidence_level)?;
        let expected_shortfall = expected_shortfall(return_value.value, params)?;
        Ok(Self {
            confidence_level,
            return_value,
            expected_shortfall,
            confidence_interval: None,
        })
    }
}
