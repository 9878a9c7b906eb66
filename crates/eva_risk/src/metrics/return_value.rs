//! Return values over a return period.
//!
//! For confidence level c and a return-period size of `s` days:
//!
//! - return period `T = 1/(1 − c)`, in units of `s`
//! - extremes rate `λ = n / (span / s)`, events per `s` days over the series
//! - exceedance probability `p = 1/(T·λ)`
//! - return value `x_T = F⁻¹(1 − p)`, the GPD inverse survival function at `p`
//!
//! `x_T` is the level exceeded on average once every `T` periods and is
//! reported as the Value at Risk.

use eva_models::calibration::GpdParameters;

use crate::RiskError;

/// Default return-period size in days (one week).
pub const DEFAULT_PERIOD_DAYS: f64 = 7.0;

/// Return-period quantities for one confidence level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnValueEstimate {
    /// Return period T, in return-period units
    pub return_period: f64,
    /// Return-period size in days
    pub period_size_days: f64,
    /// Mean number of extremes per return-period unit
    pub extremes_rate: f64,
    /// Probability of exceeding the return value per extreme event
    pub exceedance_probability: f64,
    /// The return value (VaR)
    pub value: f64,
}

/// Computes return values for a fixed return-period size.
///
/// # Examples
///
/// ```
/// use eva_models::calibration::GpdParameters;
/// use eva_risk::metrics::ReturnValueCalculator;
///
/// let params = GpdParameters { location: 160.0, scale: 40.0, shape: 0.0 };
/// let calc = ReturnValueCalculator::weekly();
///
/// // 10 extremes over 70 days: one per week on average
/// let estimate = calc.estimate(&params, 10, 70, 0.9).unwrap();
/// assert!((estimate.extremes_rate - 1.0).abs() < 1e-12);
/// assert!((estimate.exceedance_probability - 0.1).abs() < 1e-12);
/// assert!((estimate.value - (160.0 - 40.0 * 0.1_f64.ln())).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnValueCalculator {
    period_size_days: f64,
}

impl Default for ReturnValueCalculator {
    fn default() -> Self {
        Self::weekly()
    }
}

impl ReturnValueCalculator {
    /// Calculator with a return-period size of `period_size_days` (expected > 0).
    pub fn new(period_size_days: f64) -> Self {
        Self { period_size_days }
    }

    /// Calculator with a seven-day return period.
    pub fn weekly() -> Self {
        Self::new(DEFAULT_PERIOD_DAYS)
    }

    /// Return-period size in days.
    pub fn period_size_days(&self) -> f64 {
        self.period_size_days
    }

    /// Return period `1/(1 − c)`.
    pub fn return_period(confidence_level: f64) -> Result<f64, RiskError> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(RiskError::InvalidConfidence {
                value: confidence_level,
            });
        }
        Ok(1.0 / (1.0 - confidence_level))
    }

    /// Extremes per return-period unit over a series spanning `span_days`.
    pub fn extremes_rate(&self, extremes_count: usize, span_days: i64) -> Result<f64, RiskError> {
        if extremes_count == 0 {
            return Err(RiskError::NoExtremes);
        }
        if span_days <= 0 {
            return Err(RiskError::EmptySpan);
        }
        let periods = span_days as f64 / self.period_size_days;
        Ok(extremes_count as f64 / periods)
    }

    /// Exceedance probability for a return period and an extremes rate.
    ///
    /// # Errors
    ///
    /// [`RiskError::ReturnPeriodTooShort`] when the result exceeds 1.
    pub fn exceedance_probability(return_period: f64, extremes_rate: f64) -> Result<f64, RiskError> {
        let p = 1.0 / (return_period * extremes_rate);
        if p > 1.0 {
            return Err(RiskError::ReturnPeriodTooShort {
                return_period,
                exceedance_probability: p,
            });
        }
        Ok(p)
    }

    /// Return value at exceedance probability `p` under `params`.
    pub fn return_value(params: &GpdParameters, p: f64) -> Result<f64, RiskError> {
        Ok(params.distribution()?.isf(p))
    }

    /// Full estimate at `confidence_level`.
    pub fn estimate(
        &self,
        params: &GpdParameters,
        extremes_count: usize,
        span_days: i64,
        confidence_level: f64,
    ) -> Result<ReturnValueEstimate, RiskError> {
        let return_period = Self::return_period(confidence_level)?;
        let extremes_rate = self.extremes_rate(extremes_count, span_days)?;
        let exceedance_probability = Self::exceedance_probability(return_period, extremes_rate)?;
        let value = Self::return_value(params, exceedance_probability)?;

        Ok(ReturnValueEstimate {
            return_period,
            period_size_days: self.period_size_days,
            extremes_rate,
            exceedance_probability,
            value,
        })
    }
}
