//! Risk and analysis error types.

use eva_models::calibration::CalibrationError;
use thiserror::Error;

/// Errors from return-value and shortfall computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Confidence level outside (0, 1).
    #[error("Confidence level must lie strictly between 0 and 1, got {value}")]
    InvalidConfidence {
        /// The rejected level
        value: f64,
    },

    /// The series the extremes came from covers zero days.
    #[error("Series spans zero days; the extremes rate is undefined")]
    EmptySpan,

    /// No extremes to derive a rate or resample from.
    #[error("No extremes available")]
    NoExtremes,

    /// The return period is shorter than the mean time between extremes.
    ///
    /// The implied exceedance probability exceeds 1: the return level would
    /// lie below the threshold, where the tail model does not apply.
    #[error(
        "Return period of {return_period:.3} periods is shorter than the mean time between \
         extremes (exceedance probability {exceedance_probability:.4} > 1)"
    )]
    ReturnPeriodTooShort {
        /// Return period in return-period units
        return_period: f64,
        /// Implied exceedance probability
        exceedance_probability: f64,
    },

    /// Shape ξ ≥ 1: the tail mean is infinite.
    #[error("Expected shortfall is unbounded for shape {shape:.4} >= 1 (VaR = {value_at_risk:.4})")]
    UnboundedShortfall {
        /// Fitted shape
        shape: f64,
        /// Value at Risk, still well defined
        value_at_risk: f64,
    },

    /// Every bootstrap resample failed to fit.
    #[error("All {attempted} bootstrap resamples failed to fit")]
    BootstrapFailed {
        /// Number of resamples attempted
        attempted: usize,
    },

    /// Fitted parameters could not form a distribution.
    #[error(transparent)]
    Model(#[from] CalibrationError),
}

/// Errors from the end-to-end analysis.
///
/// "No extremes" is not an error; see
/// [`AnalysisOutcome`](crate::analysis::AnalysisOutcome).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid analysis parameters, one message per violation.
    #[error("Invalid analysis configuration: {}", .0.join("; "))]
    Config(Vec<String>),

    /// Fitting the tail model failed.
    #[error("GPD fit failed: {0}")]
    Fit(#[from] CalibrationError),

    /// Risk metrics could not be derived from the fitted model.
    #[error("Risk computation rejected: {0}")]
    Risk(#[from] RiskError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_period_too_short_display() {
        let err = RiskError::ReturnPeriodTooShort {
            return_period: 20.0,
            exceedance_probability: 1.427,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("20.000"));
        assert!(msg.contains("1.4270"));
    }

    #[test]
    fn test_unbounded_shortfall_display() {
        let err = RiskError::UnboundedShortfall {
            shape: 1.2,
            value_at_risk: 512.0,
        };
        assert!(format!("{}", err).contains(">= 1"));
    }

    #[test]
    fn test_config_error_joins_messages() {
        let err = AnalysisError::Config(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(format!("{}", err), "Invalid analysis configuration: a; b");
    }

    #[test]
    fn test_conversions() {
        let fit: AnalysisError = CalibrationError::insufficient_data(2, 1).into();
        assert!(matches!(fit, AnalysisError::Fit(_)));
        let risk: AnalysisError = RiskError::EmptySpan.into();
        assert!(matches!(risk, AnalysisError::Risk(RiskError::EmptySpan)));
    }
}
