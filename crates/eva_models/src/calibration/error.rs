//! Calibration error types.

use eva_core::types::SolverError;
use thiserror::Error;

/// Calibration error type.
///
/// Covers every way a fit can fail: too little data, data the model cannot
/// describe, and numerical breakdown inside the optimiser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Not enough data points for a fit.
    #[error("Insufficient data: at least {required} values required, {provided} provided")]
    InsufficientData {
        /// Minimum required data points
        required: usize,
        /// Actual data points provided
        provided: usize,
    },

    /// Input data failed validation (non-finite, or not above the threshold).
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Description of the validation failure
        message: String,
    },

    /// A parameter outside its admissible range.
    #[error("Invalid parameter: {param_name} = {value}")]
    InvalidParameter {
        /// Name of the parameter
        param_name: String,
        /// Offending value
        value: f64,
    },

    /// NaN, Inf, or no finite likelihood among the candidates.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },

    /// Root finder failure while locating likelihood stationary points.
    #[error("Solver failed: {0}")]
    Solver(#[from] SolverError),
}

impl CalibrationError {
    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, provided: usize) -> Self {
        CalibrationError::InsufficientData { required, provided }
    }

    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        CalibrationError::InvalidData {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(param_name: &str, value: f64) -> Self {
        CalibrationError::InvalidParameter {
            param_name: param_name.to_string(),
            value,
        }
    }

    /// Create a numerical instability error.
    pub fn numerical_instability(message: impl Into<String>) -> Self {
        CalibrationError::NumericalInstability {
            message: message.into(),
        }
    }

    /// True for failures caused by the data rather than the algorithm.
    ///
    /// Bootstrap resampling skips data errors silently.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CalibrationError::InsufficientData { .. } | CalibrationError::InvalidData { .. }
        )
    }
}
