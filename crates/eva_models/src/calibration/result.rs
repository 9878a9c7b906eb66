//! Calibration result types.

use std::time::Duration;

use super::CalibrationError;
use crate::distributions::{GeneralizedPareto, TailKind};

/// Calibration diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationDiagnostics {
    /// Number of data points the model was fitted to
    pub sample_size: usize,
    /// Maximised log-likelihood
    pub log_likelihood: f64,
    /// Akaike information criterion, `2k − 2ℓ`
    pub aic: f64,
    /// Stationary points compared (including the exponential candidate)
    pub candidates_examined: usize,
    /// Wall-clock fitting time
    #[cfg_attr(feature = "serde", serde(skip))]
    pub duration: Duration,
}

impl CalibrationDiagnostics {
    /// Create diagnostics for a model with `free_parameters` fitted values.
    pub fn new(
        sample_size: usize,
        log_likelihood: f64,
        free_parameters: usize,
        candidates_examined: usize,
        duration: Duration,
    ) -> Self {
        Self {
            sample_size,
            log_likelihood,
            aic: 2.0 * free_parameters as f64 - 2.0 * log_likelihood,
            candidates_examined,
            duration,
        }
    }
}

/// Calibration result.
///
/// Generic over the parameter type P to support model-specific results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationResult<P> {
    /// Calibrated parameters
    pub parameters: P,
    /// Calibration diagnostics
    pub diagnostics: CalibrationDiagnostics,
}

impl<P> CalibrationResult<P> {
    /// Create a result from fitted parameters and diagnostics.
    pub fn new(parameters: P, diagnostics: CalibrationDiagnostics) -> Self {
        Self {
            parameters,
            diagnostics,
        }
    }

    /// Get the calibrated parameters.
    pub fn params(&self) -> &P {
        &self.parameters
    }

    /// Get the calibration diagnostics.
    pub fn diagnostics(&self) -> &CalibrationDiagnostics {
        &self.diagnostics
    }
}

/// Fitted GPD parameters. The location is fixed at the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpdParameters {
    /// Location μ (the POT threshold)
    pub location: f64,
    /// Scale σ > 0
    pub scale: f64,
    /// Shape ξ
    pub shape: f64,
}

impl GpdParameters {
    /// The distribution these parameters describe.
    ///
    /// # Errors
    ///
    /// `CalibrationError::InvalidParameter` for a non-positive or non-finite scale,
    /// or a non-finite location or shape.
    pub fn distribution(&self) -> Result<GeneralizedPareto<f64>, CalibrationError> {
        GeneralizedPareto::new(self.location, self.scale, self.shape).ok_or_else(|| {
            if !(self.scale > 0.0 && self.scale.is_finite()) {
                CalibrationError::invalid_parameter("scale", self.scale)
            } else if !self.shape.is_finite() {
                CalibrationError::invalid_parameter("shape", self.shape)
            } else {
                CalibrationError::invalid_parameter("location", self.location)
            }
        })
    }

    /// Tail classification by the sign of the shape.
    pub fn tail_kind(&self) -> TailKind {
        TailKind::from_shape(self.shape)
    }
}

/// Result of a GPD fit.
pub type GpdFit = CalibrationResult<GpdParameters>;
