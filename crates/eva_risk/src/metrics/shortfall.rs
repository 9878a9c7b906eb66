//! Expected Shortfall under a GPD tail.
//!
//! For a GPD with location U, scale σ and shape ξ < 1, the mean of the
//! losses beyond a level `v ≥ U` is
//!
//! `ES(v) = v/(1 − ξ) + (σ − ξ·U)/(1 − ξ)`.

use eva_models::calibration::GpdParameters;

use crate::RiskError;

/// Expected Shortfall beyond `value_at_risk`.
///
/// # Errors
///
/// [`RiskError::UnboundedShortfall`] when ξ ≥ 1, where the tail mean is infinite.
///
/// # Examples
///
/// ```
/// use eva_models::calibration::GpdParameters;
/// use eva_risk::metrics::expected_shortfall;
///
/// let params = GpdParameters { location: 160.0, scale: 50.0, shape: 0.2 };
/// let es = expected_shortfall(300.0, &params).unwrap();
/// assert!((es - 397.5).abs() < 1e-9);
/// ```
pub fn expected_shortfall(value_at_risk: f64, params: &GpdParameters) -> Result<f64, RiskError> {
    let xi = params.shape;
    if xi >= 1.0 {
        return Err(RiskError::UnboundedShortfall {
            shape: xi,
            value_at_risk,
        });
    }
    Ok(value_at_risk / (1.0 - xi) + (params.scale - xi * params.location) / (1.0 - xi))
}
