//! Stopping rules for the bracketing solvers.
//!
//! Two presets cover the workspace's root-finding needs:
//! [`SolverConfig::likelihood_roots`] for stationary points of a profile
//! likelihood, where candidate roots are compared by log-likelihood, and
//! [`SolverConfig::quantile_inversion`] for inverting a distribution function.

use num_traits::Float;

use crate::types::SolverError;

/// Tolerance and iteration budget of a root search.
///
/// # Example
///
/// ```
/// use eva_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::new(1e-9, 60).unwrap();
/// assert_eq!(config.max_iterations, 60);
///
/// // A zero budget can never converge
/// assert!(SolverConfig::<f64>::new(1e-9, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Stop once the bracket is narrower than this, or `|f(x)|` falls below it.
    pub tolerance: T,
    /// Iterations allowed before `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// 1e-10 over at most 100 iterations.
    fn default() -> Self {
        Self::preset(1e-10, 100)
    }
}

impl<T: Float> SolverConfig<T> {
    /// Checked constructor.
    ///
    /// # Errors
    ///
    /// [`SolverError::NumericalInstability`] for a tolerance that is not a
    /// positive finite number, or for a zero iteration budget.
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, SolverError> {
        if !(tolerance.is_finite() && tolerance > T::zero()) {
            return Err(SolverError::NumericalInstability(
                "solver tolerance must be positive and finite".to_string(),
            ));
        }
        if max_iterations == 0 {
            return Err(SolverError::NumericalInstability(
                "solver needs at least one iteration".to_string(),
            ));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }

    /// 1e-14 over at most 500 iterations.
    ///
    /// Roots of the GPD profile-likelihood equation sit close together near
    /// θ = 0, and the winning candidate is chosen by log-likelihood.
    pub fn likelihood_roots() -> Self {
        Self::preset(1e-14, 500)
    }

    /// 1e-12 over at most 200 iterations, for inverting a CDF or survival
    /// function on a bounded bracket.
    pub fn quantile_inversion() -> Self {
        Self::preset(1e-12, 200)
    }

    fn preset(tolerance: f64, max_iterations: usize) -> Self {
        // Precisions narrower than f64 fall back to their own epsilon.
        Self {
            tolerance: T::from(tolerance).unwrap_or_else(T::epsilon),
            max_iterations,
        }
    }
}
