//! Asymptotic Kolmogorov distribution.
//!
//! If `D_n` is the two-sided KS statistic of `n` i.i.d. observations against
//! their true continuous CDF, `√n·D_n` converges to the Kolmogorov
//! distribution `K(λ) = 1 − 2 Σ_{k≥1} (−1)^(k−1) exp(−2k²λ²)`.
//!
//! Small samples use Stephens' modified scale
//! `λ = (√n + 0.12 + 0.11/√n)·D`, accurate for `n ≥ 5` or so.

use eva_core::math::solvers::{BrentSolver, SolverConfig};
use eva_core::types::SolverError;
use std::f64::consts::PI;

/// Below this λ the theta-function form converges faster.
const SERIES_SWITCH: f64 = 1.18;

const MAX_TERMS: usize = 100;

/// Kolmogorov survival function `P(K > λ)`.
///
/// # Examples
///
/// ```
/// use eva_models::distributions::kolmogorov::kolmogorov_sf;
///
/// assert!((kolmogorov_sf(1.0) - 0.27).abs() < 1e-4);
/// assert_eq!(kolmogorov_sf(0.0), 1.0);
/// ```
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda.is_nan() {
        return f64::NAN;
    }
    if lambda <= 0.0 {
        return 1.0;
    }
    if lambda < SERIES_SWITCH {
        return (1.0 - kolmogorov_cdf_small(lambda)).clamp(0.0, 1.0);
    }

    let mut sum = 0.0;
    for k in 1..=MAX_TERMS {
        let kf = k as f64;
        let term = (-2.0 * kf * kf * lambda * lambda).exp();
        if k % 2 == 1 {
            sum += term;
        } else {
            sum -= term;
        }
        if term < 1e-17 {
            break;
        }
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

/// Kolmogorov CDF `P(K ≤ λ)`.
pub fn kolmogorov_cdf(lambda: f64) -> f64 {
    1.0 - kolmogorov_sf(lambda)
}

/// `K(λ) = (√(2π)/λ) Σ_{k≥1} exp(−(2k−1)²π²/(8λ²))`.
fn kolmogorov_cdf_small(lambda: f64) -> f64 {
    let scale = -PI * PI / (8.0 * lambda * lambda);
    let mut sum = 0.0;
    for k in 1..=MAX_TERMS {
        let odd = (2 * k - 1) as f64;
        let term = (odd * odd * scale).exp();
        sum += term;
        if term < 1e-17 * sum.max(f64::MIN_POSITIVE) {
            break;
        }
    }
    (2.0 * PI).sqrt() / lambda * sum
}

/// Inverse survival function: the λ with `P(K > λ) = alpha`.
///
/// # Errors
///
/// `SolverError::NoBracket` when `alpha` is outside `(0, 1)`.
///
/// # Examples
///
/// ```
/// use eva_models::distributions::kolmogorov::kolmogorov_isf;
///
/// let lambda = kolmogorov_isf(0.05).unwrap();
/// assert!((lambda - 1.3581).abs() < 1e-3);
/// ```
pub fn kolmogorov_isf(alpha: f64) -> Result<f64, SolverError> {
    let solver = BrentSolver::new(SolverConfig::quantile_inversion());
    solver.find_root(|lambda| kolmogorov_sf(lambda) - alpha, 1e-3, 10.0)
}

/// Stephens-corrected scale factor `√n + 0.12 + 0.11/√n`.
pub fn stephens_factor(n: usize) -> f64 {
    let sqrt_n = (n as f64).sqrt();
    sqrt_n + 0.12 + 0.11 / sqrt_n
}
