//! Maximum-likelihood fitting of the GPD with a fixed location.
//!
//! With `θ = ξ/σ` the log-likelihood of excesses `y_i > 0` is maximised over
//! ξ in closed form, `ξ̂(θ) = mean(ln(1 + θy_i))`, leaving a one-dimensional
//! profile
//!
//! `ℓ*(θ) = −n·[1 + ξ̂(θ) + ln(ξ̂(θ)/θ)]`
//!
//! whose stationary points solve
//!
//! `h(θ) = (1 + ξ̂(θ))·mean(1/(1 + θy_i)) − 1 = 0`.
//!
//! Every root lies in `(−1/y_max, 0) ∪ (0, 2(ȳ − y_min)/y_min²)`. Both
//! intervals are scanned on log-spaced grids, sign changes are refined with
//! Brent's method, and the candidate with the highest likelihood wins. The
//! exponential law (θ = 0, σ = ȳ) is always a candidate and wins ties.

use std::time::Instant;

use eva_core::math::grid::geomspace;
use eva_core::math::solvers::{BrentSolver, SolverConfig};
use eva_core::math::stats::mean;

use super::{CalibrationDiagnostics, CalibrationError, GpdFit, GpdParameters};
use crate::distributions::GeneralizedPareto;

/// Smallest sample the fitter accepts.
pub const MIN_EXCESSES: usize = 2;

/// Relative likelihood gain a candidate needs to displace the current best.
const LIKELIHOOD_TIE: f64 = 1e-12;

/// Closest approach of the grids to θ = 0 and to the lower pole, relative.
const GRID_EDGE: f64 = 1e-6;

/// Configuration for [`GpdMaximumLikelihood`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpdMleConfig {
    /// Grid points per scanned segment (three segments in total).
    pub grid_points: usize,
    /// Brent refinement settings.
    pub solver: SolverConfig<f64>,
}

impl Default for GpdMleConfig {
    fn default() -> Self {
        Self {
            grid_points: 200,
            solver: SolverConfig::likelihood_roots(),
        }
    }
}

/// Profile-likelihood GPD fitter.
///
/// # Examples
///
/// ```
/// use eva_models::calibration::GpdMaximumLikelihood;
///
/// // Identical excesses carry no shape information: exponential fit
/// let fit = GpdMaximumLikelihood::default()
///     .fit(160.0, &[200.0, 200.0, 200.0])
///     .unwrap();
/// assert_eq!(fit.params().shape, 0.0);
/// assert!((fit.params().scale - 40.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GpdMaximumLikelihood {
    config: GpdMleConfig,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    scale: f64,
    shape: f64,
    log_likelihood: f64,
}

impl GpdMaximumLikelihood {
    /// Create a fitter with the given configuration.
    pub fn new(config: GpdMleConfig) -> Self {
        Self { config }
    }

    /// Returns the fitter configuration.
    pub fn config(&self) -> &GpdMleConfig {
        &self.config
    }

    /// Fits a GPD with location `threshold` to `values`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a non-finite threshold
    /// - `InsufficientData` for fewer than [`MIN_EXCESSES`] values
    /// - `InvalidData` for non-finite values or values not above `threshold`
    /// - `Solver` if refining a bracketed stationary point fails
    /// - `NumericalInstability` if no candidate has a finite likelihood
    pub fn fit(&self, threshold: f64, values: &[f64]) -> Result<GpdFit, CalibrationError> {
        let started = Instant::now();

        if !threshold.is_finite() {
            return Err(CalibrationError::invalid_parameter("threshold", threshold));
        }
        if values.len() < MIN_EXCESSES {
            return Err(CalibrationError::insufficient_data(
                MIN_EXCESSES,
                values.len(),
            ));
        }

        let mut excesses = Vec::with_capacity(values.len());
        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(CalibrationError::invalid_data(format!(
                    "value #{} is not finite",
                    i
                )));
            }
            if v <= threshold {
                return Err(CalibrationError::invalid_data(format!(
                    "value #{} ({}) does not exceed the threshold {}",
                    i, v, threshold
                )));
            }
            excesses.push(v - threshold);
        }

        let (best, candidates_examined) = self.maximise(&excesses)?;

        let parameters = GpdParameters {
            location: threshold,
            scale: best.scale,
            shape: best.shape,
        };
        let diagnostics = CalibrationDiagnostics::new(
            excesses.len(),
            best.log_likelihood,
            2,
            candidates_examined,
            started.elapsed(),
        );
        Ok(GpdFit::new(parameters, diagnostics))
    }

    fn maximise(&self, excesses: &[f64]) -> Result<(Candidate, usize), CalibrationError> {
        let n = excesses.len() as f64;
        let y_mean = mean(excesses);
        let (y_min, y_max) = excesses
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &y| {
                (lo.min(y), hi.max(y))
            });

        let exponential = Candidate {
            scale: y_mean,
            shape: 0.0,
            log_likelihood: -n * (1.0 + y_mean.ln()),
        };
        if !exponential.log_likelihood.is_finite() {
            return Err(CalibrationError::numerical_instability(
                "exponential log-likelihood is not finite",
            ));
        }

        // Identical excesses: h < 0 away from θ = 0, nothing else to find
        if y_max - y_min <= f64::EPSILON * y_mean {
            return Ok((exponential, 1));
        }

        let grid = self.theta_grid(y_min, y_max, y_mean);
        let solver = BrentSolver::new(self.config.solver);
        let roots = solver.find_roots_on_grid(|theta| stationarity(theta, excesses), &grid)?;

        let mut best = exponential;
        let mut examined = 1;
        for theta in roots {
            if theta == 0.0 {
                continue;
            }
            examined += 1;
            let Some(candidate) = profile_candidate(theta, excesses) else {
                continue;
            };
            let margin = LIKELIHOOD_TIE * best.log_likelihood.abs().max(1.0);
            if candidate.log_likelihood > best.log_likelihood + margin {
                best = candidate;
            }
        }

        Ok((best, examined))
    }

    /// Log-spaced θ grid covering both admissible intervals, ascending.
    fn theta_grid(&self, y_min: f64, y_max: f64, y_mean: f64) -> Vec<f64> {
        let m = self.config.grid_points.max(2);
        let pole = 1.0 / y_max;
        let mut grid: Vec<f64> = Vec::with_capacity(3 * m);

        // (−1/y_max, 0): dense near both the pole and zero
        grid.extend(geomspace(GRID_EDGE, 0.5, m).into_iter().map(|s| -pole * s));
        grid.extend(
            geomspace(GRID_EDGE, 0.5, m)
                .into_iter()
                .map(|r| -pole * (1.0 - r)),
        );

        // (0, 2(ȳ − y_min)/y_min²)
        let upper = 2.0 * (y_mean - y_min) / (y_min * y_min);
        let lower = GRID_EDGE * pole;
        if upper.is_finite() && upper > lower {
            grid.extend(geomspace(lower, upper, m));
        }

        grid.sort_by(|a, b| a.total_cmp(b));
        grid.dedup();
        grid
    }
}

/// `h(θ)`; `NaN` where `1 + θy ≤ 0` for some excess.
fn stationarity(theta: f64, excesses: &[f64]) -> f64 {
    let n = excesses.len() as f64;
    let mut log_sum = 0.0;
    let mut inv_sum = 0.0;
    for &y in excesses {
        let u = theta * y;
        if u <= -1.0 {
            return f64::NAN;
        }
        log_sum += u.ln_1p();
        inv_sum += 1.0 / (1.0 + u);
    }
    (1.0 + log_sum / n) * (inv_sum / n) - 1.0
}

/// Parameters and likelihood implied by a stationary θ.
fn profile_candidate(theta: f64, excesses: &[f64]) -> Option<Candidate> {
    let n = excesses.len() as f64;
    let shape = excesses.iter().map(|&y| (theta * y).ln_1p()).sum::<f64>() / n;
    let scale = shape / theta;
    let gpd = GeneralizedPareto::new(0.0, scale, shape)?;
    let log_likelihood = gpd.log_likelihood(excesses);
    if log_likelihood.is_finite() {
        Some(Candidate {
            scale,
            shape,
            log_likelihood,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sample_gpd(scale: f64, shape: f64, n: usize, seed: u64) -> Vec<f64> {
        let gpd = GeneralizedPareto::new(0.0, scale, shape).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| gpd.isf(rng.gen_range(f64::EPSILON..1.0)))
            .collect()
    }

    fn log_likelihood(values: &[f64], scale: f64, shape: f64) -> f64 {
        GeneralizedPareto::new(0.0, scale, shape)
            .unwrap()
            .log_likelihood(values)
    }

    #[test]
    fn test_recovers_heavy_tail() {
        let data = sample_gpd(50.0, 0.2, 5000, 7);
        let fit = GpdMaximumLikelihood::default().fit(0.0, &data).unwrap();
        assert_relative_eq!(fit.params().shape, 0.2, epsilon = 0.08);
        assert_relative_eq!(fit.params().scale, 50.0, max_relative = 0.1);
        assert!(fit.diagnostics().candidates_examined >= 2);
    }

    #[test]
    fn test_recovers_bounded_tail() {
        let data = sample_gpd(10.0, -0.2, 5000, 11);
        let fit = GpdMaximumLikelihood::default().fit(0.0, &data).unwrap();
        assert_relative_eq!(fit.params().shape, -0.2, epsilon = 0.06);
        assert_relative_eq!(fit.params().scale, 10.0, max_relative = 0.1);
    }

    #[test]
    fn test_exponential_sample_has_small_shape() {
        let data = sample_gpd(3.0, 0.0, 5000, 13);
        let fit = GpdMaximumLikelihood::default().fit(0.0, &data).unwrap();
        assert!(fit.params().shape.abs() < 0.06);
        assert_relative_eq!(fit.params().scale, 3.0, max_relative = 0.1);
    }

    #[test]
    fn test_threshold_shifts_location_only() {
        let data = sample_gpd(20.0, 0.1, 500, 17);
        let shifted: Vec<f64> = data.iter().map(|y| y + 160.0).collect();
        let fitter = GpdMaximumLikelihood::default();
        let a = fitter.fit(0.0, &data).unwrap();
        let b = fitter.fit(160.0, &shifted).unwrap();
        assert_eq!(b.params().location, 160.0);
        assert_relative_eq!(a.params().shape, b.params().shape, epsilon = 1e-6);
        assert_relative_eq!(a.params().scale, b.params().scale, max_relative = 1e-6);
    }

    #[test]
    fn test_fit_is_local_maximum() {
        let data = sample_gpd(50.0, 0.3, 300, 23);
        let fit = GpdMaximumLikelihood::default().fit(0.0, &data).unwrap();
        let (s, x) = (fit.params().scale, fit.params().shape);
        let best = fit.diagnostics().log_likelihood;

        assert_relative_eq!(best, log_likelihood(&data, s, x), max_relative = 1e-10);
        for &(ds, dx) in &[(1.01, 0.0), (0.99, 0.0), (1.0, 0.01), (1.0, -0.01), (1.01, 0.01)] {
            assert!(log_likelihood(&data, s * ds, x + dx) <= best + 1e-9);
        }
    }

    #[test]
    fn test_identical_values_give_exponential_fit() {
        let fit = GpdMaximumLikelihood::default()
            .fit(160.0, &[200.0; 5])
            .unwrap();
        assert_eq!(fit.params().shape, 0.0);
        assert_relative_eq!(fit.params().scale, 40.0);
        assert_eq!(fit.diagnostics().candidates_examined, 1);
        assert_relative_eq!(
            fit.diagnostics().log_likelihood,
            -5.0 * (1.0 + 40.0_f64.ln()),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_two_values() {
        let fit = GpdMaximumLikelihood::default()
            .fit(0.0, &[1.0, 3.0])
            .unwrap();
        assert!(fit.params().scale > 0.0);
        assert!(fit.diagnostics().log_likelihood.is_finite());
    }

    #[test]
    fn test_insufficient_data() {
        let fitter = GpdMaximumLikelihood::default();
        assert_eq!(
            fitter.fit(160.0, &[200.0]).unwrap_err(),
            CalibrationError::insufficient_data(2, 1)
        );
        assert!(matches!(
            fitter.fit(160.0, &[]),
            Err(CalibrationError::InsufficientData { provided: 0, .. })
        ));
    }

    #[test]
    fn test_value_at_threshold_rejected() {
        let result = GpdMaximumLikelihood::default().fit(160.0, &[200.0, 160.0]);
        assert!(matches!(result, Err(CalibrationError::InvalidData { .. })));
    }

    #[test]
    fn test_non_finite_rejected() {
        let fitter = GpdMaximumLikelihood::default();
        assert!(matches!(
            fitter.fit(0.0, &[1.0, f64::NAN]),
            Err(CalibrationError::InvalidData { .. })
        ));
        assert!(matches!(
            fitter.fit(f64::INFINITY, &[1.0, 2.0]),
            Err(CalibrationError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_stationarity_vanishes_at_zero() {
        assert_eq!(stationarity(0.0, &[1.0, 2.0, 5.0]), 0.0);
        assert!(stationarity(-1.0, &[1.0, 2.0]).is_nan());
    }

    #[test]
    fn test_theta_grid_is_sorted_and_inside_bounds() {
        let fitter = GpdMaximumLikelihood::default();
        let grid = fitter.theta_grid(0.5, 40.0, 10.0);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
        assert!(grid[0] > -1.0 / 40.0);
        let upper = 2.0 * (10.0 - 0.5) / 0.25;
        assert!(*grid.last().unwrap() <= upper);
        assert!(!grid.contains(&0.0));
    }
}
