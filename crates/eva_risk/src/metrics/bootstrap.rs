//! Bootstrap confidence interval for the return value.
//!
//! The extremes are resampled with replacement, the GPD is refitted to each
//! resample and the return value recomputed at the point estimate's exceedance
//! probability. The interval bounds are empirical quantiles of those values.
//!
//! Resample `i` draws from its own `StdRng` seeded with `seed + i`, so the
//! result does not depend on thread scheduling when the `parallel` feature
//! spreads resamples over a Rayon pool.

use eva_core::math::stats::{quantile_sorted, sorted_copy};
use eva_models::calibration::GpdMaximumLikelihood;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::RiskError;

/// Upper bound on the number of resamples.
pub const MAX_BOOTSTRAP_SAMPLES: usize = 100_000;

/// Bootstrap settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapConfig {
    /// Number of resamples
    pub samples: usize,
    /// Coverage of the interval, in (0, 1)
    pub confidence: f64,
    /// Base seed; resample `i` uses `seed + i`
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            confidence: 0.95,
            seed: 42,
        }
    }
}

/// Two-sided bootstrap interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    /// Coverage
    pub confidence: f64,
    /// Lower bound, the `(1 − confidence)/2` quantile
    pub lower: f64,
    /// Upper bound, the `(1 + confidence)/2` quantile
    pub upper: f64,
    /// Resamples that produced a finite return value
    pub samples_used: usize,
    /// Resamples whose refit failed
    pub samples_failed: usize,
}

/// Bootstraps the return value at `exceedance_probability`.
///
/// # Errors
///
/// - [`RiskError::NoExtremes`] for an empty `values`
/// - [`RiskError::BootstrapFailed`] when no resample could be fitted
///
/// # Examples
///
/// ```
/// use eva_models::calibration::GpdMaximumLikelihood;
/// use eva_risk::metrics::bootstrap::{bootstrap_return_value, BootstrapConfig};
///
/// let extremes = [171.0, 166.0, 240.0, 183.0, 161.0, 198.0, 215.0, 175.0, 230.0, 169.0];
/// let config = BootstrapConfig { samples: 50, ..BootstrapConfig::default() };
/// let ci = bootstrap_return_value(
///     &extremes, 160.0, 0.1, &GpdMaximumLikelihood::default(), &config,
/// ).unwrap();
///
/// assert!(ci.lower <= ci.upper);
/// assert_eq!(ci.samples_used + ci.samples_failed, 50);
/// ```
pub fn bootstrap_return_value(
    values: &[f64],
    threshold: f64,
    exceedance_probability: f64,
    fitter: &GpdMaximumLikelihood,
    config: &BootstrapConfig,
) -> Result<ConfidenceInterval, RiskError> {
    if values.is_empty() {
        return Err(RiskError::NoExtremes);
    }

    let resample = |index: usize| -> Option<f64> {
        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(index as u64));
        let drawn: Vec<f64> = (0..values.len())
            .map(|_| values[rng.gen_range(0..values.len())])
            .collect();
        let fit = fitter.fit(threshold, &drawn).ok()?;
        let gpd = fit.params().distribution().ok()?;
        let value = gpd.isf(exceedance_probability);
        value.is_finite().then_some(value)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Option<f64>> = (0..config.samples).into_par_iter().map(resample).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Option<f64>> = (0..config.samples).map(resample).collect();

    let estimates: Vec<f64> = results.iter().flatten().copied().collect();
    let samples_failed = results.len() - estimates.len();

    if estimates.is_empty() {
        return Err(RiskError::BootstrapFailed {
            attempted: config.samples,
        });
    }
    if samples_failed > 0 {
        tracing::debug!(
            failed = samples_failed,
            attempted = config.samples,
            "bootstrap resamples skipped after failed refits"
        );
    }

    let sorted = sorted_copy(&estimates);
    Ok(ConfidenceInterval {
        confidence: config.confidence,
        lower: quantile_sorted(&sorted, (1.0 - config.confidence) / 2.0),
        upper: quantile_sorted(&sorted, (1.0 + config.confidence) / 2.0),
        samples_used: estimates.len(),
        samples_failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTREMES: [f64; 12] = [
        171.0, 166.0, 240.0, 183.0, 161.0, 198.0, 215.0, 175.0, 230.0, 169.0, 188.0, 205.0,
    ];

    #[test]
    fn test_same_seed_same_interval() {
        let config = BootstrapConfig {
            samples: 64,
            confidence: 0.9,
            seed: 7,
        };
        let fitter = GpdMaximumLikelihood::default();
        let a = bootstrap_return_value(&EXTREMES, 160.0, 0.05, &fitter, &config).unwrap();
        let b = bootstrap_return_value(&EXTREMES, 160.0, 0.05, &fitter, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_interval_above_threshold() {
        let config = BootstrapConfig {
            samples: 100,
            ..BootstrapConfig::default()
        };
        let ci = bootstrap_return_value(
            &EXTREMES,
            160.0,
            0.05,
            &GpdMaximumLikelihood::default(),
            &config,
        )
        .unwrap();
        assert!(ci.lower > 160.0);
        assert!(ci.lower <= ci.upper);
        assert_eq!(ci.confidence, 0.95);
    }

    #[test]
    fn test_single_extreme_fails_every_resample() {
        let config = BootstrapConfig {
            samples: 10,
            ..BootstrapConfig::default()
        };
        let result = bootstrap_return_value(
            &[200.0],
            160.0,
            0.1,
            &GpdMaximumLikelihood::default(),
            &config,
        );
        assert_eq!(result, Err(RiskError::BootstrapFailed { attempted: 10 }));
    }

    #[test]
    fn test_empty_values() {
        let result = bootstrap_return_value(
            &[],
            160.0,
            0.1,
            &GpdMaximumLikelihood::default(),
            &BootstrapConfig::default(),
        );
        assert_eq!(result, Err(RiskError::NoExtremes));
    }
}
