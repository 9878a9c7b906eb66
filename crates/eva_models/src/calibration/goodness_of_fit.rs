//! Kolmogorov–Smirnov goodness-of-fit test.
//!
//! The statistic is
//!
//! `D = max_i max(i/n − F(x_(i)), F(x_(i)) − (i − 1)/n)`
//!
//! over the sorted sample `x_(1) ≤ … ≤ x_(n)`. The p-value and the critical
//! value come from the limiting Kolmogorov distribution with Stephens'
//! small-sample scale `√n + 0.12 + 0.11/√n`. This approximates the exact
//! finite-n distribution of D rather than computing it: critical values
//! agree with the exact tables to about 0.002 down to n = 5 (0.3914 against
//! 0.391 at n = 11, α = 0.05), and p-values near the decision boundary can
//! differ from an exact test in the second digit. The result is
//! informational: callers report it and carry on either way.

use eva_core::math::stats::sorted_copy;

use super::CalibrationError;
use crate::distributions::kolmogorov::{kolmogorov_isf, kolmogorov_sf, stephens_factor};
use crate::distributions::GeneralizedPareto;

/// Outcome of a KS test.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KsTestResult {
    /// Sample size
    pub n: usize,
    /// KS statistic D
    pub statistic: f64,
    /// Probability of a statistic at least this large under the null
    pub p_value: f64,
    /// Significance level α
    pub significance: f64,
    /// Largest D accepted at level α
    pub critical_value: f64,
}

impl KsTestResult {
    /// True when `D ≤ critical value`: the data is consistent with the law.
    pub fn follows_distribution(&self) -> bool {
        self.statistic <= self.critical_value
    }
}

/// KS test at a fixed significance level.
///
/// # Examples
///
/// ```
/// use eva_models::calibration::KolmogorovSmirnov;
/// use eva_models::distributions::GeneralizedPareto;
///
/// let gpd = GeneralizedPareto::new(0.0, 1.0, 0.0).unwrap();
/// // Mid-quantiles of the law itself fit perfectly
/// let sample: Vec<f64> = (0..50).map(|i| gpd.ppf((i as f64 + 0.5) / 50.0)).collect();
///
/// let result = KolmogorovSmirnov::new(0.05).test(&sample, &gpd).unwrap();
/// assert!(result.follows_distribution());
/// assert!((result.statistic - 0.01).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KolmogorovSmirnov {
    significance: f64,
}

impl Default for KolmogorovSmirnov {
    fn default() -> Self {
        Self { significance: 0.05 }
    }
}

impl KolmogorovSmirnov {
    /// Create a test at significance level `significance` (expected in (0, 1)).
    pub fn new(significance: f64) -> Self {
        Self { significance }
    }

    /// Significance level α.
    pub fn significance(&self) -> f64 {
        self.significance
    }

    /// Tests `sample` against a fitted GPD.
    pub fn test(
        &self,
        sample: &[f64],
        distribution: &GeneralizedPareto<f64>,
    ) -> Result<KsTestResult, CalibrationError> {
        self.test_cdf(sample, |x| distribution.cdf(x))
    }

    /// Tests `sample` against an arbitrary continuous CDF.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` when the significance is not in (0, 1)
    /// - `InsufficientData` for an empty sample
    /// - `InvalidData` for non-finite values
    /// - `Solver` if the critical value cannot be bracketed
    pub fn test_cdf<F>(&self, sample: &[f64], cdf: F) -> Result<KsTestResult, CalibrationError>
    where
        F: Fn(f64) -> f64,
    {
        if !(self.significance > 0.0 && self.significance < 1.0) {
            return Err(CalibrationError::invalid_parameter(
                "significance",
                self.significance,
            ));
        }
        if sample.is_empty() {
            return Err(CalibrationError::insufficient_data(1, 0));
        }
        if sample.iter().any(|x| !x.is_finite()) {
            return Err(CalibrationError::invalid_data(
                "KS sample contains non-finite values",
            ));
        }

        let sorted = sorted_copy(sample);
        let n = sorted.len();
        let nf = n as f64;

        let statistic = sorted
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let f = cdf(x);
                let above = (i as f64 + 1.0) / nf - f;
                let below = f - i as f64 / nf;
                above.max(below)
            })
            .fold(0.0_f64, f64::max);

        let factor = stephens_factor(n);
        let p_value = kolmogorov_sf(factor * statistic);
        let critical_value = kolmogorov_isf(self.significance)? / factor;

        Ok(KsTestResult {
            n,
            statistic,
            p_value,
            significance: self.significance,
            critical_value,
        })
    }
}
