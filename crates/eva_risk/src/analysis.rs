//! End-to-end extreme value analysis of a daily series.
//!
//! The pipeline is linear:
//!
//! 1. Peaks-over-threshold extraction with declustering
//! 2. Maximum-likelihood GPD fit to the extremes (location = threshold)
//! 3. Kolmogorov–Smirnov test of the extremes against the fit
//! 4. Return value (VaR) and Expected Shortfall, optionally bootstrapped
//!
//! A threshold above every observation is an expected outcome, not an
//! error: [`AnalysisOutcome::NoExtremes`] is returned and nothing is fitted.

use eva_core::types::DailySeries;
use eva_models::calibration::{GpdFit, GpdMaximumLikelihood, KolmogorovSmirnov, KsTestResult};

use crate::extremes::{
    extract_peaks_over_threshold, window_from_hours, ExtremesSet, MAX_WINDOW_HOURS,
};
use crate::metrics::bootstrap::{bootstrap_return_value, MAX_BOOTSTRAP_SAMPLES};
use crate::metrics::{BootstrapConfig, ReturnValueCalculator, RiskMetrics};
use crate::{AnalysisError, RiskError};

/// Parameters of the analysis.
///
/// Defaults: threshold 160, 24 hour declustering, 95% confidence over
/// weekly return periods.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// POT threshold U; values strictly above it are exceedances
    pub threshold: f64,
    /// Exceedances closer than this to the current cluster peak merge
    pub declustering_window_hours: f64,
    /// Confidence level c for VaR and ES
    pub confidence_level: f64,
    /// Length of one return period in days
    pub return_period_size_days: f64,
    /// Significance level of the KS test
    pub ks_significance: f64,
    /// Bootstrap resamples for the VaR interval; 0 disables it
    pub bootstrap_samples: usize,
    /// Coverage of the bootstrap interval
    pub bootstrap_confidence: f64,
    /// Base seed for bootstrap resampling
    pub bootstrap_seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: 160.0,
            declustering_window_hours: 24.0,
            confidence_level: 0.95,
            return_period_size_days: 7.0,
            ks_significance: 0.05,
            bootstrap_samples: 0,
            bootstrap_confidence: 0.95,
            bootstrap_seed: 42,
        }
    }
}

fn in_unit_interval(value: f64) -> bool {
    value > 0.0 && value < 1.0
}

impl AnalysisConfig {
    /// Checks every parameter and reports all violations together.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let mut errors = Vec::new();

        if !self.threshold.is_finite() {
            errors.push(format!("threshold must be finite, got {}", self.threshold));
        }
        if !(self.declustering_window_hours.is_finite() && self.declustering_window_hours > 0.0) {
            errors.push(format!(
                "declustering_window_hours must be positive, got {}",
                self.declustering_window_hours
            ));
        } else if self.declustering_window_hours > MAX_WINDOW_HOURS {
            errors.push(format!(
                "declustering_window_hours must not exceed {}, got {}",
                MAX_WINDOW_HOURS, self.declustering_window_hours
            ));
        }
        if !in_unit_interval(self.confidence_level) {
            errors.push(format!(
                "confidence_level must lie strictly between 0 and 1, got {}",
                self.confidence_level
            ));
        }
        if !(self.return_period_size_days.is_finite() && self.return_period_size_days > 0.0) {
            errors.push(format!(
                "return_period_size_days must be positive, got {}",
                self.return_period_size_days
            ));
        }
        if !in_unit_interval(self.ks_significance) {
            errors.push(format!(
                "ks_significance must lie strictly between 0 and 1, got {}",
                self.ks_significance
            ));
        }
        if self.bootstrap_samples > MAX_BOOTSTRAP_SAMPLES {
            errors.push(format!(
                "bootstrap_samples {} exceeds maximum allowed ({})",
                self.bootstrap_samples, MAX_BOOTSTRAP_SAMPLES
            ));
        }
        if !in_unit_interval(self.bootstrap_confidence) {
            errors.push(format!(
                "bootstrap_confidence must lie strictly between 0 and 1, got {}",
                self.bootstrap_confidence
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::Config(errors))
        }
    }

    /// Bootstrap settings, or `None` when disabled.
    pub fn bootstrap(&self) -> Option<BootstrapConfig> {
        (self.bootstrap_samples > 0).then_some(BootstrapConfig {
            samples: self.bootstrap_samples,
            confidence: self.bootstrap_confidence,
            seed: self.bootstrap_seed,
        })
    }
}

/// Everything derived from a successful fit.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Parameters the analysis ran with
    pub config: AnalysisConfig,
    /// Declustered extremes
    pub extremes: ExtremesSet,
    /// Fitted GPD and diagnostics
    pub fit: GpdFit,
    /// KS test of the extremes against the fit (informational)
    pub goodness_of_fit: KsTestResult,
    /// VaR and ES, or why they could not be derived
    pub risk: Result<RiskMetrics, RiskError>,
}

impl AnalysisReport {
    /// Risk metrics, with a rejected computation surfaced as an error.
    pub fn risk_metrics(&self) -> Result<&RiskMetrics, AnalysisError> {
        self.risk
            .as_ref()
            .map_err(|e| AnalysisError::Risk(e.clone()))
    }
}

/// Result of running the analysis.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// No value exceeded the threshold; fitting was skipped.
    NoExtremes {
        /// The threshold used
        threshold: f64,
        /// Largest value in the series
        series_max: f64,
    },
    /// Extremes were found and a model fitted.
    Fitted(Box<AnalysisReport>),
}

/// The analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct EvaAnalysis {
    config: AnalysisConfig,
    fitter: GpdMaximumLikelihood,
}

impl EvaAnalysis {
    /// Pipeline with the default fitter.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            fitter: GpdMaximumLikelihood::default(),
        }
    }

    /// Replace the GPD fitter.
    pub fn with_fitter(mut self, fitter: GpdMaximumLikelihood) -> Self {
        self.fitter = fitter;
        self
    }

    /// Parameters of this pipeline.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Declustered extremes of `series` under this configuration.
    pub fn extract(&self, series: &DailySeries) -> Result<ExtremesSet, AnalysisError> {
        self.config.validate()?;
        Ok(extract_peaks_over_threshold(
            series,
            self.config.threshold,
            window_from_hours(self.config.declustering_window_hours),
        ))
    }

    /// Runs the full pipeline on `series`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Config`] for invalid parameters
    /// - [`AnalysisError::Fit`] when the GPD cannot be fitted
    ///
    /// A rejected risk computation does not fail the run; it is kept in
    /// [`AnalysisReport::risk`] so the fit can still be reported.
    pub fn run(&self, series: &DailySeries) -> Result<AnalysisOutcome, AnalysisError> {
        let config = &self.config;
        let extremes = self.extract(series)?;

        tracing::info!(
            threshold = config.threshold,
            window_hours = config.declustering_window_hours,
            count = extremes.len(),
            "Extracted extremes"
        );

        if extremes.is_empty() {
            tracing::warn!(
                threshold = config.threshold,
                series_max = series.max(),
                "No value exceeds the threshold; skipping the fit"
            );
            return Ok(AnalysisOutcome::NoExtremes {
                threshold: config.threshold,
                series_max: series.max(),
            });
        }

        let values = extremes.values();
        let fit = self.fitter.fit(config.threshold, &values)?;
        tracing::info!(
            scale = fit.params().scale,
            shape = fit.params().shape,
            log_likelihood = fit.diagnostics().log_likelihood,
            "Fitted GPD"
        );

        let distribution = fit.params().distribution()?;
        let goodness_of_fit =
            KolmogorovSmirnov::new(config.ks_significance).test(&values, &distribution)?;
        tracing::info!(
            statistic = goodness_of_fit.statistic,
            p_value = goodness_of_fit.p_value,
            "KS test"
        );

        let risk = self.assess_risk(&fit, &extremes, &values);
        match &risk {
            Ok(metrics) => tracing::info!(
                var = metrics.value_at_risk(),
                es = metrics.expected_shortfall,
                "Computed risk metrics"
            ),
            Err(e) => tracing::warn!("Risk computation rejected: {}", e),
        }

        Ok(AnalysisOutcome::Fitted(Box::new(AnalysisReport {
            config: config.clone(),
            extremes,
            fit,
            goodness_of_fit,
            risk,
        })))
    }

    fn assess_risk(
        &self,
        fit: &GpdFit,
        extremes: &ExtremesSet,
        values: &[f64],
    ) -> Result<RiskMetrics, RiskError> {
        let config = &self.config;
        let calculator = ReturnValueCalculator::new(config.return_period_size_days);
        let mut metrics = RiskMetrics::compute(
            &calculator,
            fit.params(),
            extremes.len(),
            extremes.span_days(),
            config.confidence_level,
        )?;

        if let Some(bootstrap) = config.bootstrap() {
            match bootstrap_return_value(
                values,
                config.threshold,
                metrics.return_value.exceedance_probability,
                &self.fitter,
                &bootstrap,
            ) {
                Ok(interval) => metrics.confidence_interval = Some(interval),
                Err(e) => tracing::warn!("Bootstrap interval unavailable: {}", e),
            }
        }

        Ok(metrics)
    }
}
