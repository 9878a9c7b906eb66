//! JSON summary of a run.

use eva_core::math::stats::DescriptiveStats;
use eva_core::types::{DailySeries, Date};
use eva_models::calibration::{GpdFit, KsTestResult};
use eva_models::distributions::TailKind;
use eva_risk::analysis::{AnalysisConfig, AnalysisOutcome};
use eva_risk::extremes::{Extreme, ExtremesSet};
use eva_risk::metrics::RiskMetrics;
use serde::Serialize;

/// Span and total of the gap-filled series.
#[derive(Debug, Serialize)]
pub struct SeriesSummary {
    /// First day
    pub start: Date,
    /// Last day
    pub end: Date,
    /// Number of days after gap filling
    pub days: usize,
    /// Sum of all counts
    pub total: f64,
}

/// Analysis result, tagged by `status`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JsonOutcome<'a> {
    /// Nothing exceeded the threshold.
    NoExtremes {
        /// Threshold used
        threshold: f64,
        /// Largest daily value
        series_max: f64,
    },
    /// A model was fitted.
    Fitted {
        /// Declustered extremes
        extremes: &'a [Extreme],
        /// GPD parameters and diagnostics
        fit: &'a GpdFit,
        /// Tail classification of the shape
        tail: TailKind,
        /// KS test
        goodness_of_fit: &'a KsTestResult,
        /// KS verdict
        follows_distribution: bool,
        /// VaR and ES when they could be derived
        risk: Option<&'a RiskMetrics>,
        /// Why VaR and ES are missing
        risk_error: Option<String>,
    },
    /// Extremes were found but no model could be fitted to them.
    FitFailed {
        /// Declustered extremes
        extremes: &'a [Extreme],
        /// Fitting error
        error: String,
    },
}

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Input series
    pub series: SeriesSummary,
    /// Descriptive statistics of the daily values
    pub statistics: Option<DescriptiveStats>,
    /// Effective analysis parameters
    pub config: &'a AnalysisConfig,
    /// What the analysis produced
    pub outcome: JsonOutcome<'a>,
}

impl<'a> JsonReport<'a> {
    /// Assembles the document from a finished run.
    pub fn new(
        series: &DailySeries,
        statistics: Option<DescriptiveStats>,
        config: &'a AnalysisConfig,
        outcome: &'a AnalysisOutcome,
    ) -> Self {
        let outcome = match outcome {
            AnalysisOutcome::NoExtremes {
                threshold,
                series_max,
            } => JsonOutcome::NoExtremes {
                threshold: *threshold,
                series_max: *series_max,
            },
            AnalysisOutcome::Fitted(report) => JsonOutcome::Fitted {
                extremes: report.extremes.extremes(),
                fit: &report.fit,
                tail: report.fit.params().tail_kind(),
                goodness_of_fit: &report.goodness_of_fit,
                follows_distribution: report.goodness_of_fit.follows_distribution(),
                risk: report.risk.as_ref().ok(),
                risk_error: report.risk.as_ref().err().map(|e| e.to_string()),
            },
        };
        Self::assemble(series, statistics, config, outcome)
    }

    /// Document for a run whose extremes could not be fitted.
    pub fn fit_failed(
        series: &DailySeries,
        statistics: Option<DescriptiveStats>,
        config: &'a AnalysisConfig,
        extremes: &'a ExtremesSet,
        error: &dyn std::fmt::Display,
    ) -> Self {
        let outcome = JsonOutcome::FitFailed {
            extremes: extremes.extremes(),
            error: error.to_string(),
        };
        Self::assemble(series, statistics, config, outcome)
    }

    fn assemble(
        series: &DailySeries,
        statistics: Option<DescriptiveStats>,
        config: &'a AnalysisConfig,
        outcome: JsonOutcome<'a>,
    ) -> Self {
        Self {
            series: SeriesSummary {
                start: series.start(),
                end: series.end(),
                days: series.len(),
                total: series.total(),
            },
            statistics,
            config,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eva_risk::analysis::EvaAnalysis;

    fn series() -> DailySeries {
        let mut values = vec![1.0; 1000];
        for (i, day) in [10, 250, 253, 600, 998].into_iter().enumerate() {
            values[day] = 180.0 + 10.0 * i as f64;
        }
        DailySeries::from_values(Date::from_ymd(2021, 6, 1).unwrap(), values).unwrap()
    }

    #[test]
    fn test_fitted_document_shape() {
        let series = series();
        let config = AnalysisConfig {
            confidence_level: 0.99,
            ..AnalysisConfig::default()
        };
        let outcome = EvaAnalysis::new(config.clone()).run(&series).unwrap();
        let stats = DescriptiveStats::from_values(series.values());
        let value = serde_json::to_value(JsonReport::new(&series, stats, &config, &outcome)).unwrap();

        assert_eq!(value["series"]["days"], 1000);
        assert_eq!(value["series"]["start"], "2021-06-01");
        assert_eq!(value["outcome"]["status"], "fitted");
        assert_eq!(value["outcome"]["extremes"].as_array().unwrap().len(), 5);
        assert_eq!(value["outcome"]["fit"]["parameters"]["location"], 160.0);
        assert!(value["outcome"]["risk"]["expected_shortfall"].is_number());
        assert!(value["outcome"]["risk_error"].is_null());
        assert_eq!(value["config"]["threshold"], 160.0);
    }

    #[test]
    fn test_fit_failed_document() {
        let mut values = vec![1.0; 50];
        values[20] = 260.0;
        let series = DailySeries::from_values(Date::from_ymd(2021, 6, 1).unwrap(), values).unwrap();
        let config = AnalysisConfig::default();
        let analysis = EvaAnalysis::new(config.clone());
        let extremes = analysis.extract(&series).unwrap();
        let Err(eva_risk::AnalysisError::Fit(err)) = analysis.run(&series) else {
            panic!("a single extreme cannot be fitted");
        };

        let stats = DescriptiveStats::from_values(series.values());
        let report = JsonReport::fit_failed(&series, stats, &config, &extremes, &err);
        let value = serde_json::to_value(report).unwrap();

        assert_eq!(value["outcome"]["status"], "fit_failed");
        assert_eq!(value["outcome"]["extremes"].as_array().unwrap().len(), 1);
        assert!(value["outcome"]["error"].as_str().unwrap().contains("Insufficient data"));
        assert_eq!(value["statistics"]["max"], 260.0);
        assert_eq!(value["series"]["days"], 50);
    }

    #[test]
    fn test_no_extremes_document() {
        let series = series();
        let config = AnalysisConfig::default();
        let outcome = AnalysisOutcome::NoExtremes {
            threshold: 500.0,
            series_max: 220.0,
        };
        let value = serde_json::to_value(JsonReport::new(&series, None, &config, &outcome)).unwrap();

        assert_eq!(value["outcome"]["status"], "no_extremes");
        assert_eq!(value["outcome"]["series_max"], 220.0);
        assert!(value["statistics"].is_null());
    }
}
