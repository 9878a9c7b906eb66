//! Analyse command implementation
//!
//! Runs the full pipeline: load, gap fill, extract extremes, fit the GPD,
//! test the fit, derive VaR and ES, then report and plot.

use std::path::PathBuf;

use clap::Args;
use eva_core::math::stats::DescriptiveStats;
use eva_core::types::DailySeries;
use eva_models::calibration::CalibrationError;
use eva_risk::analysis::{AnalysisOutcome, EvaAnalysis};
use eva_risk::extremes::ExtremesSet;
use eva_risk::AnalysisError;
use tracing::info;

use super::{load_series, InputArgs, PotArgs};
use crate::config::{EvaConfig, OutputFormat};
use crate::report::{json::JsonReport, plots, text};
use crate::Result;

/// Arguments of `eva analyse`.
#[derive(Args, Debug, Clone)]
pub struct AnalyseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub pot: PotArgs,

    /// Confidence level for VaR and ES, strictly between 0 and 1
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Length of one return period in days
    #[arg(long)]
    pub return_period_days: Option<f64>,

    /// Bootstrap resamples for a VaR confidence interval (0 disables)
    #[arg(short, long)]
    pub bootstrap: Option<usize>,

    /// Directory for the SVG plots
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip writing plots
    #[arg(long)]
    pub no_plots: bool,
}

impl AnalyseArgs {
    fn apply(&self, config: &mut EvaConfig) {
        self.pot.apply(&mut config.analysis);
        if let Some(confidence) = self.confidence {
            config.analysis.confidence_level = confidence;
        }
        if let Some(days) = self.return_period_days {
            config.analysis.return_period_size_days = days;
        }
        if let Some(samples) = self.bootstrap {
            config.analysis.bootstrap_samples = samples;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.no_plots {
            config.output.plots = false;
        }
    }
}

/// Run the analyse command
pub fn run(mut config: EvaConfig, args: &AnalyseArgs) -> Result<()> {
    args.apply(&mut config);
    config.validate()?;

    info!(
        input = %args.input.input.display(),
        threshold = config.analysis.threshold,
        confidence = config.analysis.confidence_level,
        "Starting analysis"
    );

    let series = load_series(&args.input.input, &config.input)?;
    let stats = DescriptiveStats::from_values(series.values());
    let analysis = EvaAnalysis::new(config.analysis.clone());
    let outcome = match analysis.run(&series) {
        Ok(outcome) => outcome,
        Err(AnalysisError::Fit(err)) => {
            report_fit_failure(&config, &series, stats, &analysis.extract(&series)?, &err)?;
            return Err(AnalysisError::Fit(err).into());
        }
        Err(err) => return Err(err.into()),
    };

    match config.output.format {
        OutputFormat::Text => print!("{}", text::full_report(&series, stats.as_ref(), &outcome)),
        OutputFormat::Json => {
            let report = JsonReport::new(&series, stats, &config.analysis, &outcome);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if config.output.plots {
        let written = plots::write_plots(&config.output.dir, &series, &outcome);
        info!(
            count = written.len(),
            dir = %config.output.dir.display(),
            "Plots written"
        );
    }

    if let AnalysisOutcome::Fitted(report) = &outcome {
        if let Err(err) = &report.risk {
            return Err(AnalysisError::Risk(err.clone()).into());
        }
    }

    info!("Analysis complete");
    Ok(())
}

/// Prints the series and its statistics, and plots it, when no model could be fitted.
fn report_fit_failure(
    config: &EvaConfig,
    series: &DailySeries,
    stats: Option<DescriptiveStats>,
    extremes: &ExtremesSet,
    error: &CalibrationError,
) -> Result<()> {
    match config.output.format {
        OutputFormat::Text => {
            print!("{}", text::fit_failure(series, stats.as_ref(), extremes, error));
        }
        OutputFormat::Json => {
            let report = JsonReport::fit_failed(series, stats, &config.analysis, extremes, error);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    if config.output.plots {
        plots::write_timeseries(&config.output.dir, series, extremes);
    }
    Ok(())
}
