//! Plain-text console report.

use eva_core::math::stats::DescriptiveStats;
use eva_core::types::DailySeries;
use eva_risk::analysis::{AnalysisOutcome, AnalysisReport};
use eva_risk::extremes::ExtremesSet;

/// Rows shown at each end of the series preview.
pub const PREVIEW_ROWS: usize = 5;

/// Full report: preview, statistics and the analysis outcome.
pub fn full_report(
    series: &DailySeries,
    stats: Option<&DescriptiveStats>,
    outcome: &AnalysisOutcome,
) -> String {
    let mut out = series_preview(series, PREVIEW_ROWS);
    out.push('\n');
    if let Some(stats) = stats {
        out.push_str(&statistics(stats));
        out.push('\n');
    }
    match outcome {
        AnalysisOutcome::NoExtremes {
            threshold,
            series_max,
        } => out.push_str(&no_extremes(*threshold, *series_max)),
        AnalysisOutcome::Fitted(report) => out.push_str(&analysis(report)),
    }
    out
}

/// Report for a run whose extremes could not be fitted.
///
/// The series, its statistics and the extremes are still shown; `error`
/// (the fitting error itself) closes the report.
pub fn fit_failure(
    series: &DailySeries,
    stats: Option<&DescriptiveStats>,
    extremes: &ExtremesSet,
    error: &dyn std::fmt::Display,
) -> String {
    let mut out = series_preview(series, PREVIEW_ROWS);
    out.push('\n');
    if let Some(stats) = stats {
        out.push_str(&statistics(stats));
        out.push('\n');
    }
    out.push_str(&extremes_table(extremes, series.max()));
    out.push('\n');
    out.push_str(&format!("GPD fit failed: {}\n", error));
    out
}

/// First and last `rows` days of the gap-filled series.
pub fn series_preview(series: &DailySeries, rows: usize) -> String {
    let mut out = format!(
        "Daily series: {} days from {} to {}\n",
        series.len(),
        series.start(),
        series.end()
    );
    out.push_str(&format!("{:<12} {:>10}\n", "Date", "Fatalities"));

    let days: Vec<_> = series.iter().collect();
    if days.len() <= 2 * rows {
        for (date, value) in &days {
            out.push_str(&format!("{:<12} {:>10}\n", date.to_string(), value));
        }
    } else {
        for (date, value) in &days[..rows] {
            out.push_str(&format!("{:<12} {:>10}\n", date.to_string(), value));
        }
        out.push_str(&format!("{:<12} {:>10}\n", "...", "..."));
        for (date, value) in &days[days.len() - rows..] {
            out.push_str(&format!("{:<12} {:>10}\n", date.to_string(), value));
        }
    }
    out
}

/// Summary statistics laid out one per line.
pub fn statistics(stats: &DescriptiveStats) -> String {
    let rows = [
        ("count", stats.count as f64),
        ("mean", stats.mean),
        ("std", stats.std),
        ("min", stats.min),
        ("25%", stats.q25),
        ("50%", stats.median),
        ("75%", stats.q75),
        ("max", stats.max),
    ];
    let mut out = String::from("Descriptive statistics\n");
    for (name, value) in rows {
        out.push_str(&format!("  {:<6} {:>12.4}\n", name, value));
    }
    out
}

/// Table of declustered extremes.
pub fn extremes_table(set: &ExtremesSet, series_max: f64) -> String {
    if set.is_empty() {
        return no_extremes(set.threshold(), series_max);
    }

    let mut out = format!(
        "{} extremes above {} ({} h declustering)\n",
        set.len(),
        set.threshold(),
        set.window().num_hours()
    );
    out.push_str(&format!("{:<12} {:>10} {:>10}\n", "Date", "Value", "Excess"));
    for extreme in set.extremes() {
        out.push_str(&format!(
            "{:<12} {:>10} {:>10}\n",
            extreme.date.to_string(),
            extreme.value,
            extreme.value - set.threshold()
        ));
    }
    out
}

/// Message for a threshold nothing exceeds.
pub fn no_extremes(threshold: f64, series_max: f64) -> String {
    format!(
        "No value exceeds the threshold {} (series maximum {}); nothing to fit.\n",
        threshold, series_max
    )
}

/// Fit, goodness of fit and risk metrics.
pub fn analysis(report: &AnalysisReport) -> String {
    let params = report.fit.params();
    let diag = report.fit.diagnostics();
    let ks = &report.goodness_of_fit;

    let mut out = format!(
        "Extremes: {} events above {} over {} days\n\n",
        report.extremes.len(),
        report.extremes.threshold(),
        report.extremes.span_days()
    );

    out.push_str(&format!("GPD fit (location = {})\n", params.location));
    out.push_str(&format!("  scale   = {:.4}\n", params.scale));
    out.push_str(&format!(
        "  shape   = {:.4}  {}\n",
        params.shape,
        params.tail_kind().description()
    ));
    out.push_str(&format!(
        "  log-likelihood = {:.4}, AIC = {:.4}\n\n",
        diag.log_likelihood, diag.aic
    ));

    out.push_str("Kolmogorov-Smirnov test\n");
    out.push_str(&format!(
        "  D = {:.4}, p-value = {:.4}, critical value at {} = {:.4}\n",
        ks.statistic, ks.p_value, ks.significance, ks.critical_value
    ));
    out.push_str(if ks.follows_distribution() {
        "  The extremes are consistent with the fitted GPD\n\n"
    } else {
        "  The extremes do not follow the fitted GPD\n\n"
    });

    match &report.risk {
        Ok(metrics) => {
            let rv = &metrics.return_value;
            out.push_str(&format!(
                "Risk metrics at confidence {} (return period {:.2} x {} days)\n",
                metrics.confidence_level, rv.return_period, rv.period_size_days
            ));
            out.push_str(&format!(
                "  extremes per period = {:.4}, exceedance probability = {:.4}\n",
                rv.extremes_rate, rv.exceedance_probability
            ));
            out.push_str(&format!("  VaR = {:.4}\n", metrics.value_at_risk()));
            out.push_str(&format!("  ES  = {:.4}\n", metrics.expected_shortfall));
            if let Some(ci) = &metrics.confidence_interval {
                out.push_str(&format!(
                    "  VaR {} interval = [{:.4}, {:.4}] ({} resamples, {} failed)\n",
                    ci.confidence, ci.lower, ci.upper, ci.samples_used, ci.samples_failed
                ));
            }
        }
        Err(err) => out.push_str(&format!("Risk metrics unavailable: {}\n", err)),
    }
    out
}
