//! SVG plots of the daily series and the fitted model.
//!
//! Two files are produced: `timeseries.svg` (daily counts, threshold and
//! the declustered extremes) and `diagnostics.svg` (return-value plot,
//! density against histogram, Q-Q and P-P panels). Plots are plain SVG
//! strings; failing to write one is logged and otherwise ignored.

use std::path::{Path, PathBuf};

use eva_core::math::grid::{geomspace, linspace};
use eva_core::math::stats::sorted_copy;
use eva_core::types::DailySeries;
use eva_models::distributions::GeneralizedPareto;
use eva_risk::analysis::{AnalysisOutcome, AnalysisReport};
use eva_risk::extremes::{Extreme, ExtremesSet};
use eva_risk::metrics::ReturnValueCalculator;

/// File name of the time-series plot.
pub const TIMESERIES_FILE: &str = "timeseries.svg";
/// File name of the diagnostics plot.
pub const DIAGNOSTICS_FILE: &str = "diagnostics.svg";

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 360.0;
const PADDING: f64 = 52.0;
const SERIES_COLOR: &str = "#348dc1";
const EXTREME_COLOR: &str = "#d62728";
const MODEL_COLOR: &str = "#ff9933";
const ACCENT_COLOR: &str = "#8c8c8c";
const CURVE_POINTS: usize = 120;

/// Writes every plot that applies to `outcome` into `dir`.
///
/// Returns the paths actually written.
pub fn write_plots(dir: &Path, series: &DailySeries, outcome: &AnalysisOutcome) -> Vec<PathBuf> {
    let plots = match outcome {
        AnalysisOutcome::NoExtremes { threshold, .. } => {
            vec![(TIMESERIES_FILE, timeseries_svg(series, *threshold, &[]))]
        }
        AnalysisOutcome::Fitted(report) => vec![
            (
                TIMESERIES_FILE,
                timeseries_svg(series, report.extremes.threshold(), report.extremes.extremes()),
            ),
            (DIAGNOSTICS_FILE, diagnostics_svg(report)),
        ],
    };
    write_svgs(dir, plots)
}

/// Writes only the time-series plot, for runs where no model could be fitted.
pub fn write_timeseries(dir: &Path, series: &DailySeries, extremes: &ExtremesSet) -> Vec<PathBuf> {
    let svg = timeseries_svg(series, extremes.threshold(), extremes.extremes());
    write_svgs(dir, vec![(TIMESERIES_FILE, svg)])
}

fn write_svgs(dir: &Path, plots: Vec<(&str, String)>) -> Vec<PathBuf> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "Cannot create plot directory");
        return Vec::new();
    }

    let mut written = Vec::new();
    for (name, svg) in plots {
        let path = dir.join(name);
        match std::fs::write(&path, svg) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Plot written");
                written.push(path);
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to write plot"),
        }
    }
    written
}

/// Daily counts with the threshold and the extremes marked.
pub fn timeseries_svg(series: &DailySeries, threshold: f64, extremes: &[Extreme]) -> String {
    let mut svg = svg_header(WIDTH, HEIGHT);

    let points: Vec<(f64, f64)> = series
        .values()
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();
    let y_values = points.iter().map(|p| p.1).chain([0.0, threshold]);
    let x_axis = Axis::linear((0..series.len()).map(|i| i as f64));

    if let (Some(x), Some(y)) = (x_axis, Axis::linear(y_values)) {
        let frame = Frame::new(0.0, 0.0, WIDTH, HEIGHT, x, y);
        let start = series.start();
        frame.draw_axes(
            &mut svg,
            "Daily fatalities",
            "Date",
            "Fatalities",
            |t| start.add_days(t.round() as i64).to_string(),
        );
        frame.polyline(&mut svg, &points, SERIES_COLOR, false);
        frame.hline(&mut svg, threshold, EXTREME_COLOR, &format!("threshold {}", format_tick(threshold)));

        let marks: Vec<(f64, f64)> = extremes
            .iter()
            .map(|e| ((e.date - start) as f64, e.value))
            .collect();
        frame.markers(&mut svg, &marks, EXTREME_COLOR);
    }

    svg.push_str(svg_footer());
    svg
}

/// Four diagnostic panels for a fitted model.
pub fn diagnostics_svg(report: &AnalysisReport) -> String {
    let width = WIDTH;
    let height = 2.0 * HEIGHT;
    let mut svg = svg_header(width, height);

    let sorted = sorted_copy(&report.extremes.values());
    let gpd = report.fit.params().distribution().ok();
    let half_w = width / 2.0;

    match gpd {
        Some(gpd) => {
            return_value_panel(&mut svg, report, &sorted, (0.0, 0.0, half_w, HEIGHT));
            density_panel(&mut svg, &gpd, &sorted, (half_w, 0.0, half_w, HEIGHT));
            qq_panel(&mut svg, &gpd, &sorted, (0.0, HEIGHT, half_w, HEIGHT));
            pp_panel(&mut svg, &gpd, &sorted, (half_w, HEIGHT, half_w, HEIGHT));
        }
        None => svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">Fitted parameters are not a valid GPD</text>"#,
            x = width / 2.0,
            y = height / 2.0
        )),
    }

    svg.push_str(svg_footer());
    svg
}

type Rect = (f64, f64, f64, f64);

fn return_value_panel(svg: &mut String, report: &AnalysisReport, sorted: &[f64], rect: Rect) {
    let calculator = ReturnValueCalculator::new(report.config.return_period_size_days);
    let n = sorted.len();
    let Ok(rate) = calculator.extremes_rate(n, report.extremes.span_days()) else {
        panel_message(svg, rect, "Return values unavailable: series spans no time");
        return;
    };
    let params = report.fit.params();

    // p = 1 at T = 1/rate, where the return level equals the threshold
    let periods = geomspace(1.0 / rate, 1000.0 / rate, CURVE_POINTS);
    let curve: Vec<(f64, f64)> = periods
        .iter()
        .filter_map(|&t| {
            ReturnValueCalculator::return_value(params, 1.0 / (t * rate))
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| (t, v))
        })
        .collect();

    let empirical: Vec<(f64, f64)> = sorted
        .iter()
        .rev()
        .enumerate()
        .map(|(k, &v)| ((n + 1) as f64 / ((k + 1) as f64 * rate), v))
        .collect();

    let x = Axis::log(periods.iter().copied().chain(empirical.iter().map(|p| p.0)));
    let y = Axis::linear(curve.iter().chain(&empirical).map(|p| p.1));
    let (Some(x), Some(y)) = (x, y) else {
        panel_message(svg, rect, "Return values unavailable");
        return;
    };

    let frame = Frame::new(rect.0, rect.1, rect.2, rect.3, x, y);
    let x_label = format!("Return period (x {} days)", format_tick(calculator.period_size_days()));
    frame.draw_axes(svg, "Return values", &x_label, "Return level", format_tick);
    frame.polyline(svg, &curve, MODEL_COLOR, false);
    frame.markers(svg, &empirical, SERIES_COLOR);
}

fn density_panel(svg: &mut String, gpd: &GeneralizedPareto<f64>, sorted: &[f64], rect: Rect) {
    let n = sorted.len();
    let lo = gpd.location();
    let hi = sorted.last().copied().unwrap_or(lo).max(lo);
    let bins = ((n as f64).sqrt().ceil() as usize).max(1);
    let bin_width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };

    let mut counts = vec![0usize; bins];
    for &v in sorted {
        let idx = (((v - lo) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let heights: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 / (n as f64 * bin_width))
        .collect();

    let curve: Vec<(f64, f64)> = linspace(lo, lo + bins as f64 * bin_width, CURVE_POINTS)
        .into_iter()
        .map(|x| (x, gpd.pdf(x)))
        .filter(|p| p.1.is_finite())
        .collect();

    let x = Axis::linear([lo, lo + bins as f64 * bin_width].into_iter());
    let y = Axis::linear(heights.iter().copied().chain(curve.iter().map(|p| p.1)).chain([0.0]));
    let (Some(x), Some(y)) = (x, y) else {
        panel_message(svg, rect, "Density unavailable");
        return;
    };

    let frame = Frame::new(rect.0, rect.1, rect.2, rect.3, x, y);
    frame.draw_axes(svg, "Probability density", "Fatalities", "Density", format_tick);
    frame.bars(svg, lo, bin_width, &heights, SERIES_COLOR);
    frame.polyline(svg, &curve, MODEL_COLOR, false);
}

fn qq_panel(svg: &mut String, gpd: &GeneralizedPareto<f64>, sorted: &[f64], rect: Rect) {
    let n = sorted.len() as f64;
    let points: Vec<(f64, f64)> = sorted
        .iter()
        .enumerate()
        .map(|(i, &v)| (gpd.ppf((i + 1) as f64 / (n + 1.0)), v))
        .filter(|p| p.0.is_finite())
        .collect();

    let all = points.iter().flat_map(|p| [p.0, p.1]);
    let Some(axis) = Axis::linear(all) else {
        panel_message(svg, rect, "Q-Q plot unavailable");
        return;
    };

    let frame = Frame::new(rect.0, rect.1, rect.2, rect.3, axis, axis);
    frame.draw_axes(svg, "Q-Q plot", "Model quantiles", "Empirical quantiles", format_tick);
    frame.polyline(svg, &[(axis.min, axis.min), (axis.max, axis.max)], ACCENT_COLOR, true);
    frame.markers(svg, &points, SERIES_COLOR);
}

fn pp_panel(svg: &mut String, gpd: &GeneralizedPareto<f64>, sorted: &[f64], rect: Rect) {
    let n = sorted.len() as f64;
    let points: Vec<(f64, f64)> = sorted
        .iter()
        .enumerate()
        .map(|(i, &v)| (gpd.cdf(v), (i + 1) as f64 / (n + 1.0)))
        .collect();

    let unit = Axis {
        min: 0.0,
        max: 1.0,
        log: false,
    };
    let frame = Frame::new(rect.0, rect.1, rect.2, rect.3, unit, unit);
    frame.draw_axes(svg, "P-P plot", "Model probability", "Empirical probability", format_tick);
    frame.polyline(svg, &[(0.0, 0.0), (1.0, 1.0)], ACCENT_COLOR, true);
    frame.markers(svg, &points, SERIES_COLOR);
}

fn panel_message(svg: &mut String, rect: Rect, message: &str) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{message}</text>"#,
        x = rect.0 + rect.2 / 2.0,
        y = rect.1 + rect.3 / 2.0,
    ));
}

/// Value range of one plot axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Axis {
    min: f64,
    max: f64,
    log: bool,
}

impl Axis {
    fn linear(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (min, max) = extent(values.filter(|v| v.is_finite()))?;
        Some(Self {
            min,
            max,
            log: false,
        })
    }

    fn log(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (min, max) = extent(values.filter(|v| v.is_finite() && *v > 0.0))?;
        let (min, max) = if min == max {
            (min / 10.0, max * 10.0)
        } else {
            (min, max)
        };
        Some(Self {
            min,
            max,
            log: true,
        })
    }

    fn fraction(&self, v: f64) -> f64 {
        if self.log {
            (v.ln() - self.min.ln()) / (self.max.ln() - self.min.ln())
        } else {
            (v - self.min) / (self.max - self.min)
        }
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        if self.log {
            geomspace(self.min, self.max, count)
        } else {
            linspace(self.min, self.max, count)
        }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if min == max {
        let adjust = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        return Some((min - adjust, max + adjust));
    }
    Some((min, max))
}

/// A plotting area mapping data coordinates to SVG coordinates.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x: Axis,
    y: Axis,
}

impl Frame {
    fn new(x0: f64, y0: f64, w: f64, h: f64, x: Axis, y: Axis) -> Self {
        Self {
            left: x0 + PADDING,
            top: y0 + PADDING / 2.0,
            width: w - 1.5 * PADDING,
            height: h - 1.5 * PADDING,
            x,
            y,
        }
    }

    fn px(&self, v: f64) -> f64 {
        self.left + self.x.fraction(v) * self.width
    }

    fn py(&self, v: f64) -> f64 {
        self.top + (1.0 - self.y.fraction(v)) * self.height
    }

    fn inside(&self, (x, y): (f64, f64)) -> bool {
        x.is_finite() && y.is_finite() && (!self.x.log || x > 0.0) && (!self.y.log || y > 0.0)
    }

    fn draw_axes(
        &self,
        svg: &mut String,
        title: &str,
        x_label: &str,
        y_label: &str,
        x_tick: impl Fn(f64) -> String,
    ) {
        let bottom = self.top + self.height;
        svg.push_str(&format!(
            r##"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="none" stroke="#000" stroke-width="1" />"##,
            x = self.left,
            y = self.top,
            w = self.width,
            h = self.height
        ));
        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="12" fill="#333">{title}</text>"##,
            x = self.left + self.width / 2.0,
            y = self.top - 8.0,
        ));

        for t in self.x.ticks(5) {
            let x = self.px(t);
            svg.push_str(&format!(
                r##"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="#dddddd" stroke-width="0.5" />"##,
                y1 = self.top,
                y2 = bottom
            ));
            svg.push_str(&format!(
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
                y = bottom + 14.0,
                label = x_tick(t)
            ));
        }
        for t in self.y.ticks(5) {
            let y = self.py(t);
            svg.push_str(&format!(
                r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#dddddd" stroke-width="0.5" />"##,
                x1 = self.left,
                x2 = self.left + self.width
            ));
            svg.push_str(&format!(
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
                x = self.left - 4.0,
                y = y + 3.0,
                label = format_tick(t)
            ));
        }

        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{x_label}</text>"#,
            x = self.left + self.width / 2.0,
            y = bottom + 28.0,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" transform="rotate(-90 {x:.2} {y:.2})">{y_label}</text>"#,
            x = self.left - 40.0,
            y = self.top + self.height / 2.0,
        ));
    }

    fn polyline(&self, svg: &mut String, points: &[(f64, f64)], color: &str, dash: bool) {
        let coords = points
            .iter()
            .filter(|p| self.inside(**p))
            .map(|&(x, y)| format!("{:.2},{:.2}", self.px(x), self.py(y)))
            .collect::<Vec<_>>();
        if coords.is_empty() {
            return;
        }
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{color}" stroke-width="1.2" stroke-dasharray="{dash}" points="{points}" />"#,
            dash = if dash { "4 3" } else { "0" },
            points = coords.join(" ")
        ));
    }

    fn markers(&self, svg: &mut String, points: &[(f64, f64)], color: &str) {
        for &p in points.iter().filter(|p| self.inside(**p)) {
            svg.push_str(&format!(
                r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="3" fill="{color}" />"#,
                cx = self.px(p.0),
                cy = self.py(p.1),
            ));
        }
    }

    fn hline(&self, svg: &mut String, value: f64, color: &str, label: &str) {
        let y = self.py(value);
        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="1" stroke-dasharray="4 3" />"#,
            x1 = self.left,
            x2 = self.left + self.width,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end" fill="{color}" font-size="9">{label}</text>"#,
            x = self.left + self.width,
            y = y - 4.0,
        ));
    }

    fn bars(&self, svg: &mut String, start: f64, bin_width: f64, heights: &[f64], color: &str) {
        let base = self.py(self.y.min.max(0.0));
        for (i, &h) in heights.iter().enumerate() {
            let x0 = self.px(start + i as f64 * bin_width);
            let x1 = self.px(start + (i + 1) as f64 * bin_width);
            let top = self.py(h);
            svg.push_str(&format!(
                r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{color}" fill-opacity="0.5" />"#,
                x = x0,
                y = top,
                w = (x1 - x0).max(0.0),
                h = (base - top).max(0.0),
            ));
        }
    }
}

fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e5 || (abs > 0.0 && abs < 1e-3) {
        format!("{:.1e}", value)
    } else if abs >= 100.0 {
        format!("{:.0}", value)
    } else if abs >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn svg_header(width: f64, height: f64) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style><rect width="100%" height="100%" fill="white" />"#,
        w = width,
        h = height
    )
}

fn svg_footer() -> &'static str {
    "</svg>"
}
