//! SVG chart rendering.
//!
//! Each render call receives all of its data as arguments, draws into its own
//! [`SvgCanvas`] and writes exactly one file. There is no shared figure state.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use meshq_core::{Point3, Strategy, AXES};

use crate::error::IoError;

/// Scatter panels draw at most this many points per cloud.
pub const MAX_SCATTER_POINTS: usize = 20_000;

const SERIES_COLORS: [&str; 2] = ["#87ceeb", "#ffa500"];
const ORIGINAL_COLOR: &str = "#1f3fbf";
const RECONSTRUCTED_COLOR: &str = "#d62728";

/// Which error statistic a bar chart shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorMetric {
    Mse,
    Mae,
}

impl ErrorMetric {
    pub fn title(self) -> &'static str {
        match self {
            ErrorMetric::Mse => "Mean Squared Error",
            ErrorMetric::Mae => "Mean Absolute Error",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            ErrorMetric::Mse => "MSE",
            ErrorMetric::Mae => "MAE",
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// A drawing surface that lives for exactly one chart.
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        let mut canvas = Self { width, height, body: String::new() };
        canvas.rect(0.0, 0.0, width, height, "#ffffff", 1.0);
        canvas
    }

    // `write!` into a String cannot fail.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, opacity: f64) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{:.2}"/>"#,
            x, y, w, h, fill, opacity
        );
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
            x1, y1, x2, y2, stroke
        );
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="0.7"/>"#,
            cx, cy, r, fill
        );
    }

    /// `anchor` is an SVG `text-anchor` value: `start`, `middle` or `end`.
    pub fn text(&mut self, x: f64, y: f64, size: f64, anchor: &str, content: &str) {
        let _ = writeln!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.1}" text-anchor="{}">{}</text>"#,
            x, y, size, anchor, escape(content)
        );
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}</svg>\n",
            self.body,
            w = self.width,
            h = self.height,
        )
    }

    /// Consumes the canvas and writes it to `path`.
    pub fn save(self, path: &Path) -> Result<(), IoError> {
        let wrap = |source| IoError::Write { path: path.to_path_buf(), source };
        let file = File::create(path).map_err(wrap)?;
        let mut out = BufWriter::new(file);
        out.write_all(self.finish().as_bytes()).map_err(wrap)?;
        out.flush().map_err(wrap)
    }
}

/// Grouped bar chart: one group per axis, one bar per strategy.
fn draw_error_bars(mesh_name: &str, metric: ErrorMetric, series: &[(Strategy, Point3)]) -> SvgCanvas {
    let (width, height) = (800.0, 400.0);
    let (left, right, top, bottom) = (90.0, 160.0, 50.0, 50.0);
    let plot_w = width - left - right;
    let plot_h = height - top - bottom;

    let mut canvas = SvgCanvas::new(width, height);
    canvas.text(width / 2.0, 28.0, 16.0, "middle", &format!("{} - {}", mesh_name, metric.title()));

    let peak = series
        .iter()
        .flat_map(|(_, v)| v.iter().copied())
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };
    let to_y = |v: f64| top + plot_h - (v / y_max).clamp(0.0, 1.0) * plot_h;

    // Axes and ticks
    canvas.line(left, top, left, top + plot_h, "#000000");
    canvas.line(left, top + plot_h, left + plot_w, top + plot_h, "#000000");
    for i in 0..=4 {
        let v = y_max * i as f64 / 4.0;
        let y = to_y(v);
        canvas.line(left - 4.0, y, left, y, "#000000");
        canvas.text(left - 8.0, y + 4.0, 11.0, "end", &format!("{:.2e}", v));
    }
    canvas.text(18.0, top + plot_h / 2.0, 12.0, "middle", metric.short());

    let group_w = plot_w / AXES.len() as f64;
    let bar_w = group_w * 0.7 / series.len().max(1) as f64;
    for (a, axis) in AXES.iter().enumerate() {
        let group_x = left + group_w * a as f64 + group_w * 0.15;
        for (s, (_, values)) in series.iter().enumerate() {
            let v = if values[a].is_finite() { values[a].max(0.0) } else { 0.0 };
            let y = to_y(v);
            let color = SERIES_COLORS[s % SERIES_COLORS.len()];
            canvas.rect(group_x + bar_w * s as f64, y, bar_w, top + plot_h - y, color, 0.9);
        }
        canvas.text(left + group_w * (a as f64 + 0.5), top + plot_h + 20.0, 12.0, "middle", axis);
    }

    // Legend
    for (s, (strategy, _)) in series.iter().enumerate() {
        let y = top + 20.0 * s as f64;
        canvas.rect(width - right + 15.0, y, 12.0, 12.0, SERIES_COLORS[s % SERIES_COLORS.len()], 0.9);
        canvas.text(width - right + 33.0, y + 10.0, 12.0, "start", strategy.display_name());
    }

    canvas
}

pub fn error_bars_svg(mesh_name: &str, metric: ErrorMetric, series: &[(Strategy, Point3)]) -> String {
    draw_error_bars(mesh_name, metric, series).finish()
}

/// Renders a per-axis error bar chart comparing strategies to `path`.
pub fn render_error_bars(
    path: &Path,
    mesh_name: &str,
    metric: ErrorMetric,
    series: &[(Strategy, Point3)],
) -> Result<(), IoError> {
    draw_error_bars(mesh_name, metric, series).save(path)
}

/// Fixed oblique view: azimuth -60 degrees, elevation 30 degrees.
fn project(p: &Point3) -> (f64, f64) {
    let (az, el) = ((-60.0f64).to_radians(), 30.0f64.to_radians());
    let u = -p[0] * az.sin() + p[1] * az.cos();
    let v = p[2] * el.cos() - (p[0] * az.cos() + p[1] * az.sin()) * el.sin();
    (u, v)
}

fn stride_for(len: usize) -> usize {
    ((len + MAX_SCATTER_POINTS - 1) / MAX_SCATTER_POINTS).max(1)
}

/// Two scatter panels, original on the left and reconstruction on the right,
/// sharing one projection and framing so they can be compared directly.
fn draw_scatter_comparison(title: &str, original: &[Point3], reconstructed: &[Point3]) -> SvgCanvas {
    let (panel, margin, header) = (420.0, 30.0, 50.0);
    let width = panel * 2.0;
    let height = panel + header;

    let mut canvas = SvgCanvas::new(width, height);
    canvas.text(width / 2.0, 28.0, 16.0, "middle", title);

    let projected: Vec<Vec<(f64, f64)>> = [original, reconstructed]
        .iter()
        .map(|cloud| cloud.iter().step_by(stride_for(cloud.len())).map(project).collect())
        .collect();

    let mut lo = (f64::INFINITY, f64::INFINITY);
    let mut hi = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &(u, v) in projected.iter().flatten().filter(|(u, v)| u.is_finite() && v.is_finite()) {
        lo = (lo.0.min(u), lo.1.min(v));
        hi = (hi.0.max(u), hi.1.max(v));
    }
    let span = (hi.0 - lo.0).max(hi.1 - lo.1);
    let scale = if span.is_finite() && span > 0.0 { (panel - 2.0 * margin) / span } else { 1.0 };

    let panels = [("Original", ORIGINAL_COLOR), ("Reconstructed", RECONSTRUCTED_COLOR)];
    for (i, (points, (label, color))) in projected.iter().zip(panels.iter()).enumerate() {
        let x0 = panel * i as f64;
        canvas.text(x0 + panel / 2.0, header - 6.0, 13.0, "middle", label);
        canvas.line(x0 + margin, header + panel - margin, x0 + panel - margin, header + panel - margin, "#cccccc");
        for &(u, v) in points.iter().filter(|(u, v)| u.is_finite() && v.is_finite()) {
            let x = x0 + margin + (u - lo.0) * scale;
            let y = header + panel - margin - (v - lo.1) * scale;
            canvas.circle(x, y, 1.0, color);
        }
    }

    canvas
}

pub fn scatter_comparison_svg(title: &str, original: &[Point3], reconstructed: &[Point3]) -> String {
    draw_scatter_comparison(title, original, reconstructed).finish()
}

/// Renders an original-vs-reconstructed scatter comparison to `path`.
pub fn render_scatter_comparison(
    path: &Path,
    title: &str,
    original: &[Point3],
    reconstructed: &[Point3],
) -> Result<(), IoError> {
    draw_scatter_comparison(title, original, reconstructed).save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_chart_has_one_bar_per_axis_and_strategy() {
        let series = [
            (Strategy::MinMax, [1e-7, 2e-7, 3e-7]),
            (Strategy::UnitSphere, [4e-7, 5e-7, 6e-7]),
        ];
        let svg = error_bars_svg("bunny", ErrorMetric::Mse, &series);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("bunny - Mean Squared Error"));
        assert!(svg.contains("Min-Max"));
        assert!(svg.contains("Unit Sphere"));
        // background + 6 bars + 2 legend swatches
        assert_eq!(svg.matches("<rect").count(), 9);
    }

    #[test]
    fn all_zero_errors_still_render() {
        let series = [(Strategy::MinMax, [0.0; 3]), (Strategy::UnitSphere, [0.0; 3])];
        let svg = error_bars_svg("flat", ErrorMetric::Mae, &series);
        assert!(!svg.contains("NaN"));
        assert!(svg.contains("flat - Mean Absolute Error"));
    }

    #[test]
    fn titles_are_escaped() {
        let svg = scatter_comparison_svg("a<b & c", &[[0.0; 3]], &[[0.0; 3]]);
        assert!(svg.contains("a&lt;b &amp; c"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn large_clouds_are_subsampled() {
        let cloud: Vec<Point3> = (0..MAX_SCATTER_POINTS * 3).map(|i| [i as f64, 0.0, 1.0]).collect();
        let svg = scatter_comparison_svg("big", &cloud, &cloud);
        assert_eq!(svg.matches("<circle").count(), MAX_SCATTER_POINTS * 2);
    }
}
