//! Runtime charts drawn from the combined table of a summary file.
//!
//! Every chart plots runtime against N with one point series per algorithm
//! and per provenance, so measured averages and fitted values never share a
//! colour.

use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use tracing::{debug, warn};

use crate::config::Algorithm;
use crate::error::BenchError;
use crate::summary::{Estimate, SummaryTable};

/// Rows shown by the small-N charts.
pub const SMALL_N_ROWS: usize = 5;
pub const SMALL_N_Y_CAP: f64 = 0.02;
pub const LARGE_N_Y_CAP: f64 = 25_000.0;

const CHART_SIZE: (u32, u32) = (1000, 600);
const X_DESC: &str = "Number of Cities (N)";
const MAROON: RGBColor = RGBColor(128, 0, 0);
const LIME: RGBColor = RGBColor(0, 255, 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chart {
    SmallN,
    SmallNZoomed,
    LargeN,
    /// Drops points at or above [`LARGE_N_Y_CAP`].
    LargeNZoomed,
    LargeNLog,
}

impl Chart {
    pub const ALL: [Chart; 5] = [
        Chart::SmallN,
        Chart::SmallNZoomed,
        Chart::LargeN,
        Chart::LargeNZoomed,
        Chart::LargeNLog,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Chart::SmallN => "small-n.svg",
            Chart::SmallNZoomed => "small-n-zoomed.svg",
            Chart::LargeN => "large-n.svg",
            Chart::LargeNZoomed => "large-n-zoomed.svg",
            Chart::LargeNLog => "large-n-logscale.svg",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Chart::SmallN | Chart::SmallNZoomed => "TSP Algorithm Runtime for Small N",
            Chart::LargeN => "TSP Algorithm Runtime for Large N",
            Chart::LargeNZoomed => "TSP Algorithm Runtime for Large N (Trimmed)",
            Chart::LargeNLog => "TSP Algorithm Runtime for Large N (Log Scale)",
        }
    }

    fn y_cap(&self) -> Option<f64> {
        match self {
            Chart::SmallNZoomed => Some(SMALL_N_Y_CAP),
            Chart::LargeNZoomed => Some(LARGE_N_Y_CAP),
            _ => None,
        }
    }

    fn shows(&self, t: f64) -> bool {
        if !t.is_finite() {
            return false;
        }
        match self {
            Chart::SmallNZoomed => t <= SMALL_N_Y_CAP,
            Chart::LargeNZoomed => t < LARGE_N_Y_CAP,
            Chart::LargeNLog => t > 0.0,
            Chart::SmallN | Chart::LargeN => true,
        }
    }

    /// Points of every algorithm in `table` that this chart shows.
    pub fn series(&self, table: &SummaryTable) -> Vec<PlotSeries> {
        let rows = match self {
            Chart::SmallN | Chart::SmallNZoomed => &table.rows[..table.rows.len().min(SMALL_N_ROWS)],
            _ => &table.rows[..],
        };

        table
            .algorithms
            .iter()
            .enumerate()
            .map(|(col, &algorithm)| {
                let mut series = PlotSeries::new(algorithm);
                for row in rows {
                    let Some(estimate) = row.cells.get(col).copied().flatten() else {
                        continue;
                    };
                    if !self.shows(estimate.value()) {
                        continue;
                    }
                    match estimate {
                        Estimate::Measured(t) => series.measured.push((row.n, t)),
                        Estimate::Extrapolated(t) => series.extrapolated.push((row.n, t)),
                    }
                }
                series
            })
            .collect()
    }
}

/// One algorithm's points, split by where they came from.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSeries {
    pub algorithm: Algorithm,
    pub measured: Vec<(usize, f64)>,
    pub extrapolated: Vec<(usize, f64)>,
}

impl PlotSeries {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            measured: Vec::new(),
            extrapolated: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.measured.is_empty() && self.extrapolated.is_empty()
    }

    fn points(&self) -> impl Iterator<Item = &(usize, f64)> {
        self.measured.iter().chain(&self.extrapolated)
    }
}

/// `(measured, extrapolated)` colours.
fn colors(algorithm: Algorithm) -> (RGBColor, RGBColor) {
    match algorithm {
        Algorithm::Exhaustive => (RED, MAROON),
        Algorithm::Dynamic => (BLUE, CYAN),
        Algorithm::Greedy => (GREEN, LIME),
    }
}

fn plot_error(err: impl std::fmt::Display) -> BenchError {
    BenchError::Plot(err.to_string())
}

/// Writes one SVG chart. `series` should come from [`Chart::series`].
pub fn draw_chart(chart: Chart, series: &[PlotSeries], path: &Path) -> Result<(), BenchError> {
    let points: Vec<(usize, f64)> = series.iter().flat_map(|s| s.points()).copied().collect();
    if points.is_empty() {
        return Err(BenchError::Plot(format!("nothing to draw for {}", chart.file_name())));
    }

    let x_min = points.iter().map(|&(n, _)| n).min().unwrap_or(0) as f64;
    let x_max = points.iter().map(|&(n, _)| n).max().unwrap_or(0) as f64;
    let x_range = (x_min - 0.5)..(x_max + 0.5);
    let y_min = points.iter().map(|&(_, t)| t).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|&(_, t)| t).fold(0.0, f64::max);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .caption(chart.title(), ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(80);

    if chart == Chart::LargeNLog {
        let mut ctx = builder
            .build_cartesian_2d(x_range, (y_min / 2.0..y_max * 2.0).log_scale())
            .map_err(plot_error)?;
        ctx.configure_mesh()
            .x_desc(X_DESC)
            .y_desc("Runtime (log scale)")
            .x_label_formatter(&|n| format!("{n:.0}"))
            .y_label_formatter(&|t| format!("{t:.0e}"))
            .draw()
            .map_err(plot_error)?;
        draw_points(&mut ctx, series)?;
    } else {
        let top = chart.y_cap().unwrap_or(y_max * 1.05);
        let top = if top > 0.0 { top } else { 1.0 };
        let mut ctx = builder
            .build_cartesian_2d(x_range, 0.0..top)
            .map_err(plot_error)?;
        ctx.configure_mesh()
            .x_desc(X_DESC)
            .y_desc("Runtime (seconds)")
            .x_label_formatter(&|n| format!("{n:.0}"))
            .draw()
            .map_err(plot_error)?;
        draw_points(&mut ctx, series)?;
    }

    root.present().map_err(plot_error)?;
    Ok(())
}

fn draw_points<'a, DB, Y>(
    ctx: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, Y>>,
    series: &[PlotSeries],
) -> Result<(), BenchError>
where
    DB: DrawingBackend + 'a,
    Y: Ranged<ValueType = f64>,
{
    for s in series {
        let (measured, extrapolated) = colors(s.algorithm);
        for (points, color, provenance) in [
            (&s.measured, measured, "measured"),
            (&s.extrapolated, extrapolated, "extrapolated"),
        ] {
            if points.is_empty() {
                continue;
            }
            ctx.draw_series(
                points
                    .iter()
                    .map(|&(n, t)| Circle::new((n as f64, t), 4, color.filled())),
            )
            .map_err(plot_error)?
            .label(format!("{} ({provenance})", s.algorithm.label()))
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
        }
    }

    ctx.configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;
    Ok(())
}

/// Draws every [`Chart`] that has points into `out_dir` and returns the
/// written paths.
pub fn draw_charts(table: &SummaryTable, out_dir: &Path) -> Result<Vec<PathBuf>, BenchError> {
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for chart in Chart::ALL {
        let series = chart.series(table);
        if series.iter().all(PlotSeries::is_empty) {
            warn!(chart = chart.file_name(), "no points to draw, skipping");
            continue;
        }

        let path = out_dir.join(chart.file_name());
        draw_chart(chart, &series, &path)?;
        debug!(path = %path.display(), "chart written");
        written.push(path);
    }

    Ok(written)
}
