//! Visualizer - renders the fixed 2x3 chart grid to a PNG file
//!
//! Panel layout:
//! 1. correlation heatmap
//! 2-4. histograms of the first three numeric columns
//! 5. scatter plot of the first two numeric columns
//! 6. box plot of the first three numeric columns
//!
//! With fewer than three numeric columns nothing is drawn and the caller
//! gets a `Skipped` outcome carrying the reason.

use crate::config::AnalysisConfig;
use crate::dataset::{ColumnClassification, Dataset};
use crate::error::{AnalysisError, Result};
use crate::numeric::{self, Quartiles};
use crate::statistics;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type DrawResult<T, DB> = std::result::Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const MEDIAN_ORANGE: RGBColor = RGBColor(255, 127, 14);
const BOX_BLUE: RGBColor = RGBColor(31, 119, 180);
const UNDEFINED_GREY: RGBColor = RGBColor(200, 200, 200);

// coolwarm end points and midpoint
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

#[derive(Debug, Clone, PartialEq)]
pub enum VisualizationOutcome {
    Rendered(PathBuf),
    Skipped { reason: String },
}

impl VisualizationOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            VisualizationOutcome::Rendered(path) => Some(path),
            VisualizationOutcome::Skipped { .. } => None,
        }
    }
}

pub fn create_visualizations(
    dataset: &Dataset,
    classification: &ColumnClassification,
    config: &AnalysisConfig,
) -> Result<VisualizationOutcome> {
    if !config.render_plots {
        return Ok(VisualizationOutcome::Skipped {
            reason: "Plot rendering disabled".to_string(),
        });
    }

    let numeric_count = classification.numeric.len();
    if numeric_count < config.min_numeric_for_plots {
        return Ok(VisualizationOutcome::Skipped {
            reason: format!(
                "Insufficient numeric columns for comprehensive visualization ({} found, {} required)",
                numeric_count, config.min_numeric_for_plots
            ),
        });
    }

    let path = config.plot_path();
    render_grid(dataset, classification, config, &path)
        .map_err(|e| AnalysisError::Plot(e.to_string()))?;

    info!("Plots written to {}", path.display());
    Ok(VisualizationOutcome::Rendered(path))
}

fn render_grid(
    dataset: &Dataset,
    classification: &ColumnClassification,
    config: &AnalysisConfig,
    path: &Path,
) -> DrawResult<(), BitMapBackend<'static>> {
    let columns: Vec<(&str, &[Option<f64>])> = classification
        .numeric
        .iter()
        .filter_map(|name| dataset.numeric(name).map(|v| (name.as_str(), v)))
        .collect();

    let root = BitMapBackend::new(path, config.plot_size).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 3));

    if columns.len() >= 2 {
        if let Some(matrix) = statistics::correlation_matrix(dataset, classification) {
            let names: Vec<&str> = matrix.keys().map(String::as_str).collect();
            let values: Vec<Vec<Option<f64>>> = matrix
                .values()
                .map(|row| row.values().copied().collect())
                .collect();
            draw_heatmap(&panels[0], &names, &values)?;
        }
    }

    for (i, (name, values)) in columns.iter().take(3).enumerate() {
        draw_histogram(&panels[i + 1], name, values, config.histogram_bins)?;
    }

    if columns.len() >= 2 {
        draw_scatter(&panels[4], columns[0], columns[1])?;
    }

    let boxed = &columns[..columns.len().min(3)];
    draw_boxplot(&panels[5], boxed, config.iqr_multiplier)?;

    root.present()?;
    debug!("Rendered {} panels", panels.len());
    Ok(())
}

/// Diverging colour for a correlation in [-1, 1]
fn coolwarm(r: Option<f64>) -> RGBColor {
    let Some(r) = r else {
        return UNDEFINED_GREY;
    };
    let t = r.clamp(-1.0, 1.0);
    let (from, to, f) = if t < 0.0 {
        (COOL, NEUTRAL, t + 1.0)
    } else {
        (NEUTRAL, WARM, t)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * f).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Category name for an integer tick, blank elsewhere
fn axis_label(v: f64, names: &[&str]) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
}

/// Axis range around the data, widened when it collapses to a point
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let data: Vec<f64> = values.collect();
    match numeric::min_max(&data) {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins over [min, max]; the max value lands in the last bin
pub fn histogram_bins(data: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some((mut lo, mut hi)) = numeric::min_max(data) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in data {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    names: &[&str],
    matrix: &[Vec<Option<f64>>],
) -> DrawResult<(), DB> {
    let n = names.len();
    // first column on top
    let reversed: Vec<&str> = names.iter().rev().copied().collect();
    let span = -0.5f64..(n as f64 - 0.5);

    let mut chart = ChartBuilder::on(area)
        .caption("Feature Correlation Matrix", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(span.clone(), span)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|v| axis_label(*v, names))
        .y_label_formatter(&|v| axis_label(*v, &reversed))
        .draw()?;

    let cells: Vec<(f64, f64, Option<f64>)> = matrix
        .iter()
        .enumerate()
        .flat_map(move |(i, row)| {
            row.iter()
                .enumerate()
                .map(move |(j, r)| (j as f64, (n - 1 - i) as f64, *r))
        })
        .collect();

    chart.draw_series(cells.iter().map(|&(x, y, r)| {
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], coolwarm(r).filled())
    }))?;

    let annotation = TextStyle::from(("sans-serif", 14).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(cells.iter().map(|&(x, y, r)| {
        let label = r.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "nan".to_string());
        Text::new(label, (x, y), annotation.clone())
    }))?;

    Ok(())
}

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    name: &str,
    values: &[Option<f64>],
    bins: usize,
) -> DrawResult<(), DB> {
    let data = numeric::present(values);
    let bins = histogram_bins(&data, bins);

    let (x_lo, x_hi) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.start, last.end),
        _ => (0.0, 1.0),
    };
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Distribution of {}", name), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(name)
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], SKY_BLUE.mix(0.7).filled())
    }))?;
    chart.draw_series(bins.iter().filter(|b| b.count > 0).map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLACK.stroke_width(1))
    }))?;

    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x: (&str, &[Option<f64>]),
    y: (&str, &[Option<f64>]),
) -> DrawResult<(), DB> {
    let points: Vec<(f64, f64)> = x
        .1
        .iter()
        .zip(y.1)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    let (x_lo, x_hi) = padded_range(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = padded_range(points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(area)
        .caption(format!("{} vs {}", x.0, y.0), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart.configure_mesh().x_desc(x.0).y_desc(y.0).draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(a, b)| Circle::new((a, b), 3, GREEN.mix(0.6).filled())),
    )?;

    Ok(())
}

/// Box geometry for one column
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub quartiles: Quartiles,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub fliers: Vec<f64>,
}

impl BoxStats {
    /// Whiskers reach the furthest values still inside the Tukey fences
    pub fn of(values: &[Option<f64>], multiplier: f64) -> Option<Self> {
        let sorted = numeric::sorted_present(values);
        let quartiles = Quartiles::of_sorted(&sorted)?;
        let (lower, upper) = quartiles.fences(multiplier);

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v >= lower && *v <= upper)
            .collect();
        let fliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lower || *v > upper)
            .collect();

        Some(Self {
            quartiles,
            whisker_low: inside.first().copied().unwrap_or(quartiles.q1),
            whisker_high: inside.last().copied().unwrap_or(quartiles.q3),
            fliers,
        })
    }
}

fn draw_boxplot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    columns: &[(&str, &[Option<f64>])],
    multiplier: f64,
) -> DrawResult<(), DB> {
    let names: Vec<&str> = columns.iter().map(|c| c.0).collect();
    let boxes: Vec<(f64, BoxStats)> = columns
        .iter()
        .enumerate()
        .filter_map(|(i, (_, values))| BoxStats::of(values, multiplier).map(|b| (i as f64, b)))
        .collect();

    let (y_lo, y_hi) = padded_range(columns.iter().flat_map(|c| c.1.iter().flatten().copied()));
    let k = columns.len().max(1);

    let mut chart = ChartBuilder::on(area)
        .caption("Box Plot of Numeric Features", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(45)
        .build_cartesian_2d(-0.5f64..(k as f64 - 0.5), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(k)
        .x_label_formatter(&|v| axis_label(*v, &names))
        .draw()?;

    let half = 0.25;
    chart.draw_series(boxes.iter().map(|(x, b)| {
        Rectangle::new(
            [(x - half, b.quartiles.q1), (x + half, b.quartiles.q3)],
            BOX_BLUE.stroke_width(2),
        )
    }))?;

    let mut lines: Vec<Vec<(f64, f64)>> = Vec::new();
    for (x, b) in &boxes {
        let x = *x;
        lines.push(vec![(x, b.quartiles.q1), (x, b.whisker_low)]);
        lines.push(vec![(x, b.quartiles.q3), (x, b.whisker_high)]);
        lines.push(vec![(x - half / 2.0, b.whisker_low), (x + half / 2.0, b.whisker_low)]);
        lines.push(vec![(x - half / 2.0, b.whisker_high), (x + half / 2.0, b.whisker_high)]);
    }
    chart.draw_series(lines.into_iter().map(|pts| PathElement::new(pts, BLACK.stroke_width(1))))?;

    chart.draw_series(boxes.iter().map(|(x, b)| {
        PathElement::new(
            vec![(x - half, b.quartiles.median), (x + half, b.quartiles.median)],
            MEDIAN_ORANGE.stroke_width(2),
        )
    }))?;

    chart.draw_series(boxes.iter().flat_map(|(x, b)| {
        b.fliers
            .iter()
            .map(move |&v| Circle::new((*x, v), 3, BLACK.stroke_width(1)))
    }))?;

    Ok(())
}
