//! Line-chart rendering over shaped series
//!
//! Drawing is written once against `DrawingBackend` and dispatched to the
//! SVG or bitmap backend by `ChartFormat`, so both formats share one code
//! path.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};

use crate::error::{Error, Result};
use crate::model::DATE_FORMAT;

/// Chart canvas size in pixels
const CHART_SIZE: (u32, u32) = (1200, 600);

/// Output format for rendered charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Svg,
    Png,
}

impl ChartFormat {
    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Png => "png",
        }
    }
}

impl FromStr for ChartFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "svg" => Ok(ChartFormat::Svg),
            "png" => Ok(ChartFormat::Png),
            other => Err(Error::Config(format!(
                "unknown chart format {other:?} (expected svg or png)"
            ))),
        }
    }
}

impl std::fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Render the daily-average line chart to `path`.
///
/// The series must already be date-ascending; one x tick per calendar day,
/// labeled `YYYY-MM-DD` and rotated for readability.
pub fn render_daily(series: &[(NaiveDate, f64)], path: &Path, format: ChartFormat) -> Result<()> {
    if series.is_empty() {
        return Ok(());
    }
    match format {
        ChartFormat::Svg => {
            draw_daily(SVGBackend::new(path, CHART_SIZE).into_drawing_area(), series)
        }
        ChartFormat::Png => draw_daily(
            BitMapBackend::new(path, CHART_SIZE).into_drawing_area(),
            series,
        ),
    }
}

/// Render the hourly line chart for one date to `path`.
///
/// Points are plotted at x positions `0..n-1` in the order given, with x
/// tick labels built from the original hour values.
pub fn render_hourly(
    date: NaiveDate,
    points: &[(u32, f64)],
    path: &Path,
    format: ChartFormat,
) -> Result<()> {
    match format {
        ChartFormat::Svg => draw_hourly(
            SVGBackend::new(path, CHART_SIZE).into_drawing_area(),
            date,
            points,
        ),
        ChartFormat::Png => draw_hourly(
            BitMapBackend::new(path, CHART_SIZE).into_drawing_area(),
            date,
            points,
        ),
    }
}

fn draw_daily<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &[(NaiveDate, f64)],
) -> Result<()> {
    root.fill(&WHITE).map_err(chart_err)?;

    let x_from = series[0].0;
    let x_to = series[series.len() - 1].0;
    // Widen a single-day range so the axis is not degenerate
    let (x_from, x_to) = if x_from == x_to {
        (
            x_from - chrono::Duration::days(1),
            x_to + chrono::Duration::days(1),
        )
    } else {
        (x_from, x_to)
    };
    let (y_from, y_to) = value_bounds(series.iter().map(|(_, v)| *v));
    let day_count = ((x_to - x_from).num_days() + 1) as usize;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Daily Air Quality Index (AQI)",
            FontDesc::new(FontFamily::SansSerif, 22.0, FontStyle::Normal),
        )
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 90)
        .build_cartesian_2d(x_from..x_to, y_from..y_to)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(day_count)
        .x_label_formatter(&|d: &NaiveDate| d.format(DATE_FORMAT).to_string())
        .x_label_style(
            FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal)
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Date")
        .y_desc("AQI Score")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
        .map_err(chart_err)?;
    chart
        .draw_series(
            series
                .iter()
                .map(|(d, v)| Circle::new((*d, *v), 3, BLUE.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

fn draw_hourly<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    date: NaiveDate,
    points: &[(u32, f64)],
) -> Result<()> {
    root.fill(&WHITE).map_err(chart_err)?;

    let x_to = points.len().saturating_sub(1).max(1) as i32;
    let (y_from, y_to) = value_bounds(points.iter().map(|(_, v)| *v));

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Hourly AQI on {}", date.format(DATE_FORMAT)),
            FontDesc::new(FontFamily::SansSerif, 22.0, FontStyle::Normal),
        )
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 70)
        .build_cartesian_2d(0i32..x_to, y_from..y_to)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(points.len().max(2))
        .x_label_formatter(&|x: &i32| {
            points
                .get(*x as usize)
                .map(|(hour, _)| crate::view::hour_label(*hour))
                .unwrap_or_default()
        })
        .x_label_style(
            FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal)
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Hour of the Day")
        .y_desc("AQI Score")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            points
                .iter()
                .enumerate()
                .map(|(i, (_, v))| (i as i32, *v)),
            &RED,
        ))
        .map_err(chart_err)?;
    chart
        .draw_series(
            points
                .iter()
                .enumerate()
                .map(|(i, (_, v))| Circle::new((i as i32, *v), 3, RED.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

/// Padded y-axis bounds for a value series, keeping a zero baseline for the
/// non-negative AQI scale
fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    let mut any = false;
    for v in values {
        any = true;
        min = min.min(v);
        max = max.max(v);
    }
    if !any {
        return (0.0, 1.0);
    }
    let low = min.min(0.0);
    let span = (max - low).max(1.0);
    (low, max + span * 0.1)
}

fn chart_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Chart(err.to_string())
}
