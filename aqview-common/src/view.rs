//! The two visualizations and the pipeline orchestration
//!
//! Both renders are read-only projections of one immutable `AqiResult`.
//! The run order is daily first, then hourly.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::info;

use crate::chart::{self, ChartFormat};
use crate::error::{Error, Result};
use crate::model::{format_date, AqiResult, HourlySample};
use crate::source::ResultSource;

/// At most this many hourly samples are inspected and plotted
pub const HOURLY_WINDOW: usize = 10;

/// Options shared by both renders
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Date whose hourly series is rendered
    pub selected_date: NaiveDate,
    /// Directory chart files are written to
    pub out_dir: PathBuf,
    /// Chart output format
    pub format: ChartFormat,
}

impl ViewOptions {
    /// Path of the daily chart artifact
    pub fn daily_chart_path(&self) -> PathBuf {
        self.out_dir
            .join(format!("daily_aqi.{}", self.format.extension()))
    }

    /// Path of the hourly chart artifact for the selected date
    pub fn hourly_chart_path(&self) -> PathBuf {
        self.out_dir.join(format!(
            "hourly_aqi_{}.{}",
            format_date(self.selected_date),
            self.format.extension()
        ))
    }
}

/// Non-error outcome of the hourly render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourlyOutcome {
    /// Chart written with this many points
    Rendered { points: usize },
    /// Selected date absent from the hourly data; nothing rendered
    NoData,
}

/// X tick label for an hour value.
///
/// # Examples
///
/// ```
/// use aqview_common::view::hour_label;
///
/// assert_eq!(hour_label(0), "0:00");
/// assert_eq!(hour_label(23), "23:00");
/// ```
pub fn hour_label(hour: u32) -> String {
    format!("{hour}:00")
}

/// The daily `(date, score)` series, ascending by parsed date
pub fn daily_series(result: &AqiResult) -> Vec<(NaiveDate, f64)> {
    result.daily.iter().map(|(d, v)| (*d, *v)).collect()
}

/// The first `HOURLY_WINDOW` samples for a date as `(hour, aqi)` pairs, in
/// their original order.
///
/// Fails with `Error::MalformedEntry` when a sample inside the window is
/// not exactly a pair; samples beyond the window are never touched.
pub fn hourly_window(samples: &[HourlySample], date: NaiveDate) -> Result<Vec<(u32, f64)>> {
    samples
        .iter()
        .take(HOURLY_WINDOW)
        .enumerate()
        .map(|(index, sample)| {
            sample.pair().ok_or(Error::MalformedEntry {
                date,
                index,
                len: sample.len(),
            })
        })
        .collect()
}

/// Render the daily-average chart.
///
/// Returns the artifact path, or `None` when the daily series is empty and
/// there is nothing to chart.
pub fn render_daily(result: &AqiResult, opts: &ViewOptions) -> Result<Option<PathBuf>> {
    let series = daily_series(result);
    if series.is_empty() {
        info!("Daily series is empty, nothing to chart");
        return Ok(None);
    }

    let path = opts.daily_chart_path();
    chart::render_daily(&series, &path, opts.format)?;
    info!(
        "Daily chart with {} points written to {}",
        series.len(),
        path.display()
    );
    Ok(Some(path))
}

/// Render the hourly chart for the selected date.
///
/// An absent date is a recoverable no-data condition: a notice is printed
/// and `HourlyOutcome::NoData` is returned without rendering.
pub fn render_hourly(result: &AqiResult, opts: &ViewOptions) -> Result<HourlyOutcome> {
    let date = opts.selected_date;
    let Some(samples) = result.hourly_for(date) else {
        println!("No data available for {}", format_date(date));
        return Ok(HourlyOutcome::NoData);
    };

    let window = hourly_window(samples, date)?;
    println!("Data for {}:", format_date(date));
    for (hour, aqi) in &window {
        println!("Hour: {hour}, AQI: {aqi}");
    }

    let path = opts.hourly_chart_path();
    chart::render_hourly(date, &window, &path, opts.format)?;
    info!(
        "Hourly chart with {} points written to {}",
        window.len(),
        path.display()
    );
    Ok(HourlyOutcome::Rendered {
        points: window.len(),
    })
}

/// The unified pipeline: load once, render daily, then render hourly.
pub fn run(source: &mut dyn ResultSource, opts: &ViewOptions) -> Result<HourlyOutcome> {
    let started = Instant::now();
    let result = source.load()?;
    info!(
        "Result payload loaded and parsed in {} ms ({} daily dates, {} hourly dates)",
        started.elapsed().as_millis(),
        result.daily.len(),
        result.hourly.len()
    );

    render_daily(&result, opts)?;
    render_hourly(&result, opts)
}
