//! aqview-file - File-mode AQI chart pipeline
//!
//! Loads the precomputed analysis results from a JSON file on disk and
//! renders the daily-average chart plus the hourly chart for the selected
//! date.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use aqview_common::chart::ChartFormat;
use aqview_common::config::{self, SELECTED_DATE_ENV};
use aqview_common::source::FileSource;
use aqview_common::view::{self, HourlyOutcome, ViewOptions};

/// Command-line arguments for aqview-file
#[derive(Parser, Debug)]
#[command(name = "aqview-file")]
#[command(about = "Render AQI charts from an analysis results file")]
#[command(version)]
struct Args {
    /// Path of the analysis results JSON file
    #[arg(
        short,
        long,
        default_value = "analysis_results.json",
        env = "AQVIEW_INPUT"
    )]
    input: PathBuf,

    /// Date whose hourly series is rendered (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<String>,

    /// Directory chart files are written to
    #[arg(short, long, default_value = ".", env = "AQVIEW_OUT_DIR")]
    out_dir: PathBuf,

    /// Chart output format
    #[arg(short, long, default_value = "svg")]
    format: ChartFormat,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting AQView file pipeline (aqview-file) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let selected_date = config::resolve_selected_date(
        args.date.as_deref(),
        SELECTED_DATE_ENV,
        Some("selected_date"),
    )?;
    info!("Input file: {}", args.input.display());
    info!("Selected date: {}", selected_date);

    let opts = ViewOptions {
        selected_date,
        out_dir: args.out_dir,
        format: args.format,
    };
    let mut source = FileSource::new(args.input);

    match view::run(&mut source, &opts)? {
        HourlyOutcome::Rendered { points } => {
            info!("Hourly chart rendered with {} points", points);
        }
        HourlyOutcome::NoData => {
            info!("No hourly data for {}, chart skipped", selected_date);
        }
    }

    Ok(())
}
