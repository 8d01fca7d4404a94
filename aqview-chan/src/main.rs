//! aqview-chan - Channel-mode AQI chart pipeline
//!
//! Receiving end of the two-process rendezvous: blocks until the producer
//! peer connects and transmits one null-padded frame of analysis results,
//! then renders the same charts as the file-mode pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use aqview_common::chart::ChartFormat;
use aqview_common::config::{self, SELECTED_DATE_ENV};
use aqview_common::frame;
use aqview_common::source::ChannelEndpoint;
use aqview_common::view::{self, HourlyOutcome, ViewOptions};

/// Command-line arguments for aqview-chan
#[derive(Parser, Debug)]
#[command(name = "aqview-chan")]
#[command(about = "Render AQI charts from a producer handoff")]
#[command(version)]
struct Args {
    /// Loopback address to listen on for the producer connection
    #[arg(short, long, default_value = "127.0.0.1:5747", env = "AQVIEW_BIND")]
    bind: String,

    /// Frame capacity in bytes agreed with the producer
    #[arg(long, default_value_t = frame::FRAME_CAPACITY)]
    capacity: usize,

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
        "Starting AQView channel pipeline (aqview-chan) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let selected_date = config::resolve_selected_date(
        args.date.as_deref(),
        SELECTED_DATE_ENV,
        Some("selected_date"),
    )?;
    info!("Selected date: {}", selected_date);

    let endpoint = ChannelEndpoint::bind(&args.bind)?;
    let mut source = endpoint.accept(args.capacity)?;

    let opts = ViewOptions {
        selected_date,
        out_dir: args.out_dir,
        format: args.format,
    };

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
