//! Common error types for AQView

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Common result type for AQView operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the AQView pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Input file missing (file mode). Never silently defaulted.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Payload is not well-formed, a required field is absent, or a value
    /// fails validation. Nothing meaningful can be rendered from it.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An hourly sample inside the rendered window is not a 2-element pair
    #[error("Malformed hourly entry for {date} at index {index}: expected a [hour, aqi] pair, found {len} elements")]
    MalformedEntry {
        date: NaiveDate,
        index: usize,
        len: usize,
    },

    /// Channel payload exceeds the fixed frame capacity.
    #[error("Payload of {len} bytes exceeds frame capacity of {capacity} bytes")]
    PayloadTooLarge { len: usize, capacity: usize },

    /// Charting backend failure
    #[error("Chart error: {0}")]
    Chart(String),

    /// Configuration resolution or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
