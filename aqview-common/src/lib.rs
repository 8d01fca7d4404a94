//! # AQView Common Library
//!
//! Shared code for the AQView chart pipeline binaries including:
//! - Result payload model, decoding and validation
//! - Fixed-capacity channel frame codec
//! - Payload sources (file-backed and channel-backed)
//! - Daily and hourly chart rendering
//! - Configuration resolution

pub mod chart;
pub mod config;
pub mod error;
pub mod frame;
pub mod model;
pub mod source;
pub mod view;

pub use error::{Error, Result};
pub use model::AqiResult;
