//! Error types for the DCA core library
use thiserror::Error;

use crate::cell::{DATE_FIELD, FLOW_RATE_FIELD};

/// Errors raised while turning uploaded rows into a production series.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Tabular content could not be decoded
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// No row carried both a usable date and a flow rate
    #[error("No valid data found. Expected columns: '{}', '{}'", DATE_FIELD, FLOW_RATE_FIELD)]
    EmptyDataset,
}

/// Failures talking to the decline-curve calculation service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Connection, timeout or body transfer failure
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Calculation service returned status {status}")]
    Status { status: u16 },

    /// The body did not match the response schema
    #[error("Failed to parse calculation response: {0}")]
    MalformedBody(String),
}

/// Reasons a forecast cannot be started.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// No production series has been imported
    #[error("No production data loaded")]
    NoSeries,

    /// The selection does not hold exactly two anchors
    #[error("Two anchor points are required (selected: {selected})")]
    NotEnoughAnchors { selected: usize },

    /// An anchor no longer points inside the series
    #[error("Anchor index {index} is outside the series (length {len})")]
    AnchorOutOfRange { index: usize, len: usize },

    /// Another request has not completed yet
    #[error("A forecast calculation is already in progress")]
    InFlight,
}
