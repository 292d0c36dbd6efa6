//! Error types for Progress Flux
//!
//! The analytics functions themselves are total and never fail. These errors
//! only arise at the boundary: parsing snapshots, date keys, and encoding
//! reports.

use thiserror::Error;

/// Errors that can occur while reading input or producing output
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
