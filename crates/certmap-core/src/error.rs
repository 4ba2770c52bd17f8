// crates/certmap-core/src/error.rs

//! Crate-wide error type.
//!
//! Only dataset loading is allowed to fail loudly: a missing or
//! unparsable dataset aborts the whole pipeline. City-index problems
//! degrade to the fallback table inside `city_index` and never surface
//! here.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Debug, Error)]
pub enum MapError {
    /// A source resource could not be read from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The city-index resource was not valid JSON of the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset resource could not be parsed as a sheet.
    #[error("sheet error: {0}")]
    Sheet(#[from] csv::Error),

    /// A resource violated a structural expectation.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// HTTP transport failure or non-success status while fetching a
    /// source resource.
    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(String),
}
