//! Error types for GeoEpi

use thiserror::Error;

/// Main error type for GeoEpi operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for GeoEpi operations
pub type Result<T> = std::result::Result<T, Error>;
