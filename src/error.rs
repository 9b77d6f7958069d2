//! Error types for loc-admin

use thiserror::Error;

/// Main error type for loc-admin operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Location store error: {0}")]
    Store(String),

    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for loc-admin operations
pub type Result<T> = std::result::Result<T, Error>;
