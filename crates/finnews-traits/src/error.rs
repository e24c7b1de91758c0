//! Error types for the finnews pipeline.
//!
//! Most failures in the pipeline are local and are skipped rather than raised.
//! The variants here cover the cases that do stop a stage: a missing
//! configuration file, unreadable inputs, and failed exports.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for finnews operations.
#[derive(Debug, Error)]
pub enum FinnewsError {
    /// The ticker configuration file does not exist.
    #[error("Ticker configuration not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a date or timestamp cannot be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for FinnewsError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for FinnewsError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for finnews operations.
pub type Result<T> = std::result::Result<T, FinnewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinnewsError::ConfigNotFound(PathBuf::from("configs/tickers.yaml"));
        assert_eq!(
            err.to_string(),
            "Ticker configuration not found: configs/tickers.yaml"
        );

        let err = FinnewsError::InvalidDate("2024-13-01".to_string());
        assert_eq!(err.to_string(), "Invalid date: 2024-13-01");
    }

    #[test]
    fn test_error_from_string() {
        let err: FinnewsError = "boom".into();
        assert!(matches!(err, FinnewsError::Other(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FinnewsError = io.into();
        assert!(matches!(err, FinnewsError::Io(_)));
    }
}
