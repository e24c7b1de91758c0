//! Error types for the FMP price client.

use thiserror::Error;

/// Errors that can occur when fetching prices from FMP.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("FMP API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Free tier allows 250 requests/day.")]
    RateLimitExceeded,

    /// Requested window ends before it starts.
    #[error("Invalid date range: {from} > {to}")]
    InvalidRange {
        /// Window start.
        from: chrono::NaiveDate,
        /// Window end.
        to: chrono::NaiveDate,
    },
}
