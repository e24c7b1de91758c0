#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finnews/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the finnews pipeline.
//!
//! This crate provides the shared vocabulary used by every stage of the
//! news-sentiment pipeline: articles and their ticker tags, daily price
//! points, the sentiment scoring seam, and the error type.

/// The version of the finnews-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod sentiment;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{FinnewsError, Result};
pub use sentiment::{SentimentLabel, SentimentScorer};
pub use types::{Article, Date, NewArticle, PricePoint, Symbol, Timestamp};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
