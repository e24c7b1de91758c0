#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finnews/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # finnews
//!
//! Financial news ticker tagging and forward-return datasets.
//!
//! finnews is an umbrella crate that re-exports all finnews sub-crates for
//! convenience. It covers the whole pipeline from stored headlines to a
//! sentiment/return dataset.
//!
//! ## Quick Start
//!
//! ```ignore
//! use finnews::prelude::*;
//!
//! # fn example(mut articles: Vec<Article>, prices: Vec<PricePoint>) -> Result<()> {
//! let cfg = TickerConfig::load("configs/tickers.yaml")?;
//! let matcher = TickerMatcher::new(&cfg);
//! enrich_articles(&matcher, &mut articles, &EnrichOptions::default());
//!
//! let book = PriceBook::from_points(prices);
//! let dataset = DatasetBuilder::new(&book).build(&articles);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Shared types, the [`SentimentScorer`] seam and statistics
//! - [`tagger`] - Ticker configuration, pattern building and matching
//! - [`returns`] - Price series, forward returns and dataset assembly
//! - [`eval`] - Sentiment scoring, joins and the descriptive report
//! - [`fmp`] - Daily price client
//! - [`store`] - SQLite persistence
//!
//! ## Pipeline
//!
//! 1. **Ingest** stores articles with an empty ticker field
//! 2. **Enrich** tags each article with the tickers it mentions
//! 3. **Prices** are fetched per ticker and stored by `(ticker, date)`
//! 4. **Build** joins tagged articles with 1, 2 and 5 day forward returns
//! 5. **Analyze** scores headline sentiment and relates it to those returns

/// Version information for the finnews crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Shared types and trait definitions.
pub mod traits {
    pub use finnews_traits::*;
}

// Re-export error and common types at top level
pub use finnews_traits::{
    Article, Date, FinnewsError, NewArticle, PricePoint, Result, SentimentLabel,
    SentimentScorer, Symbol, Timestamp,
};

// ============================================================================
// Ticker Tagging
// ============================================================================

/// Ticker tagging of free text.
///
/// Names are normalized and turned into word-bounded, case-insensitive
/// patterns with an optional possessive suffix. Every article is tagged
/// independently and only changed values are reported.
///
/// # Example
///
/// ```ignore
/// use finnews::tagger::{TickerConfig, TickerMatcher};
///
/// let cfg = TickerConfig::with_universe(["GM"]).name("GM", "General Motors");
/// let matcher = TickerMatcher::new(&cfg);
/// assert_eq!(matcher.tag("General Motors' EV push"), "GM");
/// ```
pub mod tagger {
    pub use finnews_tagger::*;
}

// ============================================================================
// Forward Returns
// ============================================================================

/// Price series, forward returns and the article/return dataset.
///
/// For a publication date `t` and horizon `n` calendar days:
///
/// ```text
/// p0  = last close on or before t
/// pN  = first close on or after t + n
/// ret = (pN - p0) / p0
/// ```
pub mod returns {
    pub use finnews_returns::*;
}

// ============================================================================
// Evaluation
// ============================================================================

/// Headline sentiment and its relation to forward returns.
pub mod eval {
    pub use finnews_eval::*;
}

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) daily price client.
///
/// ## Setup
///
/// 1. Get a free API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
pub mod fmp {
    pub use finnews_fmp::*;
}

/// SQLite persistence for articles and prices.
pub mod store {
    pub use finnews_store::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use finnews::prelude::*;
/// ```
pub mod prelude {
    pub use crate::eval::{SentimentReport, VaderScorer, join_sentiment, score_articles};
    pub use crate::returns::{DatasetBuilder, DatasetRow, PriceBook, PriceSeries, forward_return};
    pub use crate::tagger::{EnrichOptions, TickerConfig, TickerMatcher, enrich_articles};
    pub use crate::{Article, Date, FinnewsError, PricePoint, Result, SentimentScorer, Symbol};
}

// ============================================================================
// Tests
// ============================================================================
