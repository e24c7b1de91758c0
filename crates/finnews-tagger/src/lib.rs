//! Ticker tagging for financial news.
//!
//! This crate turns free text into the set of configured tickers it mentions:
//! - [`TickerConfig`] loads the universe, canonical names and aliases
//! - [`normalize_text`] canonicalizes text before matching
//! - [`name_to_pattern`] turns arbitrary names into safe regex patterns
//! - [`TickerMatcher`] compiles one [`CompiledRule`] per ticker and applies them
//! - [`enrich_articles`] drives the matcher over stored articles
//!
//! # Example
//!
//! ```rust,ignore
//! use finnews_tagger::{TickerConfig, TickerMatcher};
//!
//! let cfg = TickerConfig::load("configs/tickers.yaml")?;
//! let matcher = TickerMatcher::new(&cfg);
//! let tickers = matcher.find("General Motors and Tesla's shares slide");
//! ```

pub mod config;
pub mod enrich;
pub mod matcher;
pub mod normalize;
pub mod pattern;

// Re-export main types
pub use config::{DEFAULT_TICKERS_PATH, TickerConfig};
pub use enrich::{EnrichOptions, EnrichOutcome, TickerUpdate, enrich_articles};
pub use matcher::{CompiledRule, TickerMatcher};
pub use normalize::normalize_text;
pub use pattern::{name_to_pattern, symbol_to_pattern};
