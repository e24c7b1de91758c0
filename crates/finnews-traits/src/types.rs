//! Common types used throughout the finnews pipeline.
//!
//! Articles carry their matched tickers as a comma-joined, alphabetically
//! sorted string (empty when nothing matched). Prices are daily bars keyed by
//! `(ticker, date)`.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{FinnewsError, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// Publication timestamp of an article (naive, as stored).
pub type Timestamp = NaiveDateTime;

/// A ticker symbol such as `"TSLA"`.
pub type Symbol = String;

/// Separator used when joining matched tickers into the stored field.
pub const TICKER_SEPARATOR: char = ',';

/// A stored news article.
///
/// `tickers` starts empty on ingest and is filled in by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Storage identifier.
    pub id: i64,
    /// Name of the feed or outlet the article came from.
    pub source: String,
    /// Canonical link; unique across the store.
    pub url: String,
    /// Headline.
    pub title: String,
    /// Publication timestamp, when known.
    pub published_at: Option<Timestamp>,
    /// Author, if known.
    pub author: String,
    /// Feed summary.
    pub summary: String,
    /// Full body text, if available.
    pub text: String,
    /// Comma-joined sorted ticker symbols, empty when none matched.
    pub tickers: String,
}

impl Article {
    /// Matched ticker symbols, in stored order.
    pub fn ticker_list(&self) -> Vec<&str> {
        split_tickers(&self.tickers)
    }

    /// Whether the matcher tagged this article with at least one ticker.
    pub fn has_tickers(&self) -> bool {
        !self.tickers.trim().is_empty()
    }

    /// Calendar day of publication, time-of-day discarded.
    pub fn published_date(&self) -> Option<Date> {
        self.published_at.map(|ts| ts.date())
    }

    /// Text the matcher searches: title and summary, plus the body if requested.
    pub fn search_text(&self, use_body_text: bool) -> String {
        let mut parts = vec![self.title.as_str(), self.summary.as_str()];
        if use_body_text {
            parts.push(self.text.as_str());
        }
        parts.join(" ")
    }

    /// Headline plus summary, trimmed; the text scored for sentiment.
    pub fn headline_text(&self) -> String {
        format!("{} {}", self.title, self.summary).trim().to_string()
    }
}

/// An article as read from an ingest source, before it has a storage id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewArticle {
    /// Name of the feed or outlet.
    pub source: String,
    /// Canonical link.
    pub url: String,
    /// Headline.
    pub title: String,
    /// Publication timestamp as text; parsed with [`parse_timestamp`].
    pub published_at: Option<String>,
    /// Author, if known.
    pub author: String,
    /// Feed summary.
    pub summary: String,
    /// Full body text.
    pub text: String,
}

impl NewArticle {
    /// Clamp fields to the widths the store accepts.
    #[must_use]
    pub fn truncated(mut self) -> Self {
        self.url = truncate_chars(&self.url, 1024);
        self.title = truncate_chars(&self.title, 1024);
        self.author = truncate_chars(&self.author, 256);
        self
    }
}

/// One daily bar for a ticker.
///
/// `(ticker, date)` is unique in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Trading day.
    pub date: Date,
    /// Opening price.
    pub open: f64,
    /// Daily high.
    pub high: f64,
    /// Daily low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Adjusted close; equals `close` when the source had none.
    pub adj_close: f64,
    /// Traded volume.
    pub volume: i64,
}

impl PricePoint {
    /// A bar with only a close; all other prices mirror the close.
    pub fn from_close(ticker: impl Into<Symbol>, date: Date, close: f64) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            open: close,
            high: close,
            low: close,
            close,
            adj_close: close,
            volume: 0,
        }
    }
}

/// Split a stored ticker field into its symbols, ignoring blanks.
pub fn split_tickers(field: &str) -> Vec<&str> {
    field
        .split(TICKER_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Join symbols into the stored ticker field format.
pub fn join_tickers<S: AsRef<str>>(symbols: &[S]) -> String {
    symbols
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&TICKER_SEPARATOR.to_string())
}

/// Parse a publication timestamp.
///
/// Accepts RFC 3339 (converted to UTC), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` (optionally with fractional seconds), and bare
/// `YYYY-MM-DD` dates (midnight).
pub fn parse_timestamp(raw: &str) -> Result<Timestamp> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    Date::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| FinnewsError::InvalidDate(raw.to_string()))
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
