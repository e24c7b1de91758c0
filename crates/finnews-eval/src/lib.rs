//! Sentiment scoring and evaluation for finnews.
//!
//! This crate relates headline sentiment to the forward returns that followed:
//! - [`VaderScorer`] scores headlines with the VADER compound score
//! - [`join_sentiment`] attaches scores to dataset rows
//! - [`SentimentReport`] summarizes correlations and per-label returns
//! - [`calculate_ic`] computes the Spearman rank IC
//!
//! # Example
//!
//! ```rust,ignore
//! use finnews_eval::{SentimentReport, VaderScorer, join_sentiment, score_articles};
//!
//! let scores = score_articles(&VaderScorer::new(), &articles);
//! let joined = join_sentiment(&dataset.rows, &scores);
//! let report = SentimentReport::build(&joined);
//! ```

pub mod ic;
pub mod join;
pub mod report;
pub mod sentiment;

// Re-export main types
pub use ic::{calculate_ic, rank_ic};
pub use join::{ModelRow, join_sentiment, model_frame};
pub use report::{HorizonStats, LabelStats, MIN_CORRELATION_PAIRS, SentimentReport};
pub use sentiment::{ArticleSentiment, VaderScorer, score_articles};
