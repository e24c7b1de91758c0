//! Sentiment scoring seam.
//!
//! The pipeline treats sentiment as an opaque function from text to a score in
//! `[-1, 1]`. Implementations live in `finnews-eval`; anything that can turn
//! a headline into a scalar can be plugged in here.

use serde::{Deserialize, Serialize};

/// Scores free text on a `[-1, 1]` scale.
///
/// Implementations should be thread-safe (`Send + Sync`) so a scorer can be
/// shared across stages.
///
/// # Example
///
/// ```
/// use finnews_traits::SentimentScorer;
///
/// struct AlwaysNeutral;
///
/// impl SentimentScorer for AlwaysNeutral {
///     fn name(&self) -> &str {
///         "neutral"
///     }
///
///     fn score(&self, _text: &str) -> f64 {
///         0.0
///     }
/// }
///
/// assert_eq!(AlwaysNeutral.score("Shares soar"), 0.0);
/// ```
pub trait SentimentScorer: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Sentiment of `text`, in `[-1, 1]`.
    fn score(&self, text: &str) -> f64;
}

/// Coarse sentiment bucket derived from a score's sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Score below zero.
    Negative,
    /// Score exactly zero.
    Neutral,
    /// Score above zero.
    Positive,
}

impl SentimentLabel {
    /// All labels in report order.
    pub const ALL: [Self; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// Bucket a score by sign.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
