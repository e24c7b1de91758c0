//! Headline sentiment scoring with VADER.

use finnews_traits::{Article, SentimentScorer};
use serde::{Deserialize, Serialize};
use tracing::info;
use vader_sentiment::SentimentIntensityAnalyzer;

/// VADER compound score of a text.
///
/// The compound score is already normalized to `[-1, 1]`; blank text scores
/// exactly zero.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    /// Create a scorer with the bundled VADER lexicon.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VaderScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaderScorer").finish_non_exhaustive()
    }
}

impl SentimentScorer for VaderScorer {
    fn name(&self) -> &str {
        "vader"
    }

    fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        scores.get("compound").copied().unwrap_or(0.0)
    }
}

/// Sentiment of one article's headline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArticleSentiment {
    /// Article storage id.
    pub article_id: i64,
    /// Score of title plus summary.
    pub sentiment: f64,
}

/// Score every tagged, dated article.
///
/// Untagged or undated articles can never reach the dataset and are skipped.
pub fn score_articles(scorer: &dyn SentimentScorer, articles: &[Article]) -> Vec<ArticleSentiment> {
    let scored: Vec<ArticleSentiment> = articles
        .iter()
        .filter(|a| a.has_tickers() && a.published_at.is_some())
        .map(|a| ArticleSentiment {
            article_id: a.id,
            sentiment: scorer.score(&a.headline_text()),
        })
        .collect();

    info!(scorer = scorer.name(), scored = scored.len(), "scored headlines");
    scored
}
