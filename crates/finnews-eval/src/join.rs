//! Attaching headline sentiment to dataset rows.

use std::collections::HashMap;

use finnews_returns::DatasetRow;
use finnews_traits::{Result, SentimentLabel, Symbol, Timestamp};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sentiment::ArticleSentiment;

/// A dataset row with the sentiment of its article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRow {
    /// Article storage id.
    pub article_id: i64,
    /// Matched ticker.
    pub ticker: Symbol,
    /// Headline.
    pub title: String,
    /// Publication timestamp.
    pub published_at: Timestamp,
    /// Headline sentiment in `[-1, 1]`.
    pub sentiment: f64,
    /// 1-day forward return.
    pub ret_1d: Option<f64>,
    /// 2-day forward return.
    pub ret_2d: Option<f64>,
    /// 5-day forward return.
    pub ret_5d: Option<f64>,
}

impl ModelRow {
    /// Sign bucket of the sentiment.
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_score(self.sentiment)
    }

    /// Returns in horizon order, NaN where null.
    pub fn returns(&self) -> [f64; 3] {
        [self.ret_1d, self.ret_2d, self.ret_5d].map(|r| r.unwrap_or(f64::NAN))
    }
}

/// Inner join of dataset rows and article sentiment on `article_id`.
///
/// Rows whose article has no score, or a non-finite score, are dropped. Row
/// order follows `rows`.
pub fn join_sentiment(rows: &[DatasetRow], sentiments: &[ArticleSentiment]) -> Vec<ModelRow> {
    let by_article: HashMap<i64, f64> = sentiments
        .iter()
        .filter(|s| s.sentiment.is_finite())
        .map(|s| (s.article_id, s.sentiment))
        .collect();

    let joined: Vec<ModelRow> = rows
        .iter()
        .filter_map(|r| {
            let sentiment = *by_article.get(&r.article_id)?;
            Some(ModelRow {
                article_id: r.article_id,
                ticker: r.ticker.clone(),
                title: r.title.clone(),
                published_at: r.published_at,
                sentiment,
                ret_1d: r.ret_1d,
                ret_2d: r.ret_2d,
                ret_5d: r.ret_5d,
            })
        })
        .collect();

    debug!(
        dataset = rows.len(),
        scored = by_article.len(),
        joined = joined.len(),
        "joined sentiment"
    );
    joined
}

/// Convert joined rows into a DataFrame.
pub fn model_frame(rows: &[ModelRow]) -> Result<DataFrame> {
    let df = df! {
        "article_id" => rows.iter().map(|r| r.article_id).collect::<Vec<_>>(),
        "ticker" => rows.iter().map(|r| r.ticker.as_str()).collect::<Vec<_>>(),
        "title" => rows.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
        "published_at" => rows.iter().map(|r| r.published_at).collect::<Vec<_>>(),
        "sentiment" => rows.iter().map(|r| r.sentiment).collect::<Vec<_>>(),
        "label" => rows.iter().map(|r| r.label().as_str()).collect::<Vec<_>>(),
        "ret_1d" => rows.iter().map(|r| r.ret_1d).collect::<Vec<_>>(),
        "ret_2d" => rows.iter().map(|r| r.ret_2d).collect::<Vec<_>>(),
        "ret_5d" => rows.iter().map(|r| r.ret_5d).collect::<Vec<_>>(),
    }?;
    Ok(df)
}
