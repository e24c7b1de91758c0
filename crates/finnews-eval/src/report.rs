//! Descriptive statistics of sentiment against forward returns.

use std::collections::BTreeSet;

use finnews_returns::HORIZONS;
use finnews_traits::stats::{Summary, finite_pairs, pearson, summarize};
use finnews_traits::{SentimentLabel, Timestamp};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::ic::calculate_ic;
use crate::join::ModelRow;

/// Minimum number of pairs for a correlation or IC to be reported.
pub const MIN_CORRELATION_PAIRS: usize = 3;

/// Sentiment/return association for one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonStats {
    /// Horizon in calendar days.
    pub horizon: u32,
    /// Rows with both a sentiment and a non-null return.
    pub n: usize,
    /// Pearson correlation, when at least [`MIN_CORRELATION_PAIRS`] pairs exist.
    pub pearson: Option<f64>,
    /// Spearman rank IC, when at least [`MIN_CORRELATION_PAIRS`] pairs exist.
    pub ic: Option<f64>,
}

/// Forward return summary for one sentiment label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStats {
    /// Sentiment bucket.
    pub label: SentimentLabel,
    /// Rows in the bucket.
    pub count: usize,
    /// Return summary per horizon, in [`HORIZONS`] order.
    pub returns: [Summary; 3],
}

/// Summary of a joined sentiment/return dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentReport {
    /// Joined rows.
    pub rows: usize,
    /// Distinct tickers.
    pub tickers: usize,
    /// Earliest and latest publication timestamp.
    pub published_range: Option<(Timestamp, Timestamp)>,
    /// One entry per horizon.
    pub horizons: Vec<HorizonStats>,
    /// One entry per label, in [`SentimentLabel::ALL`] order.
    pub labels: Vec<LabelStats>,
}

impl SentimentReport {
    /// Compute the report.
    pub fn build(rows: &[ModelRow]) -> Self {
        let tickers: BTreeSet<&str> = rows.iter().map(|r| r.ticker.as_str()).collect();
        let published_range = rows
            .iter()
            .map(|r| r.published_at)
            .min()
            .zip(rows.iter().map(|r| r.published_at).max());

        let sentiment: Vec<f64> = rows.iter().map(|r| r.sentiment).collect();
        let scores = Array1::from(sentiment.clone());
        let horizons = HORIZONS
            .iter()
            .enumerate()
            .map(|(i, &horizon)| {
                let returns: Vec<f64> = rows.iter().map(|r| r.returns()[i]).collect();
                let n = finite_pairs(&sentiment, &returns).len();
                let enough = n >= MIN_CORRELATION_PAIRS;
                HorizonStats {
                    horizon,
                    n,
                    pearson: enough
                        .then(|| pearson(&sentiment, &returns))
                        .filter(|c| c.is_finite()),
                    ic: enough
                        .then(|| calculate_ic(&scores, &Array1::from(returns)))
                        .filter(|c| c.is_finite()),
                }
            })
            .collect();

        let labels = SentimentLabel::ALL
            .iter()
            .map(|&label| {
                let bucket: Vec<&ModelRow> = rows.iter().filter(|r| r.label() == label).collect();
                let returns = std::array::from_fn(|i| {
                    let values: Vec<f64> = bucket.iter().map(|r| r.returns()[i]).collect();
                    summarize(&values)
                });
                LabelStats {
                    label,
                    count: bucket.len(),
                    returns,
                }
            })
            .collect();

        Self {
            rows: rows.len(),
            tickers: tickers.len(),
            published_range,
            horizons,
            labels,
        }
    }

    /// Whether the report covers no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
