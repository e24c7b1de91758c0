//! Joining tagged articles with forward returns.

use finnews_traits::{Article, Date, Symbol, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::forward::horizon_returns;
use crate::series::PriceBook;

/// Number of most recent tagged articles shown in diagnostics.
const DIAGNOSTIC_EXAMPLES: usize = 3;

/// One `(article, ticker)` pair with its forward returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    /// Article storage id.
    pub article_id: i64,
    /// Matched ticker.
    pub ticker: Symbol,
    /// Headline.
    pub title: String,
    /// Feed summary.
    pub summary: String,
    /// Publication timestamp.
    pub published_at: Timestamp,
    /// Anchor close date.
    pub p0_date: Option<Date>,
    /// Target close date for the 1-day horizon.
    pub p1_date: Option<Date>,
    /// Target close date for the 2-day horizon.
    pub p2_date: Option<Date>,
    /// Target close date for the 5-day horizon.
    pub p5_date: Option<Date>,
    /// 1-day forward return.
    pub ret_1d: Option<f64>,
    /// 2-day forward return.
    pub ret_2d: Option<f64>,
    /// 5-day forward return.
    pub ret_5d: Option<f64>,
}

impl DatasetRow {
    /// Returns in horizon order, NaN where null.
    pub fn returns(&self) -> [f64; 3] {
        [self.ret_1d, self.ret_2d, self.ret_5d].map(|r| r.unwrap_or(f64::NAN))
    }
}

/// A recently published tagged article, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleExample {
    /// Article storage id.
    pub id: i64,
    /// Publication timestamp.
    pub published_at: Timestamp,
    /// Stored ticker field.
    pub tickers: String,
    /// Headline.
    pub title: String,
}

/// Counts describing the inputs of a build, used to explain empty output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    /// Articles passed to the builder.
    pub articles: usize,
    /// Articles with at least one ticker.
    pub with_tickers: usize,
    /// Tagged articles without a publication timestamp.
    pub missing_published_at: usize,
    /// Tickers referenced by articles but absent from the price book.
    pub tickers_without_prices: Vec<Symbol>,
    /// Earliest and latest price date.
    pub price_range: Option<(Date, Date)>,
    /// Earliest and latest publication timestamp of all dated articles.
    pub article_range: Option<(Timestamp, Timestamp)>,
    /// Most recent tagged articles.
    pub latest: Vec<ArticleExample>,
}

impl Diagnostics {
    fn collect(articles: &[Article], prices: &PriceBook) -> Self {
        let tagged: Vec<&Article> = articles.iter().filter(|a| a.has_tickers()).collect();

        let mut dated: Vec<&Article> = tagged
            .iter()
            .copied()
            .filter(|a| a.published_at.is_some())
            .collect();
        dated.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));

        let article_range = articles
            .iter()
            .filter_map(|a| a.published_at)
            .fold(None, |range: Option<(Timestamp, Timestamp)>, ts| match range {
                Some((lo, hi)) => Some((lo.min(ts), hi.max(ts))),
                None => Some((ts, ts)),
            });

        let mut missing: Vec<Symbol> = tagged
            .iter()
            .flat_map(|a| a.ticker_list())
            .filter(|t| prices.series(t).is_none())
            .map(str::to_string)
            .collect();
        missing.sort();
        missing.dedup();

        let latest = dated
            .iter()
            .take(DIAGNOSTIC_EXAMPLES)
            .filter_map(|a| {
                a.published_at.map(|published_at| ArticleExample {
                    id: a.id,
                    published_at,
                    tickers: a.tickers.clone(),
                    title: a.title.clone(),
                })
            })
            .collect();

        Self {
            articles: articles.len(),
            with_tickers: tagged.len(),
            missing_published_at: tagged.len() - dated.len(),
            tickers_without_prices: missing,
            price_range: prices.date_range(),
            article_range,
            latest,
        }
    }

    fn log(&self) {
        warn!(
            articles = self.articles,
            with_tickers = self.with_tickers,
            missing_published_at = self.missing_published_at,
            "dataset is empty"
        );
        match self.price_range {
            Some((lo, hi)) => warn!(%lo, %hi, "price date range"),
            None => warn!("no prices loaded"),
        }
        match self.article_range {
            Some((lo, hi)) => warn!(%lo, %hi, "article date range"),
            None => warn!("no articles with a publication date"),
        }
        if !self.tickers_without_prices.is_empty() {
            warn!(tickers = ?self.tickers_without_prices, "tickers without prices");
        }
        for ex in &self.latest {
            warn!(id = ex.id, published_at = %ex.published_at, tickers = %ex.tickers, "{}", ex.title);
        }
    }
}

/// Output of a dataset build.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Rows sorted by `(ticker, published_at)`.
    pub rows: Vec<DatasetRow>,
    /// Input counts.
    pub diagnostics: Diagnostics,
}

impl Dataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the build produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds [`DatasetRow`]s from tagged articles and a [`PriceBook`].
#[derive(Debug, Clone, Copy)]
pub struct DatasetBuilder<'a> {
    prices: &'a PriceBook,
}

impl<'a> DatasetBuilder<'a> {
    /// Create a builder over loaded prices.
    pub fn new(prices: &'a PriceBook) -> Self {
        Self { prices }
    }

    /// Emit one row per `(article, ticker)` pair with at least one return.
    ///
    /// Articles without tickers or a timestamp, and tickers without prices,
    /// are skipped. An empty result is not an error; the diagnostics explain
    /// it.
    pub fn build(&self, articles: &[Article]) -> Dataset {
        let diagnostics = Diagnostics::collect(articles, self.prices);

        let mut rows = Vec::new();
        if !articles.is_empty() && !self.prices.is_empty() {
            for article in articles {
                rows.extend(self.rows_for(article));
            }
        }

        rows.sort_by(|a, b| {
            a.ticker
                .cmp(&b.ticker)
                .then(a.published_at.cmp(&b.published_at))
        });

        if rows.is_empty() {
            diagnostics.log();
        } else {
            info!(
                rows = rows.len(),
                articles = diagnostics.with_tickers,
                "built dataset"
            );
        }

        Dataset { rows, diagnostics }
    }

    fn rows_for<'b>(&'b self, article: &'b Article) -> impl Iterator<Item = DatasetRow> + 'b {
        let published_at = article.published_at;
        article
            .ticker_list()
            .into_iter()
            .filter_map(move |ticker| {
                let published_at = published_at?;
                let series = self.prices.series(ticker)?;
                let r = horizon_returns(series, published_at.date());
                if r.all_null() {
                    return None;
                }
                let [h1, h2, h5] = r.horizons;
                Some(DatasetRow {
                    article_id: article.id,
                    ticker: ticker.to_string(),
                    title: article.title.clone(),
                    summary: article.summary.clone(),
                    published_at,
                    p0_date: r.p0_date,
                    p1_date: h1.target_date,
                    p2_date: h2.target_date,
                    p5_date: h5.target_date,
                    ret_1d: h1.value,
                    ret_2d: h2.value,
                    ret_5d: h5.value,
                })
            })
    }
}
