//! Tagging a collection of stored articles.
//!
//! The driver recomputes the ticker field of each selected article and records
//! an update only when the new value differs from the stored one, so rerunning
//! with the same configuration produces no writes.

use finnews_traits::Article;
use tracing::info;

use crate::matcher::TickerMatcher;

/// Which articles to tag and which text to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Only process articles whose ticker field is empty.
    pub only_missing: bool,
    /// Search the body text in addition to title and summary.
    pub use_body_text: bool,
    /// Process at most this many articles.
    pub limit: Option<usize>,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            only_missing: true,
            use_body_text: true,
            limit: None,
        }
    }
}

/// A changed ticker field to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerUpdate {
    /// Article storage id.
    pub article_id: i64,
    /// New comma-joined ticker value.
    pub tickers: String,
}

/// Result of an enrichment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichOutcome {
    /// Articles examined.
    pub processed: usize,
    /// Articles whose ticker field changed.
    pub updates: Vec<TickerUpdate>,
}

impl EnrichOutcome {
    /// Number of changed articles.
    pub fn updated(&self) -> usize {
        self.updates.len()
    }
}

/// Tag `articles` in place and report which ones changed.
///
/// Each article is independent; the order of processing does not affect the
/// result.
pub fn enrich_articles(
    matcher: &TickerMatcher,
    articles: &mut [Article],
    options: &EnrichOptions,
) -> EnrichOutcome {
    let mut outcome = EnrichOutcome::default();
    let limit = options.limit.unwrap_or(usize::MAX);

    let selected = articles
        .iter_mut()
        .filter(|a| !options.only_missing || !a.has_tickers())
        .take(limit);

    for article in selected {
        outcome.processed += 1;

        let tagged = matcher.tag(&article.search_text(options.use_body_text));
        if tagged != article.tickers {
            article.tickers.clone_from(&tagged);
            outcome.updates.push(TickerUpdate {
                article_id: article.id,
                tickers: tagged,
            });
        }
    }

    info!(
        updated = outcome.updated(),
        processed = outcome.processed,
        "enriched articles with tickers"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TickerConfig;

    fn article(id: i64, title: &str, text: &str, tickers: &str) -> Article {
        Article {
            id,
            source: "wire".to_string(),
            url: format!("https://example.com/{id}"),
            title: title.to_string(),
            published_at: None,
            author: String::new(),
            summary: String::new(),
            text: text.to_string(),
            tickers: tickers.to_string(),
        }
    }

    fn matcher() -> TickerMatcher {
        let cfg = TickerConfig::with_universe(["AAPL", "TSLA"])
            .name("AAPL", "Apple")
            .name("TSLA", "Tesla");
        TickerMatcher::new(&cfg)
    }

    #[test]
    fn test_enrich_sets_tickers() {
        let mut articles = vec![
            article(1, "Apple and Tesla rally", "", ""),
            article(2, "Markets flat", "", ""),
        ];
        let outcome = enrich_articles(&matcher(), &mut articles, &EnrichOptions::default());

        assert_eq!(outcome.processed, 2);
        assert_eq!(
            outcome.updates,
            vec![TickerUpdate {
                article_id: 1,
                tickers: "AAPL,TSLA".to_string()
            }]
        );
        assert_eq!(articles[0].tickers, "AAPL,TSLA");
        assert_eq!(articles[1].tickers, "");
    }

    #[test]
    fn test_second_run_writes_nothing() {
        let mut articles = vec![article(1, "Apple climbs", "", "")];
        let m = matcher();

        let first = enrich_articles(&m, &mut articles, &EnrichOptions::default());
        assert_eq!(first.updated(), 1);

        let second = enrich_articles(&m, &mut articles, &EnrichOptions::default());
        assert_eq!(second.processed, 0);
        assert_eq!(second.updated(), 0);

        let all = EnrichOptions {
            only_missing: false,
            ..Default::default()
        };
        let third = enrich_articles(&m, &mut articles, &all);
        assert_eq!(third.processed, 1);
        assert_eq!(third.updated(), 0);
    }

    #[test]
    fn test_reprocess_all_overwrites_stale_value() {
        let mut articles = vec![article(7, "Tesla recalls cars", "", "AAPL")];
        let opts = EnrichOptions {
            only_missing: false,
            ..Default::default()
        };
        let outcome = enrich_articles(&matcher(), &mut articles, &opts);
        assert_eq!(outcome.updates[0].tickers, "TSLA");
        assert_eq!(articles[0].tickers, "TSLA");
    }

    #[test]
    fn test_body_text_toggle() {
        let mut articles = vec![article(1, "Earnings wrap", "Apple beat estimates", "")];
        let opts = EnrichOptions {
            use_body_text: false,
            ..Default::default()
        };
        assert_eq!(enrich_articles(&matcher(), &mut articles, &opts).updated(), 0);
        assert_eq!(
            enrich_articles(&matcher(), &mut articles, &EnrichOptions::default()).updated(),
            1
        );
    }

    #[test]
    fn test_limit() {
        let mut articles: Vec<Article> = (0..5).map(|i| article(i, "Apple", "", "")).collect();
        let opts = EnrichOptions {
            limit: Some(2),
            ..Default::default()
        };
        let outcome = enrich_articles(&matcher(), &mut articles, &opts);
        assert_eq!(outcome.processed, 2);
        assert_eq!(articles.iter().filter(|a| a.has_tickers()).count(), 2);
    }
}
