//! Enrich command implementation.

use anyhow::Result;
use finnews_store::article_queries::{fetch_articles, update_tickers};
use finnews_tagger::{EnrichOptions, TickerMatcher, enrich_articles};
use tracing::warn;

use super::{banner, load_tickers, open_store};
use crate::settings::Settings;

/// Tag stored articles and persist the changed ticker fields.
pub(crate) async fn enrich(
    settings: &Settings,
    only_missing: bool,
    use_body_text: bool,
    limit: Option<usize>,
) -> Result<()> {
    banner("Ticker Enrichment");

    let config = load_tickers(settings)?;
    let matcher = TickerMatcher::new(&config);
    let pool = open_store(settings).await?;

    println!("Tickers:   {} ({} with rules)", config.universe.len(), matcher.len());
    println!("Mode:      {}", if only_missing { "untagged only" } else { "all articles" });
    println!("Body text: {}", if use_body_text { "yes" } else { "no" });
    println!();

    let options = EnrichOptions {
        only_missing,
        use_body_text,
        limit,
    };
    let mut articles = fetch_articles(&pool, only_missing, limit).await?;
    let outcome = enrich_articles(&matcher, &mut articles, &options);

    let mut written = 0;
    for update in &outcome.updates {
        match update_tickers(&pool, update.article_id, &update.tickers).await {
            Ok(()) => written += 1,
            Err(e) => warn!(article_id = update.article_id, "failed to store tickers: {e}"),
        }
    }

    println!("Processed: {}", outcome.processed);
    println!("Updated:   {written}");
    println!();
    Ok(())
}
