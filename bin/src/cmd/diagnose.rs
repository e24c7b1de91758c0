//! Diagnose command implementation.

use anyhow::Result;
use finnews_store::article_queries::{
    count_articles, count_articles_by_source, count_tagged, latest_articles,
};

use super::{banner, clip, open_store, section};
use crate::settings::Settings;

/// Print article counts and the most recent articles.
pub(crate) async fn diagnose(settings: &Settings, latest: usize) -> Result<()> {
    banner("Article Diagnostics");

    let pool = open_store(settings).await?;

    println!("Articles:      {}", count_articles(&pool).await?);
    println!("With tickers:  {}", count_tagged(&pool).await?);
    println!();

    section("BY SOURCE");
    for (source, n) in count_articles_by_source(&pool).await? {
        let source = if source.is_empty() { "(none)".to_string() } else { source };
        println!("{:<30} {:>8}", clip(&source, 30), n);
    }
    println!();

    section(&format!("LATEST {latest}"));
    for a in latest_articles(&pool, latest).await? {
        let published = a
            .published_at
            .map_or_else(|| "-".to_string(), |ts| ts.to_string());
        let tickers = if a.has_tickers() { a.tickers.as_str() } else { "-" };
        println!("{:>6}  {:<19}  {:<14} {}", a.id, published, clip(tickers, 14), clip(&a.title, 60));
    }
    println!();
    Ok(())
}
