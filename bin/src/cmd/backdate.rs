//! Backdate command implementation.

use anyhow::{Result, bail};
use finnews_store::article_queries::shift_published_at;

use super::{banner, clip, open_store};
use crate::settings::Settings;

/// Move the latest tagged articles back so their forward returns exist.
pub(crate) async fn backdate(settings: &Settings, days: i64, limit: usize) -> Result<()> {
    banner("Backdate Articles");

    if days <= 0 {
        bail!("--days must be positive, got {days}");
    }

    let pool = open_store(settings).await?;
    let shifted = shift_published_at(&pool, days, limit).await?;

    if shifted.is_empty() {
        println!("No eligible articles (need tickers and a publication date).\n");
        return Ok(());
    }

    for a in &shifted {
        let published = a.published_at.map(|ts| ts.to_string()).unwrap_or_default();
        println!("{:>6}  {published:<19}  {:<14} {}", a.id, a.tickers, clip(&a.title, 50));
    }
    println!("\nBackdated {} article(s) by {days} day(s).\n", shifted.len());
    Ok(())
}
