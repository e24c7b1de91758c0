//! Init-db command implementation.

use anyhow::Result;
use finnews_store::article_queries::count_articles;
use finnews_store::price_queries::price_date_range;

use super::{banner, open_store};
use crate::settings::Settings;

/// Create the database and its tables if they do not exist.
pub(crate) async fn init_db(settings: &Settings) -> Result<()> {
    banner("Initialize Database");

    let pool = open_store(settings).await?;
    let articles = count_articles(&pool).await?;
    let range = price_date_range(&pool).await?;

    println!("Database:  {}", settings.database_url);
    println!("Articles:  {articles}");
    match range {
        Some((lo, hi)) => println!("Prices:    {lo} .. {hi}"),
        None => println!("Prices:    none"),
    }
    println!("\nSchema ready.\n");
    Ok(())
}
