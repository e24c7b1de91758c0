//! Build-dataset command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use finnews_returns::{
    Dataset, DatasetBuilder, Diagnostics, HORIZONS, PriceBook, dataset_frame, write_frame,
};
use finnews_store::SqlitePool;
use finnews_store::article_queries::fetch_articles;
use finnews_store::price_queries::fetch_prices;
use finnews_traits::Article;

use super::{banner, clip, open_store, section};
use crate::settings::Settings;

/// Load every article and price and build the dataset.
pub(crate) async fn load_dataset(pool: &SqlitePool) -> Result<(Vec<Article>, Dataset)> {
    let articles = fetch_articles(pool, false, None).await?;
    let book = PriceBook::from_points(fetch_prices(pool).await?);
    let dataset = DatasetBuilder::new(&book).build(&articles);
    Ok((articles, dataset))
}

/// Print why a dataset came out empty.
pub(crate) fn print_diagnostics(diag: &Diagnostics) {
    section("DATASET IS EMPTY");
    println!("Articles:              {}", diag.articles);
    println!("With tickers:          {}", diag.with_tickers);
    println!("Missing published_at:  {}", diag.missing_published_at);
    match diag.price_range {
        Some((lo, hi)) => println!("Price dates:           {lo} .. {hi}"),
        None => println!("Price dates:           no prices loaded"),
    }
    match diag.article_range {
        Some((lo, hi)) => println!("Article dates:         {lo} .. {hi}"),
        None => println!("Article dates:         no dated articles"),
    }
    if !diag.tickers_without_prices.is_empty() {
        println!("Tickers w/o prices:    {}", diag.tickers_without_prices.join(", "));
    }
    if !diag.latest.is_empty() {
        println!("\nLatest tagged articles:");
        for ex in &diag.latest {
            println!("  {:>6}  {}  {:<12} {}", ex.id, ex.published_at, ex.tickers, clip(&ex.title, 50));
        }
    }
    println!();
    println!("Articles newer than the last price have no forward returns yet.");
    println!();
}

/// Build the dataset and write it to disk.
pub(crate) async fn build_dataset(settings: &Settings, out: Option<PathBuf>) -> Result<()> {
    banner("Build Dataset");

    let pool = open_store(settings).await?;
    let (_, dataset) = load_dataset(&pool).await?;

    if dataset.is_empty() {
        print_diagnostics(&dataset.diagnostics);
        return Ok(());
    }

    let out = out.unwrap_or_else(|| settings.data_file("dataset.parquet"));
    let mut df = dataset_frame(&dataset.rows)?;
    write_frame(&mut df, &out).with_context(|| format!("writing {}", out.display()))?;

    let mut defined = [0usize; 3];
    for row in &dataset.rows {
        for (count, ret) in defined.iter_mut().zip(row.returns()) {
            if ret.is_finite() {
                *count += 1;
            }
        }
    }

    section("DATASET");
    println!("Rows:      {}", dataset.len());
    for (h, count) in HORIZONS.iter().zip(defined) {
        println!("ret_{h}d:    {count} non-null");
    }
    println!("Output:    {}", out.display());
    println!();
    Ok(())
}
