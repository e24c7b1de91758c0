//! Fetch-prices command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, Utc};
use finnews_fmp::FmpClient;
use finnews_store::price_queries::insert_prices;
use tracing::warn;

use super::{banner, load_tickers, open_store, section};
use crate::settings::Settings;

/// Inclusive request window ending today.
pub(crate) fn lookback_window(today: NaiveDate, lookback_days: u32) -> (NaiveDate, NaiveDate) {
    let from = today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN);
    (from, today)
}

/// Fetch and store daily bars for every ticker in the universe.
///
/// Tickers are fetched one at a time with a fixed pause in between. A ticker
/// that fails is logged and skipped.
pub(crate) async fn fetch_prices(settings: &Settings, lookback_days: u32, delay_ms: u64) -> Result<()> {
    banner("Fetch Daily Prices");

    let config = load_tickers(settings)?;
    let client = FmpClient::from_env().context("creating price client")?;
    let pool = open_store(settings).await?;

    let (from, to) = lookback_window(Utc::now().date_naive(), lookback_days);
    println!("Tickers:   {}", config.universe.len());
    println!("Window:    {from} .. {to}");
    println!();

    section("TICKERS");
    println!("{:<10} {:>8} {:>10}", "Ticker", "Bars", "Inserted");
    println!("{}", "─".repeat(30));

    let mut total = 0;
    for (i, ticker) in config.universe.iter().enumerate() {
        if i > 0 && delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        let bars = match client.daily_prices(ticker, from, to).await {
            Ok(out) => out.points,
            Err(e) => {
                warn!(ticker = %ticker, "price fetch failed: {e}");
                println!("{ticker:<10} {:>8} {:>10}", "failed", "-");
                continue;
            }
        };

        let inserted = insert_prices(&pool, &bars).await?;
        total += inserted;
        println!("{ticker:<10} {:>8} {inserted:>10}", bars.len());
    }

    println!();
    println!("Inserted {total} new price rows.");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookback_window() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let (from, to) = lookback_window(today, 365);
        assert_eq!(to, today);
        assert_eq!(from, NaiveDate::from_ymd_opt(2023, 3, 2).unwrap());
    }
}
