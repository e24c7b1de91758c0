//! Queries over the `prices` table.

use chrono::NaiveDate;
use finnews_traits::PricePoint;
use sqlx::{FromRow, SqlitePool};
use tracing::warn;

use crate::{InsertOutcome, Result, is_unique_violation};

#[derive(Debug, FromRow)]
struct PriceRow {
    ticker: String,
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    adj_close: f64,
    volume: i64,
}

impl From<PriceRow> for PricePoint {
    fn from(r: PriceRow) -> Self {
        Self {
            ticker: r.ticker,
            date: r.date,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            adj_close: r.adj_close,
            volume: r.volume,
        }
    }
}

/// Store one daily bar.
///
/// An existing `(ticker, date)` row is kept and [`InsertOutcome::Duplicate`]
/// is returned.
pub async fn insert_price(pool: &SqlitePool, p: &PricePoint) -> Result<InsertOutcome> {
    let res = sqlx::query(
        "INSERT INTO prices (ticker, date, open, high, low, close, adj_close, volume)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&p.ticker)
    .bind(p.date)
    .bind(p.open)
    .bind(p.high)
    .bind(p.low)
    .bind(p.close)
    .bind(p.adj_close)
    .bind(p.volume)
    .execute(pool)
    .await;

    match res {
        Ok(done) => Ok(InsertOutcome::Inserted(done.last_insert_rowid())),
        Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::Duplicate),
        Err(e) => Err(e.into()),
    }
}

/// Store many bars; returns how many were new.
///
/// Rows that fail for reasons other than a duplicate key are logged and
/// skipped.
pub async fn insert_prices(pool: &SqlitePool, points: &[PricePoint]) -> Result<usize> {
    let mut inserted = 0;
    for p in points {
        match insert_price(pool, p).await {
            Ok(outcome) if outcome.is_inserted() => inserted += 1,
            Ok(_) => {}
            Err(e) => warn!(ticker = %p.ticker, date = %p.date, "skipping price row: {e}"),
        }
    }
    Ok(inserted)
}

/// All stored bars, ordered by ticker then date.
pub async fn fetch_prices(pool: &SqlitePool) -> Result<Vec<PricePoint>> {
    let rows = sqlx::query_as::<_, PriceRow>(
        "SELECT ticker, date, open, high, low, close, adj_close, volume
         FROM prices
         ORDER BY ticker, date",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(PricePoint::from).collect())
}

/// Stored bars for one ticker, oldest first.
pub async fn fetch_prices_for(pool: &SqlitePool, ticker: &str) -> Result<Vec<PricePoint>> {
    let rows = sqlx::query_as::<_, PriceRow>(
        "SELECT ticker, date, open, high, low, close, adj_close, volume
         FROM prices
         WHERE ticker = ?
         ORDER BY date",
    )
    .bind(ticker)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(PricePoint::from).collect())
}

/// Earliest and latest stored date across all tickers.
pub async fn price_date_range(pool: &SqlitePool) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let (lo, hi): (Option<NaiveDate>, Option<NaiveDate>) =
        sqlx::query_as("SELECT MIN(date), MAX(date) FROM prices")
            .fetch_one(pool)
            .await?;
    Ok(lo.zip(hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_pool;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_duplicate_keeps_first() {
        let pool = memory_pool().await;
        let first = insert_price(&pool, &PricePoint::from_close("TSLA", d(2), 250.0))
            .await
            .unwrap();
        assert!(first.is_inserted());

        let dup = insert_price(&pool, &PricePoint::from_close("TSLA", d(2), 999.0))
            .await
            .unwrap();
        assert_eq!(dup, InsertOutcome::Duplicate);

        let stored = fetch_prices_for(&pool, "TSLA").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].close, 250.0);
    }

    #[tokio::test]
    async fn test_bulk_insert_and_ordering() {
        let pool = memory_pool().await;
        let points = vec![
            PricePoint::from_close("TSLA", d(3), 3.0),
            PricePoint::from_close("AAPL", d(2), 2.0),
            PricePoint::from_close("TSLA", d(1), 1.0),
            PricePoint::from_close("TSLA", d(1), 1.5),
        ];
        assert_eq!(insert_prices(&pool, &points).await.unwrap(), 3);

        let all = fetch_prices(&pool).await.unwrap();
        let keys: Vec<(&str, NaiveDate)> = all.iter().map(|p| (p.ticker.as_str(), p.date)).collect();
        assert_eq!(keys, vec![("AAPL", d(2)), ("TSLA", d(1)), ("TSLA", d(3))]);
        assert_eq!(price_date_range(&pool).await.unwrap(), Some((d(1), d(3))));
    }

    #[tokio::test]
    async fn test_empty_range() {
        let pool = memory_pool().await;
        assert_eq!(price_date_range(&pool).await.unwrap(), None);
        assert!(fetch_prices(&pool).await.unwrap().is_empty());
    }
}
