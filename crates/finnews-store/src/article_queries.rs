//! Queries over the `articles` table.

use chrono::{Duration, NaiveDateTime};
use finnews_traits::types::parse_timestamp;
use finnews_traits::{Article, NewArticle};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

use crate::{InsertOutcome, Result, StoreError, is_unique_violation};

const ARTICLE_COLUMNS: &str = "id, source, url, title, published_at, author, summary, text, tickers";

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    source: String,
    url: String,
    title: String,
    published_at: Option<NaiveDateTime>,
    author: String,
    summary: String,
    text: String,
    tickers: String,
}

impl From<ArticleRow> for Article {
    fn from(r: ArticleRow) -> Self {
        Self {
            id: r.id,
            source: r.source,
            url: r.url,
            title: r.title,
            published_at: r.published_at,
            author: r.author,
            summary: r.summary,
            text: r.text,
            tickers: r.tickers,
        }
    }
}

/// Store a new article with an empty ticker field.
///
/// Fields are clamped to the column widths first. An unparseable
/// `published_at` is stored as null. A URL that already exists yields
/// [`InsertOutcome::Duplicate`].
pub async fn insert_article(pool: &SqlitePool, article: &NewArticle) -> Result<InsertOutcome> {
    let a = article.clone().truncated();
    let published_at = a.published_at.as_deref().and_then(|raw| {
        parse_timestamp(raw)
            .map_err(|e| warn!(url = %a.url, "unparseable published_at: {e}"))
            .ok()
    });

    let res = sqlx::query(
        "INSERT INTO articles (source, url, title, published_at, author, summary, text, tickers)
         VALUES (?, ?, ?, ?, ?, ?, ?, '')",
    )
    .bind(&a.source)
    .bind(&a.url)
    .bind(&a.title)
    .bind(published_at)
    .bind(&a.author)
    .bind(&a.summary)
    .bind(&a.text)
    .execute(pool)
    .await;

    match res {
        Ok(done) => Ok(InsertOutcome::Inserted(done.last_insert_rowid())),
        Err(e) if is_unique_violation(&e) => {
            debug!(url = %a.url, "duplicate article");
            Ok(InsertOutcome::Duplicate)
        }
        Err(e) => Err(e.into()),
    }
}

/// Articles in id order; only untagged ones when `only_missing`.
pub async fn fetch_articles(
    pool: &SqlitePool,
    only_missing: bool,
    limit: Option<usize>,
) -> Result<Vec<Article>> {
    let filter = if only_missing { "WHERE tickers = ''" } else { "" };
    let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles {filter} ORDER BY id LIMIT ?");

    let rows = sqlx::query_as::<_, ArticleRow>(&sql)
        .bind(limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX)))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Article::from).collect())
}

/// Overwrite the ticker field of one article.
pub async fn update_tickers(pool: &SqlitePool, id: i64, tickers: &str) -> Result<()> {
    sqlx::query("UPDATE articles SET tickers = ? WHERE id = ?")
        .bind(tickers)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Total number of articles.
pub async fn count_articles(pool: &SqlitePool) -> Result<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Number of articles with at least one ticker.
pub async fn count_tagged(pool: &SqlitePool) -> Result<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles WHERE tickers != ''")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Article counts per source, largest first.
pub async fn count_articles_by_source(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as(
        "SELECT source, COUNT(*) AS n FROM articles GROUP BY source ORDER BY n DESC, source",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// The `n` most recently published articles; undated ones last.
pub async fn latest_articles(pool: &SqlitePool, n: usize) -> Result<Vec<Article>> {
    let sql = format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles
         ORDER BY published_at IS NULL, published_at DESC, id DESC
         LIMIT ?"
    );
    let rows = sqlx::query_as::<_, ArticleRow>(&sql)
        .bind(i64::try_from(n).unwrap_or(i64::MAX))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Article::from).collect())
}

/// Move the `limit` most recent tagged articles back by `days`.
///
/// Returns the affected articles with their new timestamps.
pub async fn shift_published_at(pool: &SqlitePool, days: i64, limit: usize) -> Result<Vec<Article>> {
    let sql = format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles
         WHERE tickers != '' AND published_at IS NOT NULL
         ORDER BY published_at DESC, id DESC
         LIMIT ?"
    );
    let rows = sqlx::query_as::<_, ArticleRow>(&sql)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(pool)
        .await?;

    let mut tx = pool.begin().await?;
    let mut shifted = Vec::with_capacity(rows.len());
    for row in rows {
        let mut article = Article::from(row);
        if let Some(ts) = article.published_at {
            let shifted_ts = Duration::try_days(days)
                .and_then(|delta| ts.checked_sub_signed(delta))
                .ok_or(StoreError::ShiftOutOfRange { published_at: ts, days })?;
            article.published_at = Some(shifted_ts);
        }
        sqlx::query("UPDATE articles SET published_at = ? WHERE id = ?")
            .bind(article.published_at)
            .bind(article.id)
            .execute(&mut *tx)
            .await?;
        shifted.push(article);
    }
    tx.commit().await?;

    Ok(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_pool;

    fn new_article(url: &str, published_at: Option<&str>) -> NewArticle {
        NewArticle {
            source: "wire".to_string(),
            url: url.to_string(),
            title: format!("title for {url}"),
            published_at: published_at.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_and_duplicate() {
        let pool = memory_pool().await;
        let first = insert_article(&pool, &new_article("https://a", Some("2024-01-02 10:00:00")))
            .await
            .unwrap();
        assert!(matches!(first, InsertOutcome::Inserted(_)));

        let again = insert_article(&pool, &new_article("https://a", None)).await.unwrap();
        assert_eq!(again, InsertOutcome::Duplicate);
        assert_eq!(count_articles(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_round_trip_fields() {
        let pool = memory_pool().await;
        insert_article(&pool, &new_article("https://a", Some("2024-01-02T10:30:00Z")))
            .await
            .unwrap();
        insert_article(&pool, &new_article("https://b", Some("not a date")))
            .await
            .unwrap();

        let all = fetch_articles(&pool, false, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].tickers, "");
        assert_eq!(
            all[0].published_at,
            parse_timestamp("2024-01-02 10:30:00").ok()
        );
        assert!(all[1].published_at.is_none());
    }

    #[tokio::test]
    async fn test_only_missing_and_update() {
        let pool = memory_pool().await;
        for url in ["https://a", "https://b", "https://c"] {
            insert_article(&pool, &new_article(url, Some("2024-01-02"))).await.unwrap();
        }
        let all = fetch_articles(&pool, true, None).await.unwrap();
        update_tickers(&pool, all[1].id, "AAPL,TSLA").await.unwrap();

        let missing = fetch_articles(&pool, true, None).await.unwrap();
        assert_eq!(missing.len(), 2);
        assert_eq!(fetch_articles(&pool, true, Some(1)).await.unwrap().len(), 1);
        assert_eq!(count_tagged(&pool).await.unwrap(), 1);

        let all = fetch_articles(&pool, false, None).await.unwrap();
        assert_eq!(all[1].ticker_list(), vec!["AAPL", "TSLA"]);
    }

    #[tokio::test]
    async fn test_counts_by_source_and_latest() {
        let pool = memory_pool().await;
        let mut a = new_article("https://a", Some("2024-01-01"));
        a.source = "reuters".to_string();
        insert_article(&pool, &a).await.unwrap();
        insert_article(&pool, &new_article("https://b", Some("2024-01-03"))).await.unwrap();
        insert_article(&pool, &new_article("https://c", None)).await.unwrap();

        let by_source = count_articles_by_source(&pool).await.unwrap();
        assert_eq!(by_source, vec![("wire".to_string(), 2), ("reuters".to_string(), 1)]);

        let latest = latest_articles(&pool, 10).await.unwrap();
        let urls: Vec<&str> = latest.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["https://b", "https://a", "https://c"]);
    }

    #[tokio::test]
    async fn test_shift_published_at() {
        let pool = memory_pool().await;
        for (url, day) in [("https://a", "2024-01-01"), ("https://b", "2024-01-05"), ("https://c", "2024-01-09")] {
            insert_article(&pool, &new_article(url, Some(day))).await.unwrap();
        }
        for a in fetch_articles(&pool, false, None).await.unwrap() {
            update_tickers(&pool, a.id, "GM").await.unwrap();
        }

        let shifted = shift_published_at(&pool, 2, 2).await.unwrap();
        assert_eq!(shifted.len(), 2);
        assert_eq!(shifted[0].url, "https://c");

        let all = fetch_articles(&pool, false, None).await.unwrap();
        let days: Vec<String> = all
            .iter()
            .map(|a| a.published_date().unwrap().to_string())
            .collect();
        assert_eq!(days, vec!["2024-01-01", "2024-01-03", "2024-01-07"]);
    }

    #[tokio::test]
    async fn test_shift_out_of_range_is_an_error() {
        let pool = memory_pool().await;
        insert_article(&pool, &new_article("https://a", Some("2024-01-01"))).await.unwrap();
        let a = &fetch_articles(&pool, false, None).await.unwrap()[0];
        update_tickers(&pool, a.id, "GM").await.unwrap();

        for days in [i64::MAX, 400_000_000] {
            let err = shift_published_at(&pool, days, 1).await.unwrap_err();
            assert!(matches!(err, StoreError::ShiftOutOfRange { .. }));
        }

        let stored = fetch_articles(&pool, false, None).await.unwrap();
        assert_eq!(stored[0].published_date().unwrap().to_string(), "2024-01-01");
    }
}
