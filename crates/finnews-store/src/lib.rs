//! SQLite persistence for finnews.
//!
//! Two tables back the pipeline: `articles` (unique by `url`) and `prices`
//! (unique by `(ticker, date)`). The schema is created idempotently when a
//! pool is opened. Queries are free functions over a [`SqlitePool`], grouped
//! per table in [`article_queries`] and [`price_queries`].
//!
//! # Example
//!
//! ```rust,ignore
//! use finnews_store::{article_queries, connect};
//!
//! let pool = connect("sqlite://data/finnews.db").await?;
//! let untagged = article_queries::fetch_articles(&pool, true, None).await?;
//! ```

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

pub mod article_queries;
mod error;
pub mod price_queries;

pub use error::{Result, StoreError};
pub use sqlx::SqlitePool;

/// Default database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/finnews.db";

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        source       TEXT    NOT NULL DEFAULT '',
        url          TEXT    NOT NULL UNIQUE,
        title        TEXT    NOT NULL DEFAULT '',
        published_at TEXT,
        author       TEXT    NOT NULL DEFAULT '',
        summary      TEXT    NOT NULL DEFAULT '',
        text         TEXT    NOT NULL DEFAULT '',
        tickers      TEXT    NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_articles_published_at ON articles (published_at)",
    r#"
    CREATE TABLE IF NOT EXISTS prices (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        ticker    TEXT    NOT NULL,
        date      TEXT    NOT NULL,
        open      REAL    NOT NULL,
        high      REAL    NOT NULL,
        low       REAL    NOT NULL,
        close     REAL    NOT NULL,
        adj_close REAL    NOT NULL,
        volume    INTEGER NOT NULL DEFAULT 0,
        UNIQUE (ticker, date)
    )
    "#,
];

/// Result of inserting a row under a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was stored with this id.
    Inserted(i64),
    /// A row with the same key already exists; nothing was written.
    Duplicate,
}

impl InsertOutcome {
    /// Whether a row was written.
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Open a pool on `url` and ensure the schema exists.
///
/// File databases are created on first use, along with their directory.
/// In-memory databases use a single connection so every query sees the same
/// data.
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let in_memory = url.contains(":memory:") || url.contains("mode=memory");
    if !in_memory {
        if let Some(dir) = options.get_filename().parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut pool_options = SqlitePoolOptions::new().max_connections(5);
    if in_memory {
        // Closing the only connection would drop the database.
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }
    let pool = pool_options.connect_with(options).await?;

    init_schema(&pool).await?;
    debug!(url, "opened store");
    Ok(pool)
}

/// Create tables and indexes if they do not exist.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_unique_violation())
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    connect("sqlite::memory:").await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('articles', 'prices') ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, vec!["articles", "prices"]);
    }

    #[test]
    fn test_insert_outcome() {
        assert!(InsertOutcome::Inserted(1).is_inserted());
        assert!(!InsertOutcome::Duplicate.is_inserted());
    }
}
