//! Ingest command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use finnews_store::InsertOutcome;
use finnews_store::article_queries::insert_article;
use finnews_traits::NewArticle;
use tracing::{info, warn};

use super::{banner, open_store};
use crate::settings::Settings;

/// Counts from one ingest run.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct IngestCounts {
    pub(crate) inserted: usize,
    pub(crate) duplicates: usize,
    pub(crate) invalid: usize,
}

/// Parse one JSON-lines record; `None` for blank lines.
pub(crate) fn parse_line(line: &str) -> Option<serde_json::Result<NewArticle>> {
    let line = line.trim();
    (!line.is_empty()).then(|| serde_json::from_str(line))
}

/// Store every article in a JSON-lines file, skipping duplicates and bad lines.
pub(crate) async fn ingest(settings: &Settings, file: &Path) -> Result<()> {
    banner("Ingest Articles");

    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let pool = open_store(settings).await?;

    println!("Source:    {}", file.display());
    println!("Database:  {}\n", settings.database_url);

    let mut counts = IngestCounts::default();
    for (lineno, line) in raw.lines().enumerate() {
        let article = match parse_line(line) {
            None => continue,
            Some(Ok(a)) if !a.url.trim().is_empty() => a,
            Some(Ok(_)) => {
                warn!(line = lineno + 1, "skipping article without url");
                counts.invalid += 1;
                continue;
            }
            Some(Err(e)) => {
                warn!(line = lineno + 1, "skipping unparseable line: {e}");
                counts.invalid += 1;
                continue;
            }
        };

        match insert_article(&pool, &article).await {
            Ok(InsertOutcome::Inserted(_)) => counts.inserted += 1,
            Ok(InsertOutcome::Duplicate) => counts.duplicates += 1,
            Err(e) => {
                warn!(url = %article.url, "skipping article: {e}");
                counts.invalid += 1;
            }
        }
    }

    info!(
        inserted = counts.inserted,
        duplicates = counts.duplicates,
        invalid = counts.invalid,
        "ingest finished"
    );

    println!("Inserted:    {}", counts.inserted);
    println!("Duplicates:  {}", counts.duplicates);
    println!("Skipped:     {}", counts.invalid);
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert!(parse_line("   ").is_none());
        assert!(parse_line("{not json").unwrap().is_err());

        let a = parse_line(r#"{"source":"wire","url":"https://a","title":"Tesla rallies","published_at":"2024-01-02T10:00:00Z"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(a.url, "https://a");
        assert_eq!(a.published_at.as_deref(), Some("2024-01-02T10:00:00Z"));
        assert_eq!(a.summary, "");
    }
}
