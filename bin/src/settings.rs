//! Runtime settings from the environment and `.env`.

use std::path::PathBuf;

use finnews_store::DEFAULT_DATABASE_URL;
use finnews_tagger::DEFAULT_TICKERS_PATH;

/// Paths and URLs shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    /// SQLite connection URL (`DATABASE_URL`).
    pub(crate) database_url: String,
    /// Directory for exported datasets (`FINNEWS_DATA_DIR`).
    pub(crate) data_dir: PathBuf,
    /// Ticker configuration file (`FINNEWS_TICKERS`).
    pub(crate) tickers_path: PathBuf,
}

impl Settings {
    /// Load `.env` if present, then read the environment.
    pub(crate) fn from_env() -> Self {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let var = |k: &str, default: &str| {
            get(k)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            data_dir: PathBuf::from(var("FINNEWS_DATA_DIR", "data")),
            tickers_path: PathBuf::from(var("FINNEWS_TICKERS", DEFAULT_TICKERS_PATH)),
        }
    }

    /// Apply command-line overrides.
    pub(crate) fn with_overrides(mut self, database_url: Option<String>, tickers: Option<PathBuf>) -> Self {
        if let Some(url) = database_url {
            self.database_url = url;
        }
        if let Some(path) = tickers {
            self.tickers_path = path;
        }
        self
    }

    /// Default path of a file in the data directory.
    pub(crate) fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::from_lookup(|_| None);
        assert_eq!(s.database_url, "sqlite://data/finnews.db");
        assert_eq!(s.tickers_path, PathBuf::from("configs/tickers.yaml"));
        assert_eq!(s.data_file("dataset.parquet"), PathBuf::from("data/dataset.parquet"));
    }

    #[test]
    fn test_env_and_overrides() {
        let s = Settings::from_lookup(|k| match k {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "FINNEWS_DATA_DIR" => Some("/tmp/finnews".to_string()),
            _ => None,
        });
        assert_eq!(s.database_url, "sqlite::memory:");
        assert_eq!(s.data_file("x.csv"), PathBuf::from("/tmp/finnews/x.csv"));

        let s = s.with_overrides(None, Some(PathBuf::from("t.yaml")));
        assert_eq!(s.database_url, "sqlite::memory:");
        assert_eq!(s.tickers_path, PathBuf::from("t.yaml"));
    }
}
