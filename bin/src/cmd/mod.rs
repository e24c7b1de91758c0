//! CLI subcommand modules.
//!
//! This module contains the implementations for all finnews CLI subcommands.

pub(crate) mod analyze;
pub(crate) mod backdate;
pub(crate) mod dataset;
pub(crate) mod diagnose;
pub(crate) mod enrich;
pub(crate) mod ingest;
pub(crate) mod init_db;
pub(crate) mod prices;

use anyhow::{Context, Result};
use finnews_store::{SqlitePool, connect};
use finnews_tagger::TickerConfig;

use crate::settings::Settings;

/// Print the boxed title shown at the top of every command.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Print a section rule with a heading.
pub(crate) fn section(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{title}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

/// Open the configured database.
pub(crate) async fn open_store(settings: &Settings) -> Result<SqlitePool> {
    connect(&settings.database_url)
        .await
        .with_context(|| format!("opening database {}", settings.database_url))
}

/// Load the configured ticker file; a missing file is fatal.
pub(crate) fn load_tickers(settings: &Settings) -> Result<TickerConfig> {
    TickerConfig::load(&settings.tickers_path)
        .with_context(|| format!("loading tickers from {}", settings.tickers_path.display()))
}

/// Shorten `s` to at most `max` characters for table output.
pub(crate) fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
