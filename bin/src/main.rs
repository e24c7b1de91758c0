//! finnews CLI binary.
//!
//! Drives the news-sentiment pipeline: ingest, tag, fetch prices, build the
//! forward-return dataset and analyze it.

mod cmd;
mod logging;
mod settings;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::logging::{LoggingConfig, init_logging};
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "finnews")]
#[command(about = "Financial news ticker tagging and forward-return datasets", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database URL (overrides DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Ticker configuration file (overrides FINNEWS_TICKERS)
    #[arg(long, global = true)]
    tickers: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and its tables
    InitDb,

    /// Ingest articles from a JSON-lines file
    Ingest {
        /// File with one JSON article per line
        file: PathBuf,
    },

    /// Tag stored articles with the tickers they mention
    Enrich {
        /// Reprocess every article, not only untagged ones
        #[arg(long)]
        all: bool,

        /// Search only title and summary
        #[arg(long)]
        no_body: bool,

        /// Process at most this many articles
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Fetch daily prices for every ticker in the universe
    FetchPrices {
        /// Days of history to request
        #[arg(long, default_value = "365")]
        lookback_days: u32,

        /// Pause between tickers in milliseconds
        #[arg(long, default_value = "300")]
        delay_ms: u64,
    },

    /// Build the article/forward-return dataset
    BuildDataset {
        /// Output file (.parquet or .csv)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Score headline sentiment and relate it to forward returns
    Analyze {
        /// Output file for the joined rows (.parquet or .csv)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show article counts and the latest articles
    Diagnose {
        /// Number of latest articles to list
        #[arg(short = 'n', long, default_value = "10")]
        latest: usize,
    },

    /// Shift the latest tagged articles back in time
    Backdate {
        /// Days to subtract
        #[arg(long, default_value = "1")]
        days: i64,

        /// Number of articles to shift
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env().with_overrides(cli.database_url, cli.tickers);
    init_logging(&LoggingConfig::from_env());

    match cli.command {
        Commands::InitDb => cmd::init_db::init_db(&settings).await?,
        Commands::Ingest { file } => cmd::ingest::ingest(&settings, &file).await?,
        Commands::Enrich {
            all,
            no_body,
            limit,
        } => {
            cmd::enrich::enrich(&settings, !all, !no_body, limit).await?;
        }
        Commands::FetchPrices {
            lookback_days,
            delay_ms,
        } => {
            cmd::prices::fetch_prices(&settings, lookback_days, delay_ms).await?;
        }
        Commands::BuildDataset { out } => cmd::dataset::build_dataset(&settings, out).await?,
        Commands::Analyze { out } => cmd::analyze::analyze(&settings, out).await?,
        Commands::Diagnose { latest } => cmd::diagnose::diagnose(&settings, latest).await?,
        Commands::Backdate { days, limit } => cmd::backdate::backdate(&settings, days, limit).await?,
    }

    Ok(())
}
