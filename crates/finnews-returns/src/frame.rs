//! Dataset export through Polars.

use std::fs::File;
use std::path::Path;

use finnews_traits::{FinnewsError, Result};
use polars::prelude::*;
use tracing::info;

use crate::dataset::DatasetRow;

/// Column order of an exported dataset.
pub const DATASET_COLUMNS: [&str; 12] = [
    "article_id",
    "ticker",
    "title",
    "summary",
    "published_at",
    "p0_date",
    "p1_date",
    "p2_date",
    "p5_date",
    "ret_1d",
    "ret_2d",
    "ret_5d",
];

/// Convert dataset rows into a DataFrame with [`DATASET_COLUMNS`].
///
/// Null returns and dates stay null.
pub fn dataset_frame(rows: &[DatasetRow]) -> Result<DataFrame> {
    let df = df! {
        "article_id" => rows.iter().map(|r| r.article_id).collect::<Vec<_>>(),
        "ticker" => rows.iter().map(|r| r.ticker.as_str()).collect::<Vec<_>>(),
        "title" => rows.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
        "summary" => rows.iter().map(|r| r.summary.as_str()).collect::<Vec<_>>(),
        "published_at" => rows.iter().map(|r| r.published_at).collect::<Vec<_>>(),
        "p0_date" => rows.iter().map(|r| r.p0_date).collect::<Vec<_>>(),
        "p1_date" => rows.iter().map(|r| r.p1_date).collect::<Vec<_>>(),
        "p2_date" => rows.iter().map(|r| r.p2_date).collect::<Vec<_>>(),
        "p5_date" => rows.iter().map(|r| r.p5_date).collect::<Vec<_>>(),
        "ret_1d" => rows.iter().map(|r| r.ret_1d).collect::<Vec<_>>(),
        "ret_2d" => rows.iter().map(|r| r.ret_2d).collect::<Vec<_>>(),
        "ret_5d" => rows.iter().map(|r| r.ret_5d).collect::<Vec<_>>(),
    }?;

    Ok(df)
}

/// Write a frame to `path`: Parquet for `.parquet`, CSV for `.csv`.
pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match ext.as_deref() {
        Some("parquet") => {
            let file = File::create(path)?;
            ParquetWriter::new(file).finish(df)?;
        }
        Some("csv") => {
            let mut file = File::create(path)?;
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
        _ => {
            return Err(FinnewsError::InvalidData(format!(
                "unsupported output format: {} (expected .parquet or .csv)",
                path.display()
            )));
        }
    }

    info!(path = %path.display(), rows = df.height(), "wrote frame");
    Ok(())
}
