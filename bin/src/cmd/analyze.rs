//! Analyze command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use finnews_eval::{SentimentReport, VaderScorer, join_sentiment, model_frame, score_articles};
use finnews_returns::write_frame;

use super::dataset::{load_dataset, print_diagnostics};
use super::{banner, open_store, section};
use crate::settings::Settings;

fn fmt_opt(v: Option<f64>, width: usize) -> String {
    match v {
        Some(x) => format!("{x:>width$.4}"),
        None => format!("{:>width$}", "n/a"),
    }
}

/// Print a sentiment/return report.
pub(crate) fn print_report(report: &SentimentReport) {
    section("OVERVIEW");
    println!("Rows:      {}", report.rows);
    println!("Tickers:   {}", report.tickers);
    if let Some((lo, hi)) = report.published_range {
        println!("Published: {lo} .. {hi}");
    }
    println!();

    section("SENTIMENT VS FORWARD RETURNS");
    println!("{:<8} {:>6} {:>10} {:>10}", "Horizon", "N", "Pearson", "Rank IC");
    println!("{}", "─".repeat(37));
    for h in &report.horizons {
        println!(
            "{:<8} {:>6} {} {}",
            format!("{}d", h.horizon),
            h.n,
            fmt_opt(h.pearson, 10),
            fmt_opt(h.ic, 10)
        );
    }
    println!();

    section("MEAN FORWARD RETURN BY SENTIMENT");
    println!(
        "{:<10} {:>6} {:>18} {:>18} {:>18}",
        "Label", "Count", "ret_1d ± CI", "ret_2d ± CI", "ret_5d ± CI"
    );
    println!("{}", "─".repeat(74));
    for l in &report.labels {
        let cells: Vec<String> = l
            .returns
            .iter()
            .map(|s| {
                let mean = (s.n > 0).then_some(s.mean);
                match s.ci95_half_width() {
                    Some(ci) => format!("{:>9.4} ± {:<6.4}", s.mean, ci),
                    None => format!("{} {:<7}", fmt_opt(mean, 9), ""),
                }
            })
            .collect();
        println!(
            "{:<10} {:>6} {:>18} {:>18} {:>18}",
            l.label.as_str(),
            l.count,
            cells[0],
            cells[1],
            cells[2]
        );
    }
    println!();
    println!("CI = 1.96 * sd / sqrt(n); shown when n > 1. Correlations need n >= 3.");
    println!();
}

/// Score headlines, join them to forward returns and report.
pub(crate) async fn analyze(settings: &Settings, out: Option<PathBuf>) -> Result<()> {
    banner("Sentiment vs Forward Returns");

    let pool = open_store(settings).await?;
    let (articles, dataset) = load_dataset(&pool).await?;

    if dataset.is_empty() {
        print_diagnostics(&dataset.diagnostics);
        return Ok(());
    }

    let scorer = VaderScorer::new();
    let sentiments = score_articles(&scorer, &articles);
    let joined = join_sentiment(&dataset.rows, &sentiments);

    let out = out.unwrap_or_else(|| settings.data_file("model_dataset.parquet"));
    let mut df = model_frame(&joined)?;
    write_frame(&mut df, &out).with_context(|| format!("writing {}", out.display()))?;

    print_report(&SentimentReport::build(&joined));
    println!("Joined rows written to {}", out.display());
    println!();
    Ok(())
}
