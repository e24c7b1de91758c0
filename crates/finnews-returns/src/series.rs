//! Per-ticker daily close series with nearest-date lookups.
//!
//! A series holds at most one close per calendar day, sorted by date. Lookups
//! are binary searches; gaps (weekends, holidays, missing data) are never
//! filled.

use std::collections::BTreeMap;

use finnews_traits::{Date, PricePoint, Symbol};
use serde::{Deserialize, Serialize};

/// A single `(date, close)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Trading day.
    pub date: Date,
    /// Closing price.
    pub close: f64,
}

/// Date-sorted, deduplicated closes for one ticker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    ticker: Symbol,
    dates: Vec<Date>,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from observations in any order.
    ///
    /// When a date appears more than once, the last occurrence wins.
    pub fn new<I>(ticker: impl Into<Symbol>, observations: I) -> Self
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        let mut obs: Vec<(Date, f64)> = observations.into_iter().collect();
        // Stable: equal dates keep their arrival order.
        obs.sort_by_key(|(d, _)| *d);

        let mut dates: Vec<Date> = Vec::with_capacity(obs.len());
        let mut closes: Vec<f64> = Vec::with_capacity(obs.len());
        for (date, close) in obs {
            if dates.last() == Some(&date) {
                if let Some(last) = closes.last_mut() {
                    *last = close;
                }
            } else {
                dates.push(date);
                closes.push(close);
            }
        }

        Self {
            ticker: ticker.into(),
            dates,
            closes,
        }
    }

    /// Ticker symbol.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Number of distinct dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Earliest date, if any.
    pub fn first_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Latest date, if any.
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Observations in date order.
    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.dates
            .iter()
            .zip(&self.closes)
            .map(|(&date, &close)| Observation { date, close })
    }

    /// Latest observation with `date <= on`.
    pub fn last_on_or_before(&self, on: Date) -> Option<Observation> {
        let idx = self.dates.partition_point(|d| *d <= on);
        idx.checked_sub(1).map(|i| self.at(i))
    }

    /// Earliest observation with `date >= on`.
    pub fn first_on_or_after(&self, on: Date) -> Option<Observation> {
        let idx = self.dates.partition_point(|d| *d < on);
        (idx < self.dates.len()).then(|| self.at(idx))
    }

    fn at(&self, i: usize) -> Observation {
        Observation {
            date: self.dates[i],
            close: self.closes[i],
        }
    }
}

/// Price series for every ticker with data.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    series: BTreeMap<Symbol, PriceSeries>,
}

impl PriceBook {
    /// Group price points by ticker into series.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = PricePoint>,
    {
        let mut grouped: BTreeMap<Symbol, Vec<(Date, f64)>> = BTreeMap::new();
        for p in points {
            grouped.entry(p.ticker).or_default().push((p.date, p.close));
        }

        let series = grouped
            .into_iter()
            .map(|(ticker, obs)| {
                let s = PriceSeries::new(ticker.clone(), obs);
                (ticker, s)
            })
            .collect();

        Self { series }
    }

    /// Series for `ticker`, if any prices were loaded for it.
    pub fn series(&self, ticker: &str) -> Option<&PriceSeries> {
        self.series.get(ticker)
    }

    /// Tickers with data, sorted.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of tickers with data.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no prices were loaded.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(PriceSeries::is_empty)
    }

    /// Total observations across all tickers.
    pub fn point_count(&self) -> usize {
        self.series.values().map(PriceSeries::len).sum()
    }

    /// Earliest and latest date across all tickers.
    pub fn date_range(&self) -> Option<(Date, Date)> {
        let first = self.series.values().filter_map(PriceSeries::first_date).min()?;
        let last = self.series.values().filter_map(PriceSeries::last_date).max()?;
        Some((first, last))
    }
}
