//! FMP response types and their conversion to price points.

use chrono::NaiveDate;
use finnews_traits::PricePoint;
use serde::{Deserialize, Serialize};

/// One end-of-day bar as returned by the FMP EOD endpoint.
///
/// Every price is optional; the endpoint occasionally omits fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPrice {
    /// Date (YYYY-MM-DD).
    pub date: String,
    /// Open price.
    pub open: Option<f64>,
    /// High price.
    pub high: Option<f64>,
    /// Low price.
    pub low: Option<f64>,
    /// Close price.
    pub close: Option<f64>,
    /// Adjusted close.
    #[serde(default)]
    pub adj_close: Option<f64>,
    /// Volume.
    #[serde(default)]
    pub volume: Option<f64>,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.get(..10)?, "%Y-%m-%d").ok()
    }

    /// Convert to a [`PricePoint`] for `ticker`.
    ///
    /// `None` when the date or any of open/high/low/close is missing. A missing
    /// adjusted close falls back to the close; a missing volume is zero.
    #[must_use]
    pub fn to_price_point(&self, ticker: &str) -> Option<PricePoint> {
        let date = self.parsed_date()?;
        let (open, high, low, close) = (self.open?, self.high?, self.low?, self.close?);
        Some(PricePoint {
            ticker: ticker.to_string(),
            date,
            open,
            high,
            low,
            close,
            adj_close: self.adj_close.unwrap_or(close),
            volume: self.volume.map_or(0, |v| v.round() as i64),
        })
    }
}

/// Result of converting a batch of bars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceConversion {
    /// Bars that converted, oldest first.
    pub points: Vec<PricePoint>,
    /// Bars dropped for missing fields.
    pub skipped: usize,
}

/// Convert bars for `ticker`, sorted by date.
pub fn to_price_points(ticker: &str, bars: &[HistoricalPrice]) -> PriceConversion {
    let mut points: Vec<PricePoint> = bars.iter().filter_map(|b| b.to_price_point(ticker)).collect();
    points.sort_by_key(|p| p.date);
    PriceConversion {
        skipped: bars.len() - points.len(),
        points,
    }
}
