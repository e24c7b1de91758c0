//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{HistoricalPrice, PriceConversion, to_price_points},
};
use chrono::NaiveDate;
use reqwest::Client;
use std::env;
use tracing::{debug, warn};

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // Check for error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get raw end-of-day bars for `symbol` between `from` and `to`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is inverted or the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HistoricalPrice>> {
        if from > to {
            return Err(FmpError::InvalidRange { from, to });
        }

        let endpoint = eod_endpoint(symbol, from, to);
        // The stable API returns a flat array, not a wrapped response
        let bars: Vec<HistoricalPrice> = self.get(&endpoint).await?;
        debug!(symbol, bars = bars.len(), "fetched EOD bars");
        Ok(bars)
    }

    /// Get end-of-day bars for `symbol` as price points, oldest first.
    ///
    /// Bars missing any of open/high/low/close are dropped with a single
    /// warning for the symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is inverted or the API request fails.
    pub async fn daily_prices(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PriceConversion> {
        let bars = self.historical_prices(symbol, from, to).await?;
        let out = to_price_points(symbol, &bars);
        if out.skipped > 0 {
            warn!(symbol, skipped = out.skipped, "dropped bars with missing prices");
        }
        Ok(out)
    }
}

fn eod_endpoint(symbol: &str, from: NaiveDate, to: NaiveDate) -> String {
    format!(
        "historical-price-eod/full?symbol={}&from={}&to={}",
        symbol.trim().to_uppercase(),
        from.format("%Y-%m-%d"),
        to.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = FmpClient::new("test_key");
        assert_eq!(
            client.url(&eod_endpoint("tsla", d(1, 1), d(3, 31))),
            "https://financialmodelingprep.com/stable/historical-price-eod/full?symbol=TSLA&from=2024-01-01&to=2024-03-31&apikey=test_key"
        );
        assert_eq!(
            client.url("stock-list"),
            "https://financialmodelingprep.com/stable/stock-list?apikey=test_key"
        );
    }

    #[tokio::test]
    async fn test_inverted_range_rejected_before_request() {
        let client = FmpClient::new("test_key");
        let err = client
            .historical_prices("TSLA", d(2, 1), d(1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, FmpError::InvalidRange { .. }));
    }
}
