//! Financial Modeling Prep (FMP) daily price client for finnews.
//!
//! Fetches end-of-day bars from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API and
//! converts them into [`finnews_traits::PricePoint`]s.
//!
//! # Usage
//!
//! ```rust,ignore
//! use finnews_fmp::FmpClient;
//!
//! let client = FmpClient::from_env()?;
//! let bars = client.daily_prices("TSLA", from, to).await?;
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use types::{HistoricalPrice, PriceConversion, to_price_points};

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
