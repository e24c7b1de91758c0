//! Price series and forward returns for finnews.
//!
//! This crate turns stored daily prices and tagged articles into the
//! article/return dataset:
//! - [`PriceSeries`] and [`PriceBook`] hold date-sorted closes per ticker
//! - [`forward_return`] and [`horizon_returns`] anchor returns to a publication date
//! - [`DatasetBuilder`] emits one [`DatasetRow`] per tagged `(article, ticker)` pair
//! - [`dataset_frame`] and [`write_frame`] export the result through Polars
//!
//! # Example
//!
//! ```rust,ignore
//! use finnews_returns::{DatasetBuilder, PriceBook, dataset_frame, write_frame};
//!
//! let book = PriceBook::from_points(prices);
//! let dataset = DatasetBuilder::new(&book).build(&articles);
//! let mut df = dataset_frame(&dataset.rows)?;
//! write_frame(&mut df, "data/dataset.parquet".as_ref())?;
//! ```

pub mod dataset;
pub mod forward;
pub mod frame;
pub mod series;

// Re-export main types
pub use dataset::{ArticleExample, Dataset, DatasetBuilder, DatasetRow, Diagnostics};
pub use forward::{ForwardReturn, HORIZONS, HorizonReturns, forward_return, horizon_returns};
pub use frame::{DATASET_COLUMNS, dataset_frame, write_frame};
pub use series::{Observation, PriceBook, PriceSeries};
