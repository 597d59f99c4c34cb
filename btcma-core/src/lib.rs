//! btcma core: cache, fetch and indicator stages of the BTC moving-average pipeline.
//!
//! The pipeline is strictly linear:
//! - Cache Loader: read `btc_prices.csv` if present, validate its schema
//! - Remote Fetcher: on cache miss, download daily bars from Yahoo Finance and cache them
//! - Indicator Calculator: trailing rolling mean over the selected price column
//!
//! Rendering lives in `btcma-chart`; this crate never touches the terminal
//! beyond the progress callbacks in [`data::progress`].

pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod pipeline;

pub use config::PipelineConfig;
pub use data::{DataError, DataSource};
pub use domain::{PriceField, PriceSeries};
pub use pipeline::{prepare, PipelineOutput};
