//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over the remote source so the fetcher can
//! be swapped for a mock in tests.

use crate::domain::{RawBar, SeriesError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Every way the pipeline can abort. None of these are retried.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("HTTP {status} for {symbol}")]
    HttpStatus { status: u16, symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error(
        "no data retrieved for {symbol} between {start} and {end} \
         (provider issue or no data for the selected range)"
    )]
    EmptyResult {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error(
        "cache file {} is corrupt ({reason}); it has been deleted, run again to re-download",
        path.display()
    )]
    CorruptCache { path: PathBuf, reason: String },

    #[error("cache file {} line {line}: {reason}", path.display())]
    CacheParse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("cache error: {0}")]
    CacheError(String),

    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),
}

/// Result of a successful fetch. `bars` may be empty; the loader decides what
/// an empty result means.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    Cache,
}

/// Remote source of daily bars.
///
/// Providers don't know about the cache; the loader sits above this trait.
pub trait DataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for `symbol` with `start <= date < end`.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;
}
