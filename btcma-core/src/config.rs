//! Fixed pipeline constants.
//!
//! The tool has no configuration surface: every run uses [`PipelineConfig::default`].
//! The struct exists so tests can point the cache at a temp directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ticker requested from the provider.
pub const SYMBOL: &str = "BTC-USD";

/// Cache file, relative to the working directory.
pub const CACHE_FILE: &str = "btc_prices.csv";

/// Four years of daily samples.
pub const MA_WINDOW: usize = 1460;

/// Average whatever is available at the start of the series.
pub const MA_MIN_PERIODS: usize = 1;

/// Name of the derived moving-average column.
pub const MA_COLUMN: &str = "4Y_MA";

/// First requested date (inclusive).
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default()
}

/// Last requested date (exclusive).
pub fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Everything the pipeline needs to run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    pub symbol: String,

    /// Start of the requested range (inclusive)
    pub start_date: NaiveDate,

    /// End of the requested range (exclusive)
    pub end_date: NaiveDate,

    pub cache_path: PathBuf,

    /// Rolling window length in samples
    pub ma_window: usize,

    /// Minimum non-missing samples before the mean is defined
    pub ma_min_periods: usize,

    pub ma_column: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            symbol: SYMBOL.to_string(),
            start_date: start_date(),
            end_date: end_date(),
            cache_path: PathBuf::from(CACHE_FILE),
            ma_window: MA_WINDOW,
            ma_min_periods: MA_MIN_PERIODS,
            ma_column: MA_COLUMN.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Default constants with the cache file relocated.
    pub fn with_cache_path(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
            ..Self::default()
        }
    }

    /// Window length expressed in whole years (1460 → 4), used for labels.
    pub fn window_years(&self) -> usize {
        (self.ma_window / 365).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.symbol, "BTC-USD");
        assert_eq!(cfg.start_date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(cfg.end_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(cfg.cache_path, PathBuf::from("btc_prices.csv"));
        assert_eq!(cfg.ma_window, 1460);
        assert_eq!(cfg.ma_min_periods, 1);
        assert_eq!(cfg.ma_column, "4Y_MA");
    }

    #[test]
    fn window_years_for_labels() {
        assert_eq!(PipelineConfig::default().window_years(), 4);
        let short = PipelineConfig {
            ma_window: 30,
            ..PipelineConfig::default()
        };
        assert_eq!(short.window_years(), 1);
    }

    #[test]
    fn config_serialization_roundtrip() {
        let cfg = PipelineConfig::with_cache_path("/tmp/x.csv");
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
