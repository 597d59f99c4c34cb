//! Console progress reporting for the pipeline stages.
//!
//! Messages are informational only. Errors are reported by the caller, not here.

use crate::domain::PriceField;
use chrono::NaiveDate;
use std::path::Path;

/// Callbacks fired as the pipeline moves through its stages.
pub trait PipelineProgress {
    /// Pipeline is starting.
    fn on_start(&self, symbol: &str);

    /// A cache file exists and is about to be parsed.
    fn on_cache_hit(&self, path: &Path);

    /// Columns found in the loaded or fetched table.
    fn on_columns(&self, columns: &[&str]);

    /// The date column was installed as the index.
    fn on_index_set(&self, rows: usize);

    /// No cache file; about to hit the network.
    fn on_cache_miss(&self, symbol: &str, start: NaiveDate, end: NaiveDate);

    /// The provider returned `rows` rows.
    fn on_fetch_complete(&self, symbol: &str, rows: usize);

    /// Fetched data persisted.
    fn on_cache_written(&self, path: &Path);

    /// The price column chosen for the indicator.
    fn on_price_field(&self, field: PriceField);

    /// Moving average appended.
    fn on_moving_average(&self, years: usize, window: usize);

    /// The chart is about to be built / shown.
    fn on_render(&self);

    /// Pipeline finished successfully.
    fn on_done(&self);
}

/// Prints each stage to stdout.
pub struct StdoutProgress;

impl PipelineProgress for StdoutProgress {
    fn on_start(&self, symbol: &str) {
        println!("Starting {symbol} moving-average chart...");
    }

    fn on_cache_hit(&self, path: &Path) {
        println!("Loading data from local CSV {}...", path.display());
    }

    fn on_columns(&self, columns: &[&str]) {
        println!("  Columns: {}", columns.join(", "));
    }

    fn on_index_set(&self, rows: usize) {
        println!("  OK: Date column set as index ({rows} rows)");
    }

    fn on_cache_miss(&self, symbol: &str, start: NaiveDate, end: NaiveDate) {
        println!("Downloading {symbol} price data from Yahoo Finance ({start} to {end})...");
    }

    fn on_fetch_complete(&self, symbol: &str, rows: usize) {
        println!("  OK: {symbol}: {rows} rows");
    }

    fn on_cache_written(&self, path: &Path) {
        println!("  OK: saved as '{}'", path.display());
    }

    fn on_price_field(&self, field: PriceField) {
        println!("Using column '{}' for price data.", field.column_name());
    }

    fn on_moving_average(&self, years: usize, window: usize) {
        println!("{years}-Year Moving Average calculated (window {window}).");
    }

    fn on_render(&self) {
        println!("Displaying the chart (press q to close)...");
    }

    fn on_done(&self) {
        println!("Done.");
    }
}

/// Discards every message. Used by tests and non-interactive callers.
pub struct SilentProgress;

impl PipelineProgress for SilentProgress {
    fn on_start(&self, _symbol: &str) {}
    fn on_cache_hit(&self, _path: &Path) {}
    fn on_columns(&self, _columns: &[&str]) {}
    fn on_index_set(&self, _rows: usize) {}
    fn on_cache_miss(&self, _symbol: &str, _start: NaiveDate, _end: NaiveDate) {}
    fn on_fetch_complete(&self, _symbol: &str, _rows: usize) {}
    fn on_cache_written(&self, _path: &Path) {}
    fn on_price_field(&self, _field: PriceField) {}
    fn on_moving_average(&self, _years: usize, _window: usize) {}
    fn on_render(&self) {}
    fn on_done(&self) {}
}
