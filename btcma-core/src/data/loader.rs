//! Load-or-fetch: the first two pipeline stages.
//!
//! 1. If the cache file exists → parse it (corrupt file → deleted, abort)
//! 2. Otherwise → fetch from the provider, reject an empty (or all-void) result, cache it
//!
//! Nothing is retried and there is no fallback between the two paths.

use super::cache::CsvCache;
use super::progress::PipelineProgress;
use super::provider::{DataError, DataProvider, DataSource};
use crate::config::PipelineConfig;
use crate::domain::{PriceSeries, RawBar};

/// A series plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub series: PriceSeries,
    pub source: DataSource,
}

/// Resolve the raw series for `config.symbol`, hitting the network only on a
/// cache miss.
pub fn load_or_fetch(
    cache: &CsvCache,
    provider: &dyn DataProvider,
    config: &PipelineConfig,
    progress: &dyn PipelineProgress,
) -> Result<LoadedSeries, DataError> {
    if cache.exists() {
        progress.on_cache_hit(cache.path());
        let series = cache.load(&config.symbol)?;
        progress.on_columns(&series.column_names());
        progress.on_index_set(series.len());
        return Ok(LoadedSeries {
            series,
            source: DataSource::Cache,
        });
    }

    progress.on_cache_miss(&config.symbol, config.start_date, config.end_date);
    log::debug!(
        "cache miss at {}, fetching from {}",
        cache.path().display(),
        provider.name()
    );

    let fetched = provider.fetch(&config.symbol, config.start_date, config.end_date)?;
    // Rows with no price at all carry nothing to plot
    if fetched.bars.iter().all(RawBar::is_void) {
        return Err(DataError::EmptyResult {
            symbol: config.symbol.clone(),
            start: config.start_date,
            end: config.end_date,
        });
    }

    let series = PriceSeries::from_bars(&fetched.symbol, &fetched.bars)?;
    progress.on_fetch_complete(&fetched.symbol, series.len());
    progress.on_columns(&series.column_names());

    cache.write(&series)?;
    progress.on_cache_written(cache.path());

    Ok(LoadedSeries {
        series,
        source: fetched.source,
    })
}
