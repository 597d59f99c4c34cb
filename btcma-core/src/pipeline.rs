//! Load-or-fetch → validate → compute. Rendering is the caller's job.

use crate::config::PipelineConfig;
use crate::data::{load_or_fetch, CsvCache, DataError, DataProvider, DataSource, PipelineProgress};
use crate::domain::{PriceField, PriceSeries};
use crate::indicators::{append_moving_average, RollingMean};
use chrono::NaiveDate;

/// Series ready for the chart: raw prices plus the appended moving average.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub series: PriceSeries,
    pub source: DataSource,
    pub price_field: PriceField,
    pub ma_column: String,
    pub window: usize,
    pub window_years: usize,
}

impl PipelineOutput {
    pub fn dates(&self) -> &[NaiveDate] {
        self.series.dates()
    }

    pub fn prices(&self) -> &[f64] {
        self.series.prices()
    }

    pub fn moving_average(&self) -> &[f64] {
        self.series.column(&self.ma_column).unwrap_or_default()
    }
}

/// Run the data stages of the pipeline.
///
/// The provider is only called on a cache miss. Any error means the run
/// must end: nothing here retries.
pub fn prepare(
    config: &PipelineConfig,
    provider: &dyn DataProvider,
    progress: &dyn PipelineProgress,
) -> Result<PipelineOutput, DataError> {
    progress.on_start(&config.symbol);

    let cache = CsvCache::new(&config.cache_path);
    let loaded = load_or_fetch(&cache, provider, config, progress)?;
    let mut series = loaded.series;

    let indicator = RollingMean::new(config.ma_window, config.ma_min_periods);
    let price_field = append_moving_average(&mut series, &indicator, &config.ma_column);
    progress.on_price_field(price_field);
    progress.on_moving_average(config.window_years(), indicator.window());

    Ok(PipelineOutput {
        series,
        source: loaded.source,
        price_field,
        ma_column: config.ma_column.clone(),
        window: config.ma_window,
        window_years: config.window_years(),
    })
}
