//! Data acquisition: CSV cache, Yahoo Finance provider, load-or-fetch orchestration.

pub mod cache;
pub mod loader;
pub mod progress;
pub mod provider;
pub mod yahoo;

pub use cache::CsvCache;
pub use loader::{load_or_fetch, LoadedSeries};
pub use progress::{PipelineProgress, SilentProgress, StdoutProgress};
pub use provider::{DataError, DataProvider, DataSource, FetchResult};
pub use yahoo::YahooProvider;
