//! Domain types: raw provider rows and the columnar price series.

pub mod bar;
pub mod series;

pub use bar::RawBar;
pub use series::{Column, PriceField, PriceSeries, SeriesError, DATE_COLUMN};
