//! btcma chart: terminal rendering for the BTC moving-average pipeline.
//!
//! - [`chart`]: the log-scale price/average widget
//! - [`scale`]: decade and date axis ticks
//! - [`viewer`]: blocking full-screen display
//! - [`summary`]: plain-text report for non-interactive runs

pub mod chart;
pub mod logging;
pub mod scale;
pub mod summary;
pub mod theme;
pub mod viewer;

pub use chart::{ChartData, PriceChart};
pub use theme::Theme;
