//! RawBar: one daily row as delivered by a data provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV row before it is folded into a [`PriceSeries`](super::PriceSeries).
///
/// Missing fields are `NaN`. `adj_close` is `None` when the provider did not
/// deliver an adjusted-close series at all, which is different from a single
/// missing value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adj_close: Option<f64>,
}

impl RawBar {
    /// True if every price field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            && self.high.is_nan()
            && self.low.is_nan()
            && self.close.is_nan()
            && self.adj_close.map_or(true, f64::is_nan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> RawBar {
        RawBar {
            date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            open: 320.43,
            high: 320.43,
            low: 314.0,
            close: 314.25,
            volume: 8_036_550,
            adj_close: Some(314.25),
        }
    }

    #[test]
    fn bar_is_not_void() {
        assert!(!sample_bar().is_void());
    }

    #[test]
    fn bar_detects_void() {
        let bar = RawBar {
            open: f64::NAN,
            high: f64::NAN,
            low: f64::NAN,
            close: f64::NAN,
            adj_close: None,
            ..sample_bar()
        };
        assert!(bar.is_void());
    }

    #[test]
    fn partial_bar_is_not_void() {
        let bar = RawBar {
            open: f64::NAN,
            high: f64::NAN,
            ..sample_bar()
        };
        assert!(!bar.is_void());
    }
}
