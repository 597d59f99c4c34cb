//! PriceSeries: the date-indexed, columnar table that flows through the pipeline.
//!
//! Raw columns come from the cache file or the provider and are the only ones
//! ever persisted. Derived columns (the moving average) are appended by the
//! indicator stage and live only for the duration of a run.

use super::bar::RawBar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header of the index column in the cache file.
pub const DATE_COLUMN: &str = "Date";

/// Which column feeds the indicator and the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceField {
    /// Close adjusted for corporate actions. Preferred when present.
    AdjClose,
    Close,
}

impl PriceField {
    /// Header used in the cache file.
    pub fn column_name(self) -> &'static str {
        match self {
            PriceField::AdjClose => "Adj Close",
            PriceField::Close => "Close",
        }
    }

    /// Pick the preferred price field among the given column names.
    pub fn select<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut has_close = false;
        for name in names {
            if name == PriceField::AdjClose.column_name() {
                return Some(PriceField::AdjClose);
            }
            if name == PriceField::Close.column_name() {
                has_close = true;
            }
        }
        has_close.then_some(PriceField::Close)
    }
}

/// A named numeric column aligned to the series index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("column '{column}' has {found} values but the index has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("no price column: expected 'Adj Close' or 'Close'")]
    MissingPriceColumn,

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
}

/// Date-indexed price table for a single symbol.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    symbol: String,
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
    derived: Vec<Column>,
    price_field: PriceField,
}

impl PriceSeries {
    /// Build a series from an index and raw columns.
    ///
    /// Index order is kept as given. Fails if any column length differs from
    /// the index or if no price column is present.
    pub fn new(
        symbol: impl Into<String>,
        dates: Vec<NaiveDate>,
        columns: Vec<Column>,
    ) -> Result<Self, SeriesError> {
        for (i, col) in columns.iter().enumerate() {
            if col.values.len() != dates.len() {
                return Err(SeriesError::LengthMismatch {
                    column: col.name.clone(),
                    expected: dates.len(),
                    found: col.values.len(),
                });
            }
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(SeriesError::DuplicateColumn(col.name.clone()));
            }
        }

        let price_field = PriceField::select(columns.iter().map(|c| c.name.as_str()))
            .ok_or(SeriesError::MissingPriceColumn)?;

        Ok(Self {
            symbol: symbol.into(),
            dates,
            columns,
            derived: Vec::new(),
            price_field,
        })
    }

    /// Fold provider rows into a series.
    ///
    /// Column order follows the provider's download layout:
    /// `Adj Close, Close, High, Low, Open, Volume`. `Adj Close` is included only
    /// if the provider delivered it.
    pub fn from_bars(symbol: impl Into<String>, bars: &[RawBar]) -> Result<Self, SeriesError> {
        let has_adj = bars.iter().any(|b| b.adj_close.is_some());
        let dates = bars.iter().map(|b| b.date).collect();

        let mut columns = Vec::with_capacity(6);
        if has_adj {
            columns.push(Column::new(
                PriceField::AdjClose.column_name(),
                bars.iter().map(|b| b.adj_close.unwrap_or(f64::NAN)).collect(),
            ));
        }
        columns.push(Column::new("Close", bars.iter().map(|b| b.close).collect()));
        columns.push(Column::new("High", bars.iter().map(|b| b.high).collect()));
        columns.push(Column::new("Low", bars.iter().map(|b| b.low).collect()));
        columns.push(Column::new("Open", bars.iter().map(|b| b.open).collect()));
        columns.push(Column::new(
            "Volume",
            bars.iter().map(|b| b.volume as f64).collect(),
        ));

        Self::new(symbol, dates, columns)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The date index, in source order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Raw columns only (what the cache stores).
    pub fn raw_columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns appended by the indicator stage.
    pub fn derived_columns(&self) -> &[Column] {
        &self.derived
    }

    /// Names of all columns, raw first, then derived.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .chain(self.derived.iter())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Look up a column by name. Derived columns shadow raw ones.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.derived
            .iter()
            .chain(self.columns.iter())
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// `Adj Close` if present, else `Close`.
    pub fn price_field(&self) -> PriceField {
        self.price_field
    }

    /// Values of the selected price field.
    pub fn prices(&self) -> &[f64] {
        self.column(self.price_field.column_name())
            .unwrap_or_default()
    }

    /// Append (or replace) a derived column. Length must match the index.
    pub(crate) fn push_derived(&mut self, name: &str, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.dates.len());
        match self.derived.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.values = values,
            None => self.derived.push(Column::new(name, values)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn bars(adj: bool) -> Vec<RawBar> {
        (1..=3)
            .map(|day| RawBar {
                date: d(day),
                open: 10.0 * day as f64,
                high: 11.0 * day as f64,
                low: 9.0 * day as f64,
                close: 10.0 * day as f64,
                volume: 100 * day as u64,
                adj_close: adj.then_some(5.0 * day as f64),
            })
            .collect()
    }

    #[test]
    fn prefers_adj_close() {
        assert_eq!(
            PriceField::select(["Close", "Adj Close", "Open"]),
            Some(PriceField::AdjClose)
        );
        assert_eq!(PriceField::select(["Open", "Close"]), Some(PriceField::Close));
        assert_eq!(PriceField::select(["Open", "High"]), None);
    }

    #[test]
    fn from_bars_with_adj_close() {
        let series = PriceSeries::from_bars("BTC-USD", &bars(true)).unwrap();
        assert_eq!(
            series.column_names(),
            vec!["Adj Close", "Close", "High", "Low", "Open", "Volume"]
        );
        assert_eq!(series.price_field(), PriceField::AdjClose);
        assert_eq!(series.prices(), &[5.0, 10.0, 15.0]);
    }

    #[test]
    fn from_bars_without_adj_close() {
        let series = PriceSeries::from_bars("BTC-USD", &bars(false)).unwrap();
        assert_eq!(series.column_names()[0], "Close");
        assert_eq!(series.price_field(), PriceField::Close);
        assert_eq!(series.prices(), &[10.0, 20.0, 30.0]);
        assert_eq!(series.column("Volume").unwrap(), &[100.0, 200.0, 300.0]);
    }

    #[test]
    fn keeps_index_order() {
        let dates = vec![d(3), d(1), d(2)];
        let series = PriceSeries::new(
            "X",
            dates.clone(),
            vec![Column::new("Close", vec![1.0, 2.0, 3.0])],
        )
        .unwrap();
        assert_eq!(series.dates(), dates.as_slice());
        assert_eq!(series.first_date(), Some(d(3)));
        assert_eq!(series.last_date(), Some(d(2)));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = PriceSeries::new("X", vec![d(1), d(2)], vec![Column::new("Close", vec![1.0])])
            .unwrap_err();
        assert_eq!(
            err,
            SeriesError::LengthMismatch {
                column: "Close".into(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn rejects_missing_price_column() {
        let err = PriceSeries::new("X", vec![d(1)], vec![Column::new("Open", vec![1.0])])
            .unwrap_err();
        assert_eq!(err, SeriesError::MissingPriceColumn);
    }

    #[test]
    fn rejects_duplicate_column() {
        let err = PriceSeries::new(
            "X",
            vec![d(1)],
            vec![Column::new("Close", vec![1.0]), Column::new("Close", vec![2.0])],
        )
        .unwrap_err();
        assert_eq!(err, SeriesError::DuplicateColumn("Close".into()));
    }

    #[test]
    fn derived_columns_are_separate_from_raw() {
        let mut series = PriceSeries::from_bars("BTC-USD", &bars(false)).unwrap();
        series.push_derived("4Y_MA", vec![1.0, 2.0, 3.0]);
        assert_eq!(series.raw_columns().len(), 5);
        assert_eq!(series.derived_columns().len(), 1);
        assert_eq!(series.column("4Y_MA").unwrap(), &[1.0, 2.0, 3.0]);

        series.push_derived("4Y_MA", vec![4.0, 5.0, 6.0]);
        assert_eq!(series.derived_columns().len(), 1);
        assert_eq!(series.column("4Y_MA").unwrap(), &[4.0, 5.0, 6.0]);
    }
}
