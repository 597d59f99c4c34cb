//! Single-file CSV cache.
//!
//! Layout (the two preamble rows mirror the provider's multi-level download
//! header and are skipped on read; the third row is the real header):
//!
//! ```text
//! Price,Adj Close,Close,High,Low,Open,Volume
//! Ticker,BTC-USD,BTC-USD,BTC-USD,BTC-USD,BTC-USD,BTC-USD
//! Date,Adj Close,Close,High,Low,Open,Volume
//! 2015-01-01,314.248993,314.248993,320.434998,314.002991,320.434998,8036550
//! ```
//!
//! A file whose header lacks `Date` (or any price column) is corrupt: it is
//! deleted and the load fails. Writes are atomic (write to .tmp, rename).

use super::provider::DataError;
use crate::domain::{Column, PriceField, PriceSeries, DATE_COLUMN};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Rows skipped before the header.
pub const PREAMBLE_ROWS: usize = 2;

/// The CSV cache file.
pub struct CsvCache {
    path: PathBuf,
}

/// Why a cache file could not be turned into a series.
#[derive(Debug)]
enum ParseFailure {
    /// Header is unusable. The file is deleted.
    Schema(String),
    /// A data row is malformed. The file is left alone.
    Row { line: u64, reason: String },
}

impl CsvCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if the cache file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the cached series.
    ///
    /// On a schema failure the file is removed and [`DataError::CorruptCache`]
    /// is returned; there is no fallback.
    pub fn load(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let file = fs::File::open(&self.path)
            .map_err(|e| DataError::CacheError(format!("open {}: {e}", self.path.display())))?;

        match parse_series(file, symbol) {
            Ok(series) => {
                log::debug!(
                    "loaded {} rows from {}",
                    series.len(),
                    self.path.display()
                );
                Ok(series)
            }
            Err(ParseFailure::Schema(reason)) => {
                log::warn!(
                    "deleting corrupt cache file {}: {reason}",
                    self.path.display()
                );
                self.remove()?;
                Err(DataError::CorruptCache {
                    path: self.path.clone(),
                    reason,
                })
            }
            Err(ParseFailure::Row { line, reason }) => Err(DataError::CacheParse {
                path: self.path.clone(),
                line,
                reason,
            }),
        }
    }

    /// Persist the raw columns of `series`. Derived columns are not written.
    pub fn write(&self, series: &PriceSeries) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| DataError::CacheError(format!("failed to create dir: {e}")))?;
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        if let Err(e) = write_series(series, &tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DataError::CacheError(format!("atomic rename failed: {e}"))
        })?;

        log::debug!("wrote {} rows to {}", series.len(), self.path.display());
        Ok(())
    }

    /// Delete the cache file.
    pub fn remove(&self) -> Result<(), DataError> {
        fs::remove_file(&self.path).map_err(|e| {
            DataError::CacheError(format!("failed to delete {}: {e}", self.path.display()))
        })
    }
}

// ── CSV helpers ─────────────────────────────────────────────────────

fn write_series(series: &PriceSeries, path: &Path) -> Result<(), DataError> {
    let csv_err = |e: csv::Error| DataError::CacheError(format!("csv write: {e}"));

    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    let columns = series.raw_columns();

    let mut row: Vec<String> = Vec::with_capacity(columns.len() + 1);

    row.push("Price".into());
    row.extend(columns.iter().map(|c| c.name.clone()));
    wtr.write_record(&row).map_err(csv_err)?;

    row.clear();
    row.push("Ticker".into());
    row.extend(columns.iter().map(|_| series.symbol().to_string()));
    wtr.write_record(&row).map_err(csv_err)?;

    row.clear();
    row.push(DATE_COLUMN.into());
    row.extend(columns.iter().map(|c| c.name.clone()));
    wtr.write_record(&row).map_err(csv_err)?;

    for (i, date) in series.dates().iter().enumerate() {
        row.clear();
        row.push(date.format("%Y-%m-%d").to_string());
        row.extend(columns.iter().map(|c| format_value(c.values[i])));
        wtr.write_record(&row).map_err(csv_err)?;
    }

    wtr.flush()
        .map_err(|e| DataError::CacheError(format!("csv flush: {e}")))?;
    Ok(())
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        v.to_string()
    }
}

fn parse_series<R: Read>(reader: R, symbol: &str) -> Result<PriceSeries, ParseFailure> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = rdr.records();

    let row_err = |e: csv::Error| ParseFailure::Row {
        line: e.position().map(|p| p.line()).unwrap_or(0),
        reason: e.to_string(),
    };

    for _ in 0..PREAMBLE_ROWS {
        match records.next() {
            Some(rec) => {
                rec.map_err(row_err)?;
            }
            None => return Err(ParseFailure::Schema("file ends before the header row".into())),
        }
    }

    let header = match records.next() {
        Some(rec) => rec.map_err(row_err)?,
        None => return Err(ParseFailure::Schema("file ends before the header row".into())),
    };
    let header_line = header.position().map(|p| p.line()).unwrap_or(0);
    let names = dedupe_names(header.iter());

    let date_idx = names
        .iter()
        .position(|n| *n == DATE_COLUMN)
        .ok_or_else(|| ParseFailure::Schema(format!("'{DATE_COLUMN}' column not found")))?;

    if PriceField::select(names.iter().map(String::as_str)).is_none() {
        return Err(ParseFailure::Schema(
            "no 'Adj Close' or 'Close' column".into(),
        ));
    }

    // Every other named column is numeric. Unnamed trailing cells are ignored.
    let value_idx: Vec<usize> = (0..names.len())
        .filter(|&i| i != date_idx && !names[i].is_empty())
        .collect();

    let mut dates = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); value_idx.len()];

    for rec in records {
        let rec = rec.map_err(row_err)?;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);

        let raw_date = rec.get(date_idx).unwrap_or("");
        let date = parse_date(raw_date).ok_or_else(|| ParseFailure::Row {
            line,
            reason: format!("invalid date '{raw_date}'"),
        })?;
        dates.push(date);

        for (slot, &col) in value_idx.iter().enumerate() {
            let cell = rec.get(col).unwrap_or("");
            let v = parse_value(cell).ok_or_else(|| ParseFailure::Row {
                line,
                reason: format!("invalid number '{cell}' in column '{}'", names[col]),
            })?;
            values[slot].push(v);
        }
    }

    let columns = value_idx
        .iter()
        .zip(values)
        .map(|(&col, vals)| Column::new(names[col].as_str(), vals))
        .collect();

    PriceSeries::new(symbol, dates, columns).map_err(|e| ParseFailure::Row {
        line: header_line,
        reason: e.to_string(),
    })
}

/// Repeated header names get a `.1`, `.2`, ... suffix; the first keeps its name.
fn dedupe_names<'a>(header: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in header {
        let mut candidate = name.to_string();
        let mut n = 0;
        while !name.is_empty() && names.contains(&candidate) {
            n += 1;
            candidate = format!("{name}.{n}");
        }
        names.push(candidate);
    }
    names
}

/// Accepts plain dates, naive timestamps and offset timestamps.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z")
        .ok()
        .map(|dt| dt.date_naive())
}

/// Empty cells and `nan` load as NaN.
fn parse_value(s: &str) -> Option<f64> {
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<PriceSeries, ParseFailure> {
        parse_series(text.as_bytes(), "BTC-USD")
    }

    #[test]
    fn parses_date_formats() {
        let want = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        assert_eq!(parse_date("2015-01-01"), Some(want));
        assert_eq!(parse_date("2015-01-01 00:00:00"), Some(want));
        assert_eq!(parse_date("2015-01-01 00:00:00+00:00"), Some(want));
        assert_eq!(parse_date("2015-01-01T00:00:00Z"), Some(want));
        assert_eq!(parse_date("01/01/2015"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn parses_values() {
        assert_eq!(parse_value("314.25"), Some(314.25));
        assert_eq!(parse_value("8036550"), Some(8036550.0));
        assert!(parse_value("").unwrap().is_nan());
        assert!(parse_value("NaN").unwrap().is_nan());
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn skips_preamble_and_reads_header() {
        let text = "\
Price,Close,Volume
Ticker,BTC-USD,BTC-USD
Date,Close,Volume
2015-01-01,314.25,100
2015-01-02,315.03,
";
        let series = parse(text).unwrap();
        assert_eq!(series.column_names(), vec!["Close", "Volume"]);
        assert_eq!(series.prices(), &[314.25, 315.03]);
        assert!(series.column("Volume").unwrap()[1].is_nan());
    }

    #[test]
    fn repeated_header_names_get_suffixes() {
        let names = dedupe_names(["Date", "Close", "Close", "", "", "Close.1"].into_iter());
        assert_eq!(names, vec!["Date", "Close", "Close.1", "", "", "Close.1.1"]);
    }

    #[test]
    fn duplicate_price_column_loads() {
        let text = "a,b,c\nd,e,f\nDate,Close,Close\n2015-01-01,1,2\n";
        let series = parse(text).unwrap();
        assert_eq!(series.column_names(), vec!["Close", "Close.1"]);
        assert_eq!(series.prices(), &[1.0]);
        assert_eq!(series.column("Close.1").unwrap(), &[2.0]);
    }

    #[test]
    fn missing_date_is_schema_failure() {
        let text = "a,b\nc,d\nDay,Close\n2015-01-01,1\n";
        assert!(matches!(parse(text), Err(ParseFailure::Schema(_))));
    }

    #[test]
    fn short_file_is_schema_failure() {
        assert!(matches!(parse(""), Err(ParseFailure::Schema(_))));
        assert!(matches!(parse("Date,Close\n"), Err(ParseFailure::Schema(_))));
    }

    #[test]
    fn missing_price_column_is_schema_failure() {
        let text = "a,b\nc,d\nDate,Open\n2015-01-01,1\n";
        assert!(matches!(parse(text), Err(ParseFailure::Schema(_))));
    }

    #[test]
    fn bad_date_is_row_failure() {
        let text = "a,b\nc,d\nDate,Close\n2015-01-01,1\nyesterday,2\n";
        match parse(text) {
            Err(ParseFailure::Row { line, reason }) => {
                assert_eq!(line, 5);
                assert!(reason.contains("yesterday"));
            }
            other => panic!("expected row failure, got {other:?}"),
        }
    }

    #[test]
    fn bad_number_is_row_failure() {
        let text = "a,b\nc,d\nDate,Close\n2015-01-01,oops\n";
        assert!(matches!(parse(text), Err(ParseFailure::Row { .. })));
    }

    #[test]
    fn header_only_is_empty_series() {
        let text = "a,b\nc,d\nDate,Close\n";
        let series = parse(text).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn nan_formats_as_empty_cell() {
        assert_eq!(format_value(f64::NAN), "");
        assert_eq!(format_value(1.5), "1.5");
        assert_eq!(format_value(8036550.0), "8036550");
    }
}
