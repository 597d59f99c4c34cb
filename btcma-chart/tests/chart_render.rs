//! Pipeline output → chart widget, rendered into an in-memory buffer.

use btcma_chart::chart::{ChartData, PriceChart};
use btcma_chart::summary;
use btcma_chart::Theme;
use btcma_core::config::PipelineConfig;
use btcma_core::data::{DataError, DataProvider, DataSource, FetchResult, SilentProgress};
use btcma_core::domain::RawBar;
use btcma_core::pipeline::{prepare, PipelineOutput};
use chrono::NaiveDate;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

struct SyntheticProvider {
    days: usize,
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        // Roughly 300 → 100K over ten years
        let bars = (0..self.days)
            .map(|i| {
                let close = 300.0 * (1.0016f64).powi(i as i32);
                RawBar {
                    date: start + chrono::Duration::days(i as i64),
                    open: close,
                    high: close * 1.01,
                    low: close * 0.99,
                    close,
                    volume: 1_000,
                    adj_close: Some(close),
                }
            })
            .collect();
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::YahooFinance,
        })
    }
}

fn prepared(days: usize) -> (tempfile::TempDir, PipelineOutput) {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::with_cache_path(dir.path().join("btc_prices.csv"));
    let output = prepare(&config, &SyntheticProvider { days }, &SilentProgress).unwrap();
    (dir, output)
}

fn render(data: &ChartData, width: u16, height: u16) -> String {
    let theme = Theme::default();
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    PriceChart::new(data, &theme).render(area, &mut buf);

    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buf.cell((x, y)).unwrap().symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn ten_years_of_prices_render_with_title_and_legend() {
    let (_dir, output) = prepared(3653);
    let data = ChartData::from_output(&output);
    assert!(!data.is_empty());
    assert_eq!(data.price.len(), 3653);
    assert_eq!(data.average.len(), 3653);

    let text = render(&data, 140, 45);
    assert!(text.contains("Bitcoin Price with 4-Year Moving Average (Log Scale)"));
    assert!(text.contains("Bitcoin Price (USD)"));
    assert!(text.contains("4-Year Moving Average"));
    assert!(text.contains("$1K"));
    assert!(text.contains("$10K"));
    assert!(text.contains("2015"));
}

#[test]
fn y_axis_spans_the_price_decades() {
    let (_dir, output) = prepared(3653);
    let data = ChartData::from_output(&output);
    let y = data.y_scale().unwrap();
    // 300 .. ~100K
    assert_eq!(y.bounds()[0], 2.0);
    assert!(y.bounds()[1] >= 5.0);
}

#[test]
fn average_lags_a_rising_price() {
    let (_dir, output) = prepared(2000);
    let data = ChartData::from_output(&output);
    let (_, last_price) = *data.price.last().unwrap();
    let (_, last_average) = *data.average.last().unwrap();
    assert!(last_average < last_price);
}

#[test]
fn tiny_area_does_not_panic() {
    let (_dir, output) = prepared(30);
    let data = ChartData::from_output(&output);
    let _ = render(&data, 10, 4);
}

#[test]
fn summary_reports_source_and_last_values() {
    let (_dir, output) = prepared(10);
    let text = summary::render(&output);
    assert!(text.contains("Symbol:       BTC-USD"));
    assert!(text.contains("Source:       Yahoo Finance"));
    assert!(text.contains("Rows:         10 (2015-01-01 to 2015-01-10)"));
    assert!(text.contains("Price column: Adj Close"));
    assert!(text.contains("Window:       1460 days (4 years)"));
}
