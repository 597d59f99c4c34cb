//! Plain-text report printed instead of the chart in non-interactive runs.

use btcma_core::{DataSource, PipelineOutput};
use std::fmt::Write;

/// Multi-line summary of the prepared series.
pub fn render(output: &PipelineOutput) -> String {
    let series = &output.series;
    let mut out = String::new();

    let source = match output.source {
        DataSource::Cache => "local cache",
        DataSource::YahooFinance => "Yahoo Finance",
    };
    let _ = writeln!(out, "Symbol:       {}", series.symbol());
    let _ = writeln!(out, "Source:       {source}");

    match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => {
            let _ = writeln!(out, "Rows:         {} ({first} to {last})", series.len());
        }
        _ => {
            let _ = writeln!(out, "Rows:         0");
        }
    }
    let _ = writeln!(out, "Price column: {}", output.price_field.column_name());
    let _ = writeln!(
        out,
        "Window:       {} days ({} years)",
        output.window, output.window_years
    );

    let price = last_valid(output.prices());
    let average = last_valid(output.moving_average());
    if let Some(p) = price {
        let _ = writeln!(out, "Last price:   ${p:.2}");
    }
    if let Some(ma) = average {
        let _ = writeln!(out, "Last average: ${ma:.2}");
    }
    if let (Some(p), Some(ma)) = (price, average) {
        if ma > 0.0 {
            let _ = writeln!(out, "Price / MA:   {:.2}x", p / ma);
        }
    }
    out
}

fn last_valid(values: &[f64]) -> Option<f64> {
    values.iter().rev().copied().find(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_valid_skips_trailing_nan() {
        assert_eq!(last_valid(&[1.0, 2.0, f64::NAN]), Some(2.0));
        assert_eq!(last_valid(&[f64::NAN]), None);
        assert_eq!(last_valid(&[]), None);
    }
}
