//! btcma: Bitcoin price with its 4-year moving average on a log-scale chart.
//!
//! Stages:
//! 1. Load `btc_prices.csv` from the working directory, or download BTC-USD
//!    daily prices from Yahoo Finance and cache them there
//! 2. Append the 1460-day rolling mean of the adjusted (or plain) close
//! 3. Show the chart full-screen until it is closed
//!
//! Any failure prints a diagnostic and exits with status 1.

use anyhow::Result;
use clap::Parser;

use btcma_chart::{logging, summary, viewer, ChartData, Theme};
use btcma_core::data::{PipelineProgress, StdoutProgress, YahooProvider};
use btcma_core::{prepare, PipelineConfig};

#[derive(Parser)]
#[command(
    name = "btcma",
    about = "Bitcoin price with its 4-year moving average on a log-scale chart"
)]
struct Cli {
    /// Print a text summary instead of opening the chart.
    #[arg(long, default_value_t = false)]
    no_display: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = PipelineConfig::default();
    let provider = YahooProvider::new();
    let progress = StdoutProgress;

    let output = prepare(&config, &provider, &progress)?;
    log::debug!(
        "prepared {} rows, price column {}",
        output.series.len(),
        output.price_field.column_name()
    );

    if cli.no_display {
        print!("{}", summary::render(&output));
    } else {
        progress.on_render();
        let data = ChartData::from_output(&output);
        viewer::show(&data, &Theme::default())?;
    }

    progress.on_done();
    Ok(())
}
