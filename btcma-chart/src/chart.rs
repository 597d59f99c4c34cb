//! Price chart widget - closing price and its moving average on a log axis
//!
//! Displays:
//! - Price line (blue) and moving-average line (red), each in the legend
//! - Decade ticks on the price axis, evenly spaced date ticks on the time axis
//! - Dashed gridlines at every interior tick
//!
//! Ratatui has no log axis, so both series are plotted as `log10(price)` and
//! the tick labels carry the real values.

use btcma_core::PipelineOutput;
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget,
    },
};

use crate::scale::{DateScale, LogScale};
use crate::theme::Theme;

pub const ASSET_NAME: &str = "Bitcoin";
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Price (USD, Log Scale)";

/// Cells between two gridline dots.
const GRID_DASH: f64 = 2.0;

/// Plot-ready series in axis coordinates.
///
/// Points whose value is missing or non-positive are dropped, so gaps show
/// up as straight segments between their neighbours.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub price_label: String,
    pub average_label: String,
    pub price: Vec<(f64, f64)>,
    pub average: Vec<(f64, f64)>,
    x_scale: Option<DateScale>,
    y_scale: Option<LogScale>,
}

impl ChartData {
    pub fn from_output(output: &PipelineOutput) -> Self {
        Self::from_columns(
            output.dates(),
            output.prices(),
            output.moving_average(),
            output.window_years,
        )
    }

    pub fn from_columns(
        dates: &[NaiveDate],
        prices: &[f64],
        average: &[f64],
        window_years: usize,
    ) -> Self {
        let price = project(dates, prices);
        let average_points = project(dates, average);

        let y_scale = LogScale::fit(
            prices
                .iter()
                .take(dates.len())
                .chain(average.iter().take(dates.len()))
                .copied(),
        );

        Self {
            title: format!("{ASSET_NAME} Price with {window_years}-Year Moving Average (Log Scale)"),
            price_label: format!("{ASSET_NAME} Price (USD)"),
            average_label: format!("{window_years}-Year Moving Average"),
            price,
            average: average_points,
            x_scale: DateScale::fit(dates),
            y_scale,
        }
    }

    /// True when nothing can be plotted.
    pub fn is_empty(&self) -> bool {
        self.x_scale.is_none() || self.y_scale.is_none()
    }

    pub fn x_scale(&self) -> Option<DateScale> {
        self.x_scale
    }

    pub fn y_scale(&self) -> Option<LogScale> {
        self.y_scale
    }
}

fn project(dates: &[NaiveDate], values: &[f64]) -> Vec<(f64, f64)> {
    dates
        .iter()
        .zip(values)
        .filter_map(|(&date, &v)| LogScale::project(v).map(|y| (DateScale::project(date), y)))
        .collect()
}

/// Chart widget
pub struct PriceChart<'a> {
    data: &'a ChartData,
    theme: &'a Theme,
}

impl<'a> PriceChart<'a> {
    pub fn new(data: &'a ChartData, theme: &'a Theme) -> Self {
        Self { data, theme }
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .title(Span::styled(
                format!(" {} ", self.data.title),
                Style::default()
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center)
            .title_bottom(
                Line::from(Span::styled(
                    " q / Esc: close ",
                    Style::default().fg(self.theme.text_secondary),
                ))
                .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.frame))
            .style(Style::default().bg(self.theme.background))
    }
}

impl<'a> Widget for PriceChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();

        let (Some(x_scale), Some(y_scale)) = (self.data.x_scale, self.data.y_scale) else {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new("No data to plot")
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.text_secondary))
                .render(inner, buf);
            return;
        };

        let y_labels = y_scale.labels();
        let y_label_width = y_labels.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 1;

        // Approximate plot area: inner block minus y labels and the x label row
        let inner = block.inner(area);
        let plot_width = inner.width.saturating_sub(y_label_width + 1).max(1);
        let plot_height = inner.height.saturating_sub(3).max(1);

        let x_count = x_label_count(plot_width);
        let x_ticks = x_scale.ticks(x_count);
        let x_labels = x_scale.labels(x_count);

        let x_bounds = x_scale.bounds();
        let y_bounds = y_scale.bounds();
        let grid = grid_points(
            interior(&x_ticks),
            interior(&y_scale.ticks()),
            x_bounds,
            y_bounds,
            plot_width,
            plot_height,
        );

        let label_style = Style::default().fg(self.theme.text_secondary);

        let datasets = vec![
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(self.theme.grid))
                .data(&grid),
            Dataset::default()
                .name(self.data.price_label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.price))
                .data(&self.data.price),
            Dataset::default()
                .name(self.data.average_label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.average))
                .data(&self.data.average),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled(X_AXIS_TITLE, label_style))
                    .style(Style::default().fg(self.theme.frame))
                    .bounds(x_bounds)
                    .labels(
                        x_labels
                            .into_iter()
                            .map(|l| Span::styled(l, label_style))
                            .collect::<Vec<_>>(),
                    ),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(Y_AXIS_TITLE, label_style))
                    .style(Style::default().fg(self.theme.frame))
                    .bounds(y_bounds)
                    .labels(
                        y_labels
                            .into_iter()
                            .map(|l| Span::styled(l, label_style))
                            .collect::<Vec<_>>(),
                    ),
            )
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

        chart.render(area, buf);
    }
}

/// Roughly one year label per 8 columns, between 2 and 11 labels.
fn x_label_count(plot_width: u16) -> usize {
    (plot_width as usize / 8).clamp(2, 11)
}

/// Ticks without the two at the bounds, which sit on the axes.
fn interior(ticks: &[f64]) -> &[f64] {
    if ticks.len() <= 2 {
        &[]
    } else {
        &ticks[1..ticks.len() - 1]
    }
}

/// Dotted horizontal and vertical lines, one dot every [`GRID_DASH`] cells.
fn grid_points(
    x_ticks: &[f64],
    y_ticks: &[f64],
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    plot_width: u16,
    plot_height: u16,
) -> Vec<(f64, f64)> {
    let dx = (x_bounds[1] - x_bounds[0]) / plot_width as f64 * GRID_DASH;
    let dy = (y_bounds[1] - y_bounds[0]) / plot_height as f64 * GRID_DASH;
    if dx <= 0.0 || dy <= 0.0 {
        return Vec::new();
    }

    let mut points = Vec::new();
    for &y in y_ticks {
        let mut x = x_bounds[0];
        while x <= x_bounds[1] {
            points.push((x, y));
            x += dx;
        }
    }
    for &x in x_ticks {
        let mut y = y_bounds[0];
        while y <= y_bounds[1] {
            points.push((x, y));
            y += dy;
        }
    }
    points
}
