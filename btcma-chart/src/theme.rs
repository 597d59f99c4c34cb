//! Color tokens for the price chart.
//!
//! # Color Palette
//! - **Price**: Blue (the raw closing price series)
//! - **Average**: Red (the long-window moving average)
//! - **Grid**: Dim gray (dashed gridlines, kept behind both series)
//! - **Frame**: Steel blue (border and axes)

use ratatui::style::Color;

/// Chart theme
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Dark background behind the plot
    pub background: Color,
    /// Price line
    pub price: Color,
    /// Moving-average line
    pub average: Color,
    /// Gridline dots
    pub grid: Color,
    /// Border and axis lines
    pub frame: Color,
    /// Title text
    pub text_primary: Color,
    /// Axis titles and tick labels
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// Blue price over a red average on charcoal.
    pub fn classic() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            price: Color::Rgb(65, 135, 255),
            average: Color::Rgb(230, 40, 40),
            grid: Color::Rgb(70, 70, 78),
            frame: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_colors_are_distinct() {
        let t = Theme::default();
        assert_ne!(t.price, t.average);
        assert_ne!(t.grid, t.price);
        assert_ne!(t.grid, t.average);
    }
}
