//! Trailing rolling mean with a minimum-periods rule.
//!
//! Position i averages the non-missing values in `values[i+1-window..=i]`
//! (clamped at 0). The result is defined once at least `min_periods` values
//! are available, so with `min_periods = 1` the first output equals the
//! first input and the window grows until it reaches full length.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    min_periods: usize,
    name: String,
}

impl RollingMean {
    pub fn new(window: usize, min_periods: usize) -> Self {
        assert!(window >= 1, "rolling window must be >= 1");
        assert!(
            (1..=window).contains(&min_periods),
            "min_periods must be in 1..=window"
        );
        Self {
            window,
            min_periods,
            name: format!("rolling_mean_{window}"),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Indicator for RollingMean {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.min_periods - 1
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let mut result = Vec::with_capacity(values.len());
        let mut sum = 0.0;
        let mut count = 0usize;

        for (i, &entering) in values.iter().enumerate() {
            if !entering.is_nan() {
                sum += entering;
                count += 1;
            }
            if i >= self.window {
                let leaving = values[i - self.window];
                if !leaving.is_nan() {
                    sum -= leaving;
                    count -= 1;
                }
            }

            result.push(if count >= self.min_periods {
                sum / count as f64
            } else {
                f64::NAN
            });
        }

        result
    }
}
