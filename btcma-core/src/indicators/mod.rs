//! Indicator trait, the rolling mean, and the moving-average stage.
//!
//! Indicators are pure functions: value series in, series of the same length
//! out. Undefined positions are `f64::NAN`.

pub mod moving_average;
pub mod rolling_mean;

pub use moving_average::append_moving_average;
pub use rolling_mean::RollingMean;

/// Trait for indicators.
///
/// # Look-ahead guard
/// The output at position t may only depend on inputs at positions <= t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "rolling_mean_1460").
    fn name(&self) -> &str;

    /// Number of leading positions that may be NaN even with clean input.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole input.
    ///
    /// Returns a `Vec<f64>` of the same length as `values`.
    fn compute(&self, values: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are within `epsilon` of each other.
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-9;
