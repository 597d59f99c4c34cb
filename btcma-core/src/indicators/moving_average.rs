//! Indicator stage: append the moving average of the preferred price column.

use super::Indicator;
use crate::domain::{PriceField, PriceSeries};

/// Compute `indicator` over the series' price field (`Adj Close` if present,
/// else `Close`) and append it as derived column `column`.
///
/// Total: every series carries a price column by construction.
pub fn append_moving_average(
    series: &mut PriceSeries,
    indicator: &dyn Indicator,
    column: &str,
) -> PriceField {
    let field = series.price_field();
    let values = indicator.compute(series.prices());
    let undefined = values.iter().filter(|v| v.is_nan()).count();
    log::debug!(
        "{} over '{}': {} values, lookback {}, {undefined} undefined",
        indicator.name(),
        field.column_name(),
        values.len(),
        indicator.lookback()
    );
    series.push_derived(column, values);
    field
}
