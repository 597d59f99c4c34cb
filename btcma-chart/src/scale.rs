//! Axis scales for the price chart.
//!
//! Ratatui places axis labels evenly between the bounds, so both scales hand
//! out evenly spaced ticks: decades on the log price axis and equal day
//! steps on the date axis. Gridlines are drawn at the same ticks.

use chrono::{Datelike, NaiveDate};

/// Base-10 log scale snapped to whole decades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogScale {
    lo_exp: i32,
    hi_exp: i32,
}

impl LogScale {
    /// Fit the decades enclosing every plottable value. `None` if nothing is
    /// plottable (all values missing or non-positive).
    pub fn fit(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite() && *v > 0.0)
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        let lo_exp = min.log10().floor() as i32;
        let mut hi_exp = max.log10().ceil() as i32;
        if hi_exp <= lo_exp {
            hi_exp = lo_exp + 1;
        }
        Some(Self { lo_exp, hi_exp })
    }

    /// Map a price into log space. Missing and non-positive values are masked.
    pub fn project(value: f64) -> Option<f64> {
        (value.is_finite() && value > 0.0).then(|| value.log10())
    }

    pub fn bounds(&self) -> [f64; 2] {
        [self.lo_exp as f64, self.hi_exp as f64]
    }

    /// One tick per decade, ascending.
    pub fn ticks(&self) -> Vec<f64> {
        (self.lo_exp..=self.hi_exp).map(|e| e as f64).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        (self.lo_exp..=self.hi_exp).map(format_decade).collect()
    }
}

/// `$1`, `$10`, `$100`, `$1K` … `$100B`; fractions down to `$0.000001`;
/// anything beyond as `$1e{exp}`.
pub fn format_decade(exp: i32) -> String {
    match exp {
        -6..=-1 => format!("$0.{}1", "0".repeat((-exp - 1) as usize)),
        0..=2 => format!("$1{}", "0".repeat(exp as usize)),
        3..=5 => format!("$1{}K", "0".repeat((exp - 3) as usize)),
        6..=8 => format!("$1{}M", "0".repeat((exp - 6) as usize)),
        9..=11 => format!("$1{}B", "0".repeat((exp - 9) as usize)),
        _ => format!("$1e{exp}"),
    }
}

/// Linear date scale over the span of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateScale {
    first: NaiveDate,
    last: NaiveDate,
}

impl DateScale {
    /// Fit the earliest and latest dates. The index need not be sorted.
    pub fn fit(dates: &[NaiveDate]) -> Option<Self> {
        let first = dates.iter().min().copied()?;
        let last = dates.iter().max().copied()?;
        Some(Self { first, last })
    }

    pub fn project(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    pub fn bounds(&self) -> [f64; 2] {
        let lo = Self::project(self.first);
        let hi = Self::project(self.last);
        if hi > lo {
            [lo, hi]
        } else {
            [lo - 1.0, hi + 1.0]
        }
    }

    /// `n` evenly spaced ticks from the first to the last date (n >= 2).
    pub fn ticks(&self, n: usize) -> Vec<f64> {
        let n = n.max(2);
        let [lo, hi] = self.bounds();
        let step = (hi - lo) / (n - 1) as f64;
        (0..n).map(|i| lo + step * i as f64).collect()
    }

    /// Labels for [`ticks`](Self::ticks): years for multi-year spans,
    /// full dates otherwise.
    pub fn labels(&self, n: usize) -> Vec<String> {
        let multi_year = self.last.year() - self.first.year() >= 2;
        self.ticks(n)
            .into_iter()
            .map(|x| {
                let date = NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
                    .unwrap_or(self.first);
                if multi_year {
                    // Ticks landing in late December read better as the next year
                    let shifted = date + chrono::Duration::days(15);
                    shifted.format("%Y").to_string()
                } else {
                    date.format("%Y-%m-%d").to_string()
                }
            })
            .collect()
    }
}
