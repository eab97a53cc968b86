//! Trailing percentage gain over a lookback window ending at a given date.

use crate::domain::price::PriceSeries;
use chrono::{Duration, NaiveDate};

/// Percentage change between the first and last close with a date in
/// `(as_of - lookback_days, as_of]`.
///
/// `None` when fewer than two closes fall in the window, or the first
/// close is zero.
pub fn trailing_gain(series: &PriceSeries, as_of: NaiveDate, lookback_days: i64) -> Option<f64> {
    // Exclusive lower bound: dates strictly after as_of - lookback_days.
    let from = as_of - Duration::days(lookback_days) + Duration::days(1);
    let window = series.window(from, as_of);

    if window.len() < 2 {
        return None;
    }

    let first = window[0].close;
    let last = window[window.len() - 1].close;
    if first == 0.0 {
        return None;
    }

    Some((last - first) / first * 100.0)
}
