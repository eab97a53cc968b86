//! Trading-day calendar resolution.
//!
//! Nominal weekly anchors are plain calendar dates and routinely land on
//! holidays or weekends; the resolver snaps them forward onto the nearest
//! date that actually has data, within a bounded lookahead.

use chrono::{Duration, NaiveDate};

/// Smallest date in `available` that is `>= requested`, provided it lies no
/// more than `max_lookahead` calendar days after `requested`. `available`
/// must be sorted ascending (see `PriceTable::all_dates`).
///
/// `None` means the caller should skip the week; it is not a fatal error.
pub fn next_trading_day(
    available: &[NaiveDate],
    requested: NaiveDate,
    max_lookahead: i64,
) -> Option<NaiveDate> {
    let idx = available.partition_point(|&d| d < requested);
    let candidate = *available.get(idx)?;

    if candidate - requested <= Duration::days(max_lookahead) {
        Some(candidate)
    } else {
        None
    }
}
