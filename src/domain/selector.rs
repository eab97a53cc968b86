//! Weekly candidate selection.
//!
//! Instruments are ranked by trailing gain over the lookback window ending
//! at the anchor, then filtered in rank order by oscillator band and moving
//! average crossover until `top_n` qualify. Filtering is lazy: indicators
//! are only computed for instruments actually visited before the target
//! count is reached.

use crate::domain::indicator::{ema, rsi, trailing_gain};
use crate::domain::price::{PriceSeries, PriceTable};
use chrono::NaiveDate;

pub const EMA_SHORT_SPAN: usize = 5;
pub const EMA_LONG_SPAN: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionParams {
    pub lookback_days: i64,
    pub top_n: usize,
    pub rsi_window: usize,
    pub rsi_low: f64,
    pub rsi_high: f64,
}

/// Tickers qualifying at `anchor`, at most `top_n`, in descending
/// trailing-gain order.
pub fn select_candidates(
    table: &PriceTable,
    anchor: NaiveDate,
    params: &SelectionParams,
) -> Vec<String> {
    let mut ranked: Vec<(&str, &PriceSeries, f64)> = table
        .iter()
        .filter_map(|(ticker, series)| {
            trailing_gain(series, anchor, params.lookback_days).map(|gain| (ticker, series, gain))
        })
        .collect();
    // Stable sort keeps the table's ticker order on equal gains.
    ranked.sort_by(|a, b| b.2.total_cmp(&a.2));

    ranked
        .into_iter()
        .filter(|(_, series, _)| qualifies(series, anchor, params))
        .take(params.top_n)
        .map(|(ticker, _, _)| ticker.to_string())
        .collect()
}

/// Oscillator-band and trend-confirmation filter at the anchor date.
///
/// Any indicator without a valid value at the anchor disqualifies the
/// instrument (insufficient warm-up history, or no data on that date).
fn qualifies(series: &PriceSeries, anchor: NaiveDate, params: &SelectionParams) -> bool {
    let Some(osc) = rsi(series, params.rsi_window).value_at(anchor) else {
        return false;
    };
    let Some(short) = ema(series, EMA_SHORT_SPAN).value_at(anchor) else {
        return false;
    };
    let Some(long) = ema(series, EMA_LONG_SPAN).value_at(anchor) else {
        return false;
    };

    osc >= params.rsi_low && osc <= params.rsi_high && short > long
}
