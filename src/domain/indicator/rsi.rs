//! RSI-style momentum oscillator.
//!
//! Day-over-day deltas split into gains and losses (loss as positive
//! magnitude), each averaged with a trailing simple moving average over
//! `window` periods: RSI = 100 - 100/(1 + avg_gain/avg_loss).
//! If avg_loss == 0: RSI = 100.
//!
//! Warmup: the first `window` points are invalid (a delta needs a prior
//! close, and the average needs `window` deltas).

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries};
use crate::domain::price::PriceSeries;

pub fn rsi(series: &PriceSeries, window: usize) -> IndicatorSeries {
    let points = series.points();
    let mut values = Vec::with_capacity(points.len());

    let mut gains = Vec::with_capacity(points.len().saturating_sub(1));
    let mut losses = Vec::with_capacity(points.len().saturating_sub(1));
    for pair in points.windows(2) {
        let change = pair[1].close - pair[0].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    for (i, point) in points.iter().enumerate() {
        if window == 0 || i < window {
            values.push(IndicatorPoint {
                date: point.date,
                valid: false,
                value: 0.0,
            });
            continue;
        }

        // Deltas ending at point i live at gains[i - window .. i].
        let avg_gain = gains[i - window..i].iter().sum::<f64>() / window as f64;
        let avg_loss = losses[i - window..i].iter().sum::<f64>() / window as f64;

        let value = if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };

        values.push(IndicatorPoint {
            date: point.date,
            valid: true,
            value,
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Rsi(window),
        values,
    }
}
