//! Close-to-close volatility: trailing simple mean of absolute daily changes.
//!
//! Warmup: first `window` points invalid, same alignment as the oscillator.

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries};
use crate::domain::price::PriceSeries;

pub fn volatility(series: &PriceSeries, window: usize) -> IndicatorSeries {
    let points = series.points();
    let mut values = Vec::with_capacity(points.len());

    let mut changes = Vec::with_capacity(points.len().saturating_sub(1));
    for pair in points.windows(2) {
        changes.push((pair[1].close - pair[0].close).abs());
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

        let avg = changes[i - window..i].iter().sum::<f64>() / window as f64;
        values.push(IndicatorPoint {
            date: point.date,
            valid: true,
            value: avg,
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Volatility(window),
        values,
    }
}
