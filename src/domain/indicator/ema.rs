//! Exponential moving average.
//!
//! alpha = 2/(span+1), seeded with the first close:
//! EMA[0] = C[0], EMA[i] = C[i]*alpha + EMA[i-1]*(1-alpha).
//! Every point is valid; there is no warm-up gap.

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries};
use crate::domain::price::PriceSeries;

pub fn ema(series: &PriceSeries, span: usize) -> IndicatorSeries {
    let points = series.points();
    let mut values = Vec::with_capacity(points.len());

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut current = 0.0;

    for (i, point) in points.iter().enumerate() {
        current = if i == 0 {
            point.close
        } else {
            point.close * alpha + current * (1.0 - alpha)
        };

        values.push(IndicatorPoint {
            date: point.date,
            valid: span > 0,
            value: current,
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Ema(span),
        values,
    }
}
