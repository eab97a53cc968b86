//! Technical indicator types and implementations.
//!
//! Indicators are pure functions from a [`PriceSeries`](crate::domain::price::PriceSeries)
//! and a window parameter to an [`IndicatorSeries`]. Points inside an
//! indicator's warm-up window carry `valid: false`; callers must treat an
//! invalid or missing point as disqualifying, never as a numeric sentinel.

pub mod ema;
pub mod rsi;
pub mod trailing_gain;
pub mod volatility;

pub use ema::ema;
pub use rsi::rsi;
pub use trailing_gain::trailing_gain;
pub use volatility::volatility;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Rsi(usize),
    Ema(usize),
    Volatility(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub kind: IndicatorKind,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value on exactly `date`. `None` when the series has no point there
    /// or the point falls inside the warm-up window.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.values
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .filter(|&i| self.values[i].valid)
            .map(|i| self.values[i].value)
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Rsi(window) => write!(f, "RSI({})", window),
            IndicatorKind::Ema(span) => write!(f, "EMA({})", span),
            IndicatorKind::Volatility(window) => write!(f, "VOL({})", window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn kind_display() {
        assert_eq!(IndicatorKind::Rsi(14).to_string(), "RSI(14)");
        assert_eq!(IndicatorKind::Ema(5).to_string(), "EMA(5)");
        assert_eq!(IndicatorKind::Volatility(14).to_string(), "VOL(14)");
    }

    #[test]
    fn value_at_skips_invalid_points() {
        let series = IndicatorSeries {
            kind: IndicatorKind::Rsi(2),
            values: vec![
                IndicatorPoint {
                    date: d(1),
                    valid: false,
                    value: 0.0,
                },
                IndicatorPoint {
                    date: d(2),
                    valid: true,
                    value: 55.0,
                },
            ],
        };

        assert_eq!(series.value_at(d(1)), None);
        assert_eq!(series.value_at(d(2)), Some(55.0));
        assert_eq!(series.value_at(d(3)), None);
    }
}
