//! Single-instrument intraweek trade simulation.

use crate::domain::price::PriceSeries;
use chrono::{Duration, NaiveDate};
use std::fmt;

/// How a simulated trade ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    StopLoss,
    TakeProfit,
    EndOfWeek,
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitKind::StopLoss => write!(f, "Stop Loss"),
            ExitKind::TakeProfit => write!(f, "Take Profit"),
            ExitKind::EndOfWeek => write!(f, "End of Week"),
        }
    }
}

/// Outcome of one instrument's trade for one week. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    pub ticker: String,
    pub anchor: NaiveDate,
    pub exit: ExitKind,
    pub change_pct: f64,
}

/// Buy at the first close in `[anchor, anchor + 6 days]` and walk the week.
///
/// Exits on the first close whose change breaches the stop-loss (checked
/// first) or take-profit threshold, recording the breach-day change, not
/// the threshold. Otherwise exits at the week's final close. `None` when
/// the window holds no data.
pub fn simulate_trade(
    ticker: &str,
    series: &PriceSeries,
    anchor: NaiveDate,
    stop_loss_pct: f64,
    take_profit_pct: f64,
) -> Option<TradeOutcome> {
    let week = series.window(anchor, anchor + Duration::days(6));
    let buy_price = week.first()?.close;

    let mut change_pct = 0.0;
    for point in week {
        change_pct = (point.close - buy_price) / buy_price * 100.0;

        if change_pct <= -stop_loss_pct {
            return Some(TradeOutcome {
                ticker: ticker.to_string(),
                anchor,
                exit: ExitKind::StopLoss,
                change_pct,
            });
        }
        if change_pct >= take_profit_pct {
            return Some(TradeOutcome {
                ticker: ticker.to_string(),
                anchor,
                exit: ExitKind::TakeProfit,
                change_pct,
            });
        }
    }

    Some(TradeOutcome {
        ticker: ticker.to_string(),
        anchor,
        exit: ExitKind::EndOfWeek,
        change_pct,
    })
}
