//! Multi-week backtest orchestration.
//!
//! Walks consecutive weekly anchors, selects candidates at each resolved
//! anchor, simulates one trade per candidate, and compounds the weekly
//! aggregate returns into a cumulative multiplier.

use crate::domain::calendar::next_trading_day;
use crate::domain::error::MeanrevError;
use crate::domain::price::PriceTable;
use crate::domain::selector::{select_candidates, SelectionParams};
use crate::domain::simulator::{simulate_trade, TradeOutcome};
use chrono::{Duration, NaiveDate};

/// Calendar days an anchor may slide forward onto a trading day.
pub const ANCHOR_LOOKAHEAD_DAYS: i64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestParams {
    pub start_date: NaiveDate,
    pub num_weeks: usize,
    pub lookback_days: i64,
    pub top_n: usize,
    pub rsi_window: usize,
    pub rsi_low: f64,
    pub rsi_high: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    pub allocation_per_trade: f64,
}

impl Default for BacktestParams {
    fn default() -> Self {
        BacktestParams {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            num_weeks: 5,
            lookback_days: 25,
            top_n: 5,
            rsi_window: 14,
            rsi_low: 50.0,
            rsi_high: 60.0,
            stop_loss_pct: 4.0,
            take_profit_pct: 8.0,
            allocation_per_trade: 100.0,
        }
    }
}

impl BacktestParams {
    fn selection(&self) -> SelectionParams {
        SelectionParams {
            lookback_days: self.lookback_days,
            top_n: self.top_n,
            rsi_window: self.rsi_window,
            rsi_low: self.rsi_low,
            rsi_high: self.rsi_high,
        }
    }
}

/// One traded week: the resolved anchor, every trade outcome, and the
/// equal-allocation aggregate return for the week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekResult {
    pub anchor: NaiveDate,
    pub outcomes: Vec<TradeOutcome>,
    pub aggregate_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub weeks: Vec<WeekResult>,
    pub cumulative_multiplier: f64,
}

impl RunResult {
    pub fn cumulative_pct(&self) -> f64 {
        (self.cumulative_multiplier - 1.0) * 100.0
    }
}

/// Run `num_weeks` consecutive weekly rounds starting at `start_date`.
///
/// Nominal anchors step by seven calendar days from the start date and are
/// resolved onto trading days individually. Weeks that cannot be resolved,
/// or where nothing qualifies, are skipped and contribute no multiplier
/// term.
pub fn run_backtest(table: &PriceTable, params: &BacktestParams) -> Result<RunResult, MeanrevError> {
    if table.is_empty() {
        return Err(MeanrevError::EmptyTable);
    }

    let calendar = table.all_dates();
    let selection = params.selection();

    let mut weeks = Vec::new();
    let mut multiplier = 1.0;

    for week in 0..params.num_weeks {
        let nominal = params.start_date + Duration::days(7 * week as i64);
        let Some(anchor) = next_trading_day(&calendar, nominal, ANCHOR_LOOKAHEAD_DAYS) else {
            eprintln!("Skipping week of {nominal}: no trading day within {ANCHOR_LOOKAHEAD_DAYS} days");
            continue;
        };

        let candidates = select_candidates(table, anchor, &selection);
        if candidates.is_empty() {
            eprintln!("Skipping week of {anchor}: no qualifying instruments");
            continue;
        }

        let outcomes: Vec<TradeOutcome> = candidates
            .iter()
            .filter_map(|ticker| {
                let series = table.series(ticker)?;
                simulate_trade(
                    ticker,
                    series,
                    anchor,
                    params.stop_loss_pct,
                    params.take_profit_pct,
                )
            })
            .collect();
        if outcomes.is_empty() {
            eprintln!("Skipping week of {anchor}: no simulatable trades");
            continue;
        }

        let aggregate_pct = aggregate_return(&outcomes, params.allocation_per_trade);
        multiplier *= 1.0 + aggregate_pct / 100.0;

        weeks.push(WeekResult {
            anchor,
            outcomes,
            aggregate_pct,
        });
    }

    Ok(RunResult {
        weeks,
        cumulative_multiplier: multiplier,
    })
}

/// Equal dollar allocation per trade: total dollar change over total
/// capital deployed, as a percentage.
fn aggregate_return(outcomes: &[TradeOutcome], allocation: f64) -> f64 {
    let gained: f64 = outcomes
        .iter()
        .map(|o| allocation * o.change_pct / 100.0)
        .sum();
    gained / (allocation * outcomes.len() as f64) * 100.0
}
