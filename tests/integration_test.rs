//! End-to-end backtests over in-memory price tables.
//!
//! Covers the full pipeline: table -> calendar resolution -> selection ->
//! per-instrument simulation -> weekly aggregation -> compounding.

mod common;

use approx::assert_relative_eq;
use common::*;
use meanrev::domain::backtest::{run_backtest, BacktestParams};
use meanrev::domain::error::MeanrevError;
use meanrev::domain::simulator::ExitKind;
use meanrev::ports::data_port::DataPort;

/// Wide oscillator band and short warmup so rising instruments qualify.
fn params(start: chrono::NaiveDate, weeks: usize) -> BacktestParams {
    BacktestParams {
        start_date: start,
        num_weeks: weeks,
        lookback_days: 10,
        top_n: 5,
        rsi_window: 3,
        rsi_low: 0.0,
        rsi_high: 100.0,
        stop_loss_pct: 4.0,
        take_profit_pct: 8.0,
        allocation_per_trade: 100.0,
    }
}

/// Ten rising warmup closes (Jan 1-12 weekdays) followed by one trading week.
fn with_warmup(week: &[f64]) -> Vec<f64> {
    let mut closes = rising_warmup(90.0, 99.0, 10);
    closes.extend_from_slice(week);
    closes
}

mod weekly_rotation_pipeline {
    use super::*;

    #[test]
    fn mixed_week_aggregates_both_outcomes() {
        let start = date(2024, 1, 1);
        let mut table = PriceTable::new();
        table.insert(
            "GAIN".into(),
            weekday_series(start, &with_warmup(&[100.0, 101.0, 102.0, 103.0, 105.0])),
        );
        table.insert(
            "LOSS".into(),
            weekday_series(start, &with_warmup(&[100.0, 94.0, 95.0, 96.0, 97.0])),
        );

        let result = run_backtest(&table, &params(date(2024, 1, 15), 1)).unwrap();

        assert_eq!(result.weeks.len(), 1);
        let week = &result.weeks[0];
        assert_eq!(week.anchor, date(2024, 1, 15));
        assert_eq!(week.outcomes.len(), 2);

        let gain = week.outcomes.iter().find(|o| o.ticker == "GAIN").unwrap();
        assert_eq!(gain.exit, ExitKind::EndOfWeek);
        assert_relative_eq!(gain.change_pct, 5.0, max_relative = 1e-9);

        // The stop records the breach-day change, not the threshold.
        let loss = week.outcomes.iter().find(|o| o.ticker == "LOSS").unwrap();
        assert_eq!(loss.exit, ExitKind::StopLoss);
        assert_relative_eq!(loss.change_pct, -6.0, max_relative = 1e-9);

        assert_relative_eq!(week.aggregate_pct, -0.5, max_relative = 1e-9);
        assert_relative_eq!(result.cumulative_multiplier, 0.995, max_relative = 1e-9);
    }

    #[test]
    fn take_profit_exits_mid_week() {
        let start = date(2024, 1, 1);
        let mut table = PriceTable::new();
        // +9% on Wednesday breaches the 8% target; Friday's crash is never seen.
        table.insert(
            "POP".into(),
            weekday_series(start, &with_warmup(&[100.0, 104.0, 109.0, 60.0, 50.0])),
        );

        let result = run_backtest(&table, &params(date(2024, 1, 15), 1)).unwrap();

        let outcome = &result.weeks[0].outcomes[0];
        assert_eq!(outcome.exit, ExitKind::TakeProfit);
        assert_relative_eq!(outcome.change_pct, 9.0, max_relative = 1e-9);
    }

    #[test]
    fn weekly_returns_compound_and_exhausted_data_is_skipped() {
        let start = date(2024, 1, 1);
        let mut closes = rising_warmup(90.0, 99.0, 10);
        closes.extend([100.0, 102.0, 104.0, 107.0, 110.0]); // +10%
        closes.extend([110.0, 109.0, 107.0, 106.0, 104.5]); // -5%

        let mut table = PriceTable::new();
        table.insert("AAA".into(), weekday_series(start, &closes));

        // Third week's anchor lands past the end of the data.
        let result = run_backtest(&table, &params(date(2024, 1, 15), 3)).unwrap();

        assert_eq!(result.weeks.len(), 2);
        assert_relative_eq!(result.weeks[0].aggregate_pct, 10.0, max_relative = 1e-9);
        assert_relative_eq!(result.weeks[1].aggregate_pct, -5.0, max_relative = 1e-9);
        assert_relative_eq!(
            result.cumulative_multiplier,
            1.10 * 0.95,
            max_relative = 1e-9
        );
        assert_relative_eq!(result.cumulative_pct(), 4.5, max_relative = 1e-9);
    }

    #[test]
    fn weekend_start_resolves_to_monday_anchor() {
        let start = date(2024, 1, 1);
        let mut table = PriceTable::new();
        table.insert(
            "AAA".into(),
            weekday_series(start, &with_warmup(&[100.0, 101.0, 102.0, 103.0, 104.0])),
        );

        // 2024-01-13 is a Saturday.
        let result = run_backtest(&table, &params(date(2024, 1, 13), 1)).unwrap();

        assert_eq!(result.weeks.len(), 1);
        assert_eq!(result.weeks[0].anchor, date(2024, 1, 15));
    }

    #[test]
    fn week_with_no_qualifiers_leaves_multiplier_untouched() {
        let start = date(2024, 1, 1);
        // Steady decline: the moving-average crossover never confirms.
        let closes: Vec<f64> = (0..15).map(|i| 200.0 - 2.0 * f64::from(i)).collect();
        let mut table = PriceTable::new();
        table.insert("DOWN".into(), weekday_series(start, &closes));

        let result = run_backtest(&table, &params(date(2024, 1, 15), 1)).unwrap();

        assert!(result.weeks.is_empty());
        assert_relative_eq!(result.cumulative_multiplier, 1.0);
    }

    #[test]
    fn empty_table_is_rejected() {
        let table = PriceTable::new();
        let err = run_backtest(&table, &params(date(2024, 1, 15), 1)).unwrap_err();
        assert!(matches!(err, MeanrevError::EmptyTable));
    }
}

mod selection_through_pipeline {
    use super::*;

    #[test]
    fn top_n_keeps_strongest_trailing_gains() {
        let start = date(2024, 1, 1);
        let mut table = PriceTable::new();
        for (ticker, step) in [("AAA", 5.0), ("BBB", 2.0), ("CCC", 1.0)] {
            let closes: Vec<f64> = (0..11).map(|i| 100.0 + step * f64::from(i)).collect();
            table.insert(ticker.into(), weekday_series(start, &closes));
        }

        let mut p = params(date(2024, 1, 15), 1);
        p.top_n = 2;
        let result = run_backtest(&table, &p).unwrap();

        let tickers: Vec<&str> = result.weeks[0]
            .outcomes
            .iter()
            .map(|o| o.ticker.as_str())
            .collect();
        assert_eq!(tickers, vec!["AAA", "BBB"]);
    }

    #[test]
    fn oscillator_band_excludes_overheated_instruments() {
        let start = date(2024, 1, 1);
        let mut table = PriceTable::new();
        // Monotonic rise pins the oscillator at 100.
        table.insert(
            "HOT".into(),
            weekday_series(start, &rising_warmup(100.0, 130.0, 15)),
        );

        let mut p = params(date(2024, 1, 15), 1);
        p.rsi_low = 40.0;
        p.rsi_high = 60.0;
        let result = run_backtest(&table, &p).unwrap();

        assert!(result.weeks.is_empty());
    }
}

mod data_port_contract {
    use super::*;

    #[test]
    fn mock_port_round_trips_table() {
        let port = MockDataPort::new()
            .with_series("AAA", make_series(&[("2024-01-02", 10.0), ("2024-01-03", 11.0)]));

        let table = port.load_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.series("AAA").unwrap().close_at(date(2024, 1, 3)),
            Some(11.0)
        );

        assert_eq!(port.list_tickers().unwrap(), vec!["AAA"]);
        assert_eq!(
            port.data_range("AAA").unwrap(),
            Some((date(2024, 1, 2), date(2024, 1, 3), 2))
        );
        assert_eq!(port.data_range("ZZZ").unwrap(), None);
    }

    #[test]
    fn load_errors_propagate() {
        let port = MockDataPort::new().with_error("connection refused");
        let err = port.load_table().unwrap_err();
        assert!(matches!(err, MeanrevError::DataLoad { .. }));
    }

    #[test]
    fn empty_port_reports_empty_table() {
        let port = MockDataPort::new();
        let err = port.load_table().unwrap_err();
        assert!(matches!(err, MeanrevError::EmptyTable));
    }
}
