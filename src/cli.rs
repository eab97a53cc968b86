//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_broker::ConsoleBroker;
use crate::adapters::csv_table_adapter::CsvTableAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestParams, RunResult};
use crate::domain::config_validation::{validate_strategy_config, validate_trading_config};
use crate::domain::error::MeanrevError;
use crate::domain::selector::{select_candidates, SelectionParams};
use crate::domain::trading::{BuyResult, TradingSession};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "meanrev", about = "Weekly mean-reversion rotation backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a multi-week backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Price table CSV (overrides [data] prices)
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        weeks: Option<usize>,
        #[arg(long)]
        lookback: Option<i64>,
        #[arg(long)]
        top_n: Option<usize>,
        #[arg(long)]
        stop_loss: Option<f64>,
        #[arg(long)]
        take_profit: Option<f64>,
        #[arg(long)]
        rsi_low: Option<f64>,
        #[arg(long)]
        rsi_high: Option<f64>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for each instrument
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Paper-trade this week's candidates
    Trade {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Dollars per position (overrides [trading] allocation)
        #[arg(long)]
        budget: Option<f64>,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct StrategyOverrides {
    pub start_date: Option<String>,
    pub weeks: Option<usize>,
    pub lookback: Option<i64>,
    pub top_n: Option<usize>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub rsi_low: Option<f64>,
    pub rsi_high: Option<f64>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            start_date,
            weeks,
            lookback,
            top_n,
            stop_loss,
            take_profit,
            rsi_low,
            rsi_high,
        } => {
            let overrides = StrategyOverrides {
                start_date,
                weeks,
                lookback,
                top_n,
                stop_loss,
                take_profit,
                rsi_low,
                rsi_high,
            };
            run_backtest_command(&config, data.as_ref(), &overrides)
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, data } => run_info(&config, data.as_ref()),
        Command::Trade {
            config,
            data,
            budget,
        } => run_trade(&config, data.as_ref(), budget),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Merge config-file values and CLI overrides into backtest parameters.
/// CLI wins; config fills the rest; built-in defaults fill the gaps.
pub fn build_backtest_params(
    config: &dyn ConfigPort,
    overrides: &StrategyOverrides,
) -> Result<BacktestParams, MeanrevError> {
    let defaults = BacktestParams::default();

    let start_str = overrides
        .start_date
        .clone()
        .or_else(|| config.get_string("strategy", "start_date"))
        .ok_or_else(|| MeanrevError::ConfigMissing {
            section: "strategy".into(),
            key: "start_date".into(),
        })?;
    let start_date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
        MeanrevError::ConfigInvalid {
            section: "strategy".into(),
            key: "start_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;

    Ok(BacktestParams {
        start_date,
        num_weeks: overrides.weeks.unwrap_or_else(|| {
            config.get_int("strategy", "num_weeks", defaults.num_weeks as i64) as usize
        }),
        lookback_days: overrides
            .lookback
            .unwrap_or_else(|| config.get_int("strategy", "lookback", defaults.lookback_days)),
        top_n: overrides.top_n.unwrap_or_else(|| {
            config.get_int("strategy", "top_n", defaults.top_n as i64) as usize
        }),
        rsi_window: config.get_int("strategy", "rsi_window", defaults.rsi_window as i64) as usize,
        rsi_low: overrides
            .rsi_low
            .unwrap_or_else(|| config.get_double("strategy", "rsi_low", defaults.rsi_low)),
        rsi_high: overrides
            .rsi_high
            .unwrap_or_else(|| config.get_double("strategy", "rsi_high", defaults.rsi_high)),
        stop_loss_pct: overrides
            .stop_loss
            .unwrap_or_else(|| config.get_double("strategy", "stop_loss", defaults.stop_loss_pct)),
        take_profit_pct: overrides.take_profit.unwrap_or_else(|| {
            config.get_double("strategy", "take_profit", defaults.take_profit_pct)
        }),
        allocation_per_trade: config.get_double(
            "trading",
            "allocation",
            defaults.allocation_per_trade,
        ),
    })
}

/// The price table path: CLI flag first, then `[data] prices`.
pub fn resolve_data_path(
    cli_data: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, MeanrevError> {
    if let Some(path) = cli_data {
        return Ok(path.clone());
    }
    config
        .get_string("data", "prices")
        .map(PathBuf::from)
        .ok_or_else(|| MeanrevError::ConfigMissing {
            section: "data".into(),
            key: "prices".into(),
        })
}

fn run_backtest_command(
    config_path: &PathBuf,
    data_path: Option<&PathBuf>,
    overrides: &StrategyOverrides,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_strategy_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = match build_backtest_params(&config, overrides) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data = match resolve_data_path(data_path, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading prices from {}", data.display());
    let table = match CsvTableAdapter::new(data).load_table() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Running backtest: {} instruments, {} weeks from {}",
        table.len(),
        params.num_weeks,
        params.start_date
    );

    match run_backtest(&table, &params) {
        Ok(result) => {
            print_report(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn print_report(result: &RunResult) {
    for week in &result.weeks {
        println!("Week of {}:", week.anchor);
        for outcome in &week.outcomes {
            println!(
                "  {:<6} {:>+9.3}%  ({})",
                outcome.ticker, outcome.change_pct, outcome.exit
            );
        }
        println!("  week return: {:+.3}%", week.aggregate_pct);
    }
    println!(
        "Cumulative return over {} traded weeks: {:+.3}%",
        result.weeks.len(),
        result.cumulative_pct()
    );
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_strategy_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_trading_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Configuration is valid");
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, data_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data = match resolve_data_path(data_path, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let adapter = CsvTableAdapter::new(data);
    let tickers = match adapter.list_tickers() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for ticker in &tickers {
        match adapter.data_range(ticker) {
            Ok(Some((first, last, count))) => {
                println!("{}: {} closes, {} to {}", ticker, count, first, last);
            }
            Ok(None) => eprintln!("{}: no data", ticker),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_trade(config_path: &PathBuf, data_path: Option<&PathBuf>, budget: Option<f64>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_strategy_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_trading_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = match build_backtest_params(&config, &StrategyOverrides::default()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let allocation = budget.unwrap_or(params.allocation_per_trade);

    let data = match resolve_data_path(data_path, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading prices from {}", data.display());
    let table = match CsvTableAdapter::new(data).load_table() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Trade off the most recent date in the table.
    let Some(&anchor) = table.all_dates().last() else {
        let e = MeanrevError::EmptyTable;
        eprintln!("error: {e}");
        return (&e).into();
    };

    let selection = SelectionParams {
        lookback_days: params.lookback_days,
        top_n: params.top_n,
        rsi_window: params.rsi_window,
        rsi_low: params.rsi_low,
        rsi_high: params.rsi_high,
    };
    let candidates = select_candidates(&table, anchor, &selection);
    if candidates.is_empty() {
        eprintln!("No qualifying instruments as of {anchor}");
        return ExitCode::SUCCESS;
    }
    eprintln!("Candidates as of {}: {}", anchor, candidates.join(", "));

    let mut session = TradingSession::new(ConsoleBroker::new(table));
    let results = match session.rotate(
        &candidates,
        allocation,
        params.stop_loss_pct,
        params.take_profit_pct,
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for result in &results {
        if let BuyResult::InsufficientBudget { ticker, price } = result {
            eprintln!("Skipped {ticker}: {allocation:.2} buys no whole share at {price:.2}");
        }
    }
    eprintln!("{} positions open", session.ledger().len());
    ExitCode::SUCCESS
}
