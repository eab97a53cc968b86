//! Configuration validation.
//!
//! Validates all config fields before a backtest or trading session runs.

use crate::domain::error::MeanrevError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    validate_start_date(config)?;
    validate_num_weeks(config)?;
    validate_lookback(config)?;
    validate_top_n(config)?;
    validate_rsi_window(config)?;
    validate_rsi_band(config)?;
    validate_stop_loss(config)?;
    validate_take_profit(config)?;
    Ok(())
}

pub fn validate_trading_config(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    validate_allocation(config)?;
    Ok(())
}

fn validate_start_date(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    match config.get_string("strategy", "start_date") {
        None => Err(MeanrevError::ConfigMissing {
            section: "strategy".to_string(),
            key: "start_date".to_string(),
        }),
        Some(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            Ok(_) => Ok(()),
            Err(_) => Err(MeanrevError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "start_date".to_string(),
                reason: "invalid start_date format, expected YYYY-MM-DD".to_string(),
            }),
        },
    }
}

fn validate_num_weeks(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_int("strategy", "num_weeks", 5);
    if value < 1 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "num_weeks".to_string(),
            reason: "num_weeks must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_int("strategy", "lookback", 25);
    if value < 2 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "lookback".to_string(),
            reason: "lookback must be at least 2 days".to_string(),
        });
    }
    Ok(())
}

fn validate_top_n(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_int("strategy", "top_n", 5);
    if value < 1 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "top_n".to_string(),
            reason: "top_n must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_rsi_window(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_int("strategy", "rsi_window", 14);
    if value < 1 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "rsi_window".to_string(),
            reason: "rsi_window must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_rsi_band(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let low = config.get_double("strategy", "rsi_low", 50.0);
    let high = config.get_double("strategy", "rsi_high", 60.0);

    if !(0.0..=100.0).contains(&low) {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "rsi_low".to_string(),
            reason: "rsi_low must be between 0 and 100".to_string(),
        });
    }
    if !(0.0..=100.0).contains(&high) {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "rsi_high".to_string(),
            reason: "rsi_high must be between 0 and 100".to_string(),
        });
    }
    if low > high {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "rsi_low".to_string(),
            reason: "rsi_low must not exceed rsi_high".to_string(),
        });
    }
    Ok(())
}

fn validate_stop_loss(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_double("strategy", "stop_loss", 4.0);
    if value <= 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "stop_loss".to_string(),
            reason: "stop_loss must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_take_profit(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_double("strategy", "take_profit", 8.0);
    if value <= 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "take_profit".to_string(),
            reason: "take_profit must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_allocation(config: &dyn ConfigPort) -> Result<(), MeanrevError> {
    let value = config.get_double("trading", "allocation", 100.0);
    if value <= 0.0 {
        return Err(MeanrevError::ConfigInvalid {
            section: "trading".to_string(),
            key: "allocation".to_string(),
            reason: "allocation must be positive".to_string(),
        });
    }
    Ok(())
}
