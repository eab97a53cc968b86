//! Core domain types and logic.

pub mod backtest;
pub mod calendar;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod ledger;
pub mod price;
pub mod selector;
pub mod simulator;
pub mod trading;
