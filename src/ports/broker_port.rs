//! Brokerage port trait for live and paper trading.

use crate::domain::error::MeanrevError;

/// A buy with attached stop-loss and take-profit exit prices, both in
/// absolute dollars rounded to cents.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketOrder {
    pub ticker: String,
    pub quantity: u64,
    pub limit_price: f64,
    pub stop_loss_price: f64,
    pub take_profit_price: f64,
}

pub trait BrokerPort {
    fn latest_price(&self, ticker: &str) -> Result<f64, MeanrevError>;

    fn submit_bracket_buy(&mut self, order: &BracketOrder) -> Result<(), MeanrevError>;

    fn submit_sell(&mut self, ticker: &str, quantity: u64) -> Result<(), MeanrevError>;
}
