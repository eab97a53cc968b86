//! Paper-trading broker adapter.
//!
//! Quotes the latest close from a loaded price table and prints each order
//! to stdout instead of routing it anywhere. Useful for dry runs of the
//! weekly rotation.

use crate::domain::error::MeanrevError;
use crate::domain::price::PriceTable;
use crate::ports::broker_port::{BracketOrder, BrokerPort};

pub struct ConsoleBroker {
    table: PriceTable,
}

impl ConsoleBroker {
    pub fn new(table: PriceTable) -> Self {
        Self { table }
    }
}

impl BrokerPort for ConsoleBroker {
    fn latest_price(&self, ticker: &str) -> Result<f64, MeanrevError> {
        self.table
            .series(ticker)
            .and_then(|s| s.last())
            .map(|p| p.close)
            .ok_or_else(|| MeanrevError::Broker {
                reason: format!("no price data for {}", ticker),
            })
    }

    fn submit_bracket_buy(&mut self, order: &BracketOrder) -> Result<(), MeanrevError> {
        println!(
            "BUY  {:<6} x{:<5} @ {:.2} (stop {:.2}, take {:.2})",
            order.ticker,
            order.quantity,
            order.limit_price,
            order.stop_loss_price,
            order.take_profit_price
        );
        Ok(())
    }

    fn submit_sell(&mut self, ticker: &str, quantity: u64) -> Result<(), MeanrevError> {
        println!("SELL {:<6} x{}", ticker, quantity);
        Ok(())
    }
}
