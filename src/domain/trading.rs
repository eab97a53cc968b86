//! Weekly rotation over a brokerage port.
//!
//! A session owns its broker connection and ledger; rotating a week
//! liquidates current holdings, then opens bracket positions in the new
//! candidates with equal dollar allocation.

use crate::domain::error::MeanrevError;
use crate::domain::ledger::Ledger;
use crate::ports::broker_port::{BracketOrder, BrokerPort};

#[derive(Debug, Clone, PartialEq)]
pub enum BuyResult {
    Bought(BracketOrder),
    /// The allocation buys less than one whole share at the latest price.
    InsufficientBudget { ticker: String, price: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellResult {
    pub ticker: String,
    pub quantity: u64,
}

pub struct TradingSession<B: BrokerPort> {
    broker: B,
    ledger: Ledger,
}

impl<B: BrokerPort> TradingSession<B> {
    pub fn new(broker: B) -> Self {
        TradingSession {
            broker,
            ledger: Ledger::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Sell every open position in full.
    pub fn liquidate(&mut self) -> Result<Vec<SellResult>, MeanrevError> {
        let holdings: Vec<(String, u64)> = self
            .ledger
            .holdings()
            .map(|(ticker, pos)| (ticker.to_string(), pos.quantity))
            .collect();

        let mut sold = Vec::with_capacity(holdings.len());
        for (ticker, quantity) in holdings {
            self.broker.submit_sell(&ticker, quantity)?;
            self.ledger.record_sell(&ticker, quantity);
            sold.push(SellResult { ticker, quantity });
        }
        Ok(sold)
    }

    /// Buy whole shares of `ticker` worth up to `allocation` dollars, with
    /// stop-loss and take-profit exits bracketing the fill price.
    pub fn buy(
        &mut self,
        ticker: &str,
        allocation: f64,
        stop_loss_pct: f64,
        take_profit_pct: f64,
    ) -> Result<BuyResult, MeanrevError> {
        let price = self.broker.latest_price(ticker)?;
        if price <= 0.0 {
            return Err(MeanrevError::Broker {
                reason: format!("non-positive price {price} for {ticker}"),
            });
        }

        let quantity = (allocation / price).floor() as u64;
        if quantity == 0 {
            return Ok(BuyResult::InsufficientBudget {
                ticker: ticker.to_string(),
                price,
            });
        }

        let order = BracketOrder {
            ticker: ticker.to_string(),
            quantity,
            limit_price: round_cents(price),
            stop_loss_price: round_cents(price * (1.0 - stop_loss_pct / 100.0)),
            take_profit_price: round_cents(price * (1.0 + take_profit_pct / 100.0)),
        };
        self.broker.submit_bracket_buy(&order)?;
        self.ledger.record_buy(ticker, price, quantity);

        Ok(BuyResult::Bought(order))
    }

    /// One weekly round: liquidate, then buy each candidate.
    pub fn rotate(
        &mut self,
        candidates: &[String],
        allocation: f64,
        stop_loss_pct: f64,
        take_profit_pct: f64,
    ) -> Result<Vec<BuyResult>, MeanrevError> {
        self.liquidate()?;

        let mut results = Vec::with_capacity(candidates.len());
        for ticker in candidates {
            results.push(self.buy(ticker, allocation, stop_loss_pct, take_profit_pct)?);
        }
        Ok(results)
    }
}

fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
