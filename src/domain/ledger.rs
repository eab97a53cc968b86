//! Open-position bookkeeping for live trading sessions.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenPosition {
    pub entry_price: f64,
    pub quantity: u64,
}

/// Positions currently held, keyed by ticker. Owned by the session that
/// trades it; nothing here is shared or global.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    positions: BTreeMap<String, OpenPosition>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Add to a position. A re-buy accumulates quantity and re-marks the
    /// entry at the latest fill price.
    pub fn record_buy(&mut self, ticker: &str, price: f64, quantity: u64) {
        self.positions
            .entry(ticker.to_string())
            .and_modify(|pos| {
                pos.quantity += quantity;
                pos.entry_price = price;
            })
            .or_insert(OpenPosition {
                entry_price: price,
                quantity,
            });
    }

    /// Reduce a position, removing it once the quantity reaches zero.
    /// Selling more than held clears the position.
    pub fn record_sell(&mut self, ticker: &str, quantity: u64) {
        if let Some(pos) = self.positions.get_mut(ticker) {
            pos.quantity = pos.quantity.saturating_sub(quantity);
            if pos.quantity == 0 {
                self.positions.remove(ticker);
            }
        }
    }

    pub fn position(&self, ticker: &str) -> Option<&OpenPosition> {
        self.positions.get(ticker)
    }

    pub fn holdings(&self) -> impl Iterator<Item = (&str, &OpenPosition)> {
        self.positions.iter().map(|(t, p)| (t.as_str(), p))
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}
