//! Data access port trait.

use crate::domain::error::MeanrevError;
use crate::domain::price::PriceTable;
use chrono::NaiveDate;

pub trait DataPort {
    /// Load every instrument's close series.
    fn load_table(&self) -> Result<PriceTable, MeanrevError>;

    fn list_tickers(&self) -> Result<Vec<String>, MeanrevError>;

    /// First date, last date, and point count for one instrument, or
    /// `None` when the ticker is unknown.
    fn data_range(&self, ticker: &str) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MeanrevError>;
}
