#![allow(dead_code)]

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use meanrev::domain::error::MeanrevError;
pub use meanrev::domain::price::{PricePoint, PriceSeries, PriceTable};
use meanrev::ports::data_port::DataPort;

pub struct MockDataPort {
    pub table: PriceTable,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            table: PriceTable::new(),
            error: None,
        }
    }

    pub fn with_series(mut self, ticker: &str, series: PriceSeries) -> Self {
        self.table.insert(ticker.to_string(), series);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_table(&self) -> Result<PriceTable, MeanrevError> {
        if let Some(reason) = &self.error {
            return Err(MeanrevError::DataLoad {
                reason: reason.clone(),
            });
        }
        if self.table.is_empty() {
            return Err(MeanrevError::EmptyTable);
        }
        Ok(self.table.clone())
    }

    fn list_tickers(&self) -> Result<Vec<String>, MeanrevError> {
        if let Some(reason) = &self.error {
            return Err(MeanrevError::DataLoad {
                reason: reason.clone(),
            });
        }
        Ok(self.table.tickers().map(str::to_string).collect())
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MeanrevError> {
        if let Some(reason) = &self.error {
            return Err(MeanrevError::DataLoad {
                reason: reason.clone(),
            });
        }
        match self.table.series(ticker) {
            Some(s) => match (s.first(), s.last()) {
                (Some(first), Some(last)) => Ok(Some((first.date, last.date, s.len()))),
                _ => Ok(None),
            },
            None => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_series(points: &[(&str, f64)]) -> PriceSeries {
    PriceSeries::new(
        points
            .iter()
            .map(|&(day, close)| PricePoint {
                date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
                close,
            })
            .collect(),
    )
}

/// Consecutive weekday closes starting at `start` (itself skipped forward
/// off a weekend).
pub fn weekday_series(start: NaiveDate, closes: &[f64]) -> PriceSeries {
    let mut points = Vec::with_capacity(closes.len());
    let mut day = start;
    for &close in closes {
        while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            day += Duration::days(1);
        }
        points.push(PricePoint { date: day, close });
        day += Duration::days(1);
    }
    PriceSeries::new(points)
}

/// Rising warmup long enough to validate a short oscillator window and
/// confirm the moving-average crossover, ending at `last`.
pub fn rising_warmup(first: f64, last: f64, count: usize) -> Vec<f64> {
    let step = (last - first) / (count - 1) as f64;
    (0..count).map(|i| first + step * i as f64).collect()
}
