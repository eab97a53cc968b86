//! Wide-table CSV data adapter.
//!
//! One file holds every instrument: the first column is the date, each
//! remaining column header is a ticker, and each cell is that day's close.
//! Blank cells mean no trade for that instrument on that date.

use crate::domain::error::MeanrevError;
use crate::domain::price::{PricePoint, PriceSeries, PriceTable};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::path::PathBuf;

pub struct CsvTableAdapter {
    path: PathBuf,
}

impl CsvTableAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn reader(&self) -> Result<csv::Reader<std::fs::File>, MeanrevError> {
        csv::Reader::from_path(&self.path).map_err(|e| MeanrevError::DataLoad {
            reason: format!("failed to open {}: {}", self.path.display(), e),
        })
    }

    fn tickers_from_headers(headers: &csv::StringRecord) -> Vec<String> {
        headers.iter().skip(1).map(|h| h.trim().to_string()).collect()
    }
}

impl DataPort for CsvTableAdapter {
    fn load_table(&self) -> Result<PriceTable, MeanrevError> {
        let mut rdr = self.reader()?;
        let headers = rdr
            .headers()
            .map_err(|e| MeanrevError::DataLoad {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let tickers = Self::tickers_from_headers(&headers);
        if tickers.is_empty() {
            return Err(MeanrevError::EmptyTable);
        }

        let mut columns: Vec<Vec<PricePoint>> = vec![Vec::new(); tickers.len()];
        for result in rdr.records() {
            let record = result.map_err(|e| MeanrevError::DataLoad {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| MeanrevError::DataLoad {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                MeanrevError::DataLoad {
                    reason: format!("invalid date '{}': {}", date_str, e),
                }
            })?;

            for (i, column) in columns.iter_mut().enumerate() {
                let cell = record.get(i + 1).unwrap_or("").trim();
                if cell.is_empty() {
                    continue;
                }
                let close: f64 = cell.parse().map_err(|e| MeanrevError::DataLoad {
                    reason: format!("invalid close '{}' for {} on {}: {}", cell, tickers[i], date, e),
                })?;
                column.push(PricePoint { date, close });
            }
        }

        let mut table = PriceTable::new();
        for (ticker, points) in tickers.into_iter().zip(columns) {
            if points.is_empty() {
                continue;
            }
            table.insert(ticker, PriceSeries::new(points));
        }
        if table.is_empty() {
            return Err(MeanrevError::EmptyTable);
        }
        Ok(table)
    }

    fn list_tickers(&self) -> Result<Vec<String>, MeanrevError> {
        let mut rdr = self.reader()?;
        let headers = rdr.headers().map_err(|e| MeanrevError::DataLoad {
            reason: format!("CSV header error: {}", e),
        })?;
        Ok(Self::tickers_from_headers(headers))
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MeanrevError> {
        let table = self.load_table()?;
        let Some(series) = table.series(ticker) else {
            return Ok(None);
        };
        match (series.first(), series.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, series.len()))),
            _ => Ok(None),
        }
    }
}
