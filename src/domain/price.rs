//! Daily closing-price series and the instrument table built from them.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// One daily close for one instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Chronologically ascending closes for a single instrument.
///
/// Dates are unique; gaps (holidays, missing data) are allowed. The series
/// is immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from arbitrary-order points. Sorts by date; on
    /// duplicate dates the last point wins.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by(|next, prev| {
            if next.date == prev.date {
                prev.close = next.close;
                true
            } else {
                false
            }
        });
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Close on exactly `date`, if the series has a point there.
    pub fn close_at(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].close)
    }

    /// Points with `from <= date <= to`, in chronological order.
    pub fn window(&self, from: NaiveDate, to: NaiveDate) -> &[PricePoint] {
        let start = self.points.partition_point(|p| p.date < from);
        let end = self.points.partition_point(|p| p.date <= to);
        &self.points[start..end]
    }
}

/// Instrument identifier to price series, the root data input of a run.
///
/// Loaded once by a data adapter and shared read-only with every component.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    series: BTreeMap<String, PriceSeries>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: String, series: PriceSeries) {
        self.series.insert(ticker, series);
    }

    pub fn series(&self, ticker: &str) -> Option<&PriceSeries> {
        self.series.get(ticker)
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceSeries)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Sorted, deduplicated union of every date with data for any instrument.
    pub fn all_dates(&self) -> Vec<NaiveDate> {
        let mut dates = BTreeSet::new();
        for series in self.series.values() {
            for point in series.points() {
                dates.insert(point.date);
            }
        }
        dates.into_iter().collect()
    }
}
