use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// A single daily close for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily price history for one ticker, always held newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from points in any order.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by(|a, b| b.date.cmp(&a.date));
        Self { points }
    }

    #[cfg(test)]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Close of the most recent entry dated on or before `date`.
    pub fn price_on_or_before(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.date <= date)
            .map(|p| p.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_series_is_sorted_newest_first() {
        let series = PriceSeries::new(vec![
            PricePoint::new(d("2024-01-01"), 1.0),
            PricePoint::new(d("2024-03-01"), 3.0),
            PricePoint::new(d("2024-02-01"), 2.0),
        ]);

        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d("2024-03-01"), d("2024-02-01"), d("2024-01-01")]);
        assert_eq!(series.latest().map(|p| p.close), Some(3.0));
    }

    #[test]
    fn test_price_on_or_before_straddling_date() {
        let series = PriceSeries::new(vec![
            PricePoint::new(d("2024-07-10"), 110.0),
            PricePoint::new(d("2024-07-05"), 105.0),
            PricePoint::new(d("2024-07-01"), 100.0),
        ]);

        assert_eq!(series.price_on_or_before(d("2024-07-07")), Some(105.0));
        assert_eq!(series.price_on_or_before(d("2024-07-05")), Some(105.0));
        assert_eq!(series.price_on_or_before(d("2024-12-31")), Some(110.0));
    }

    #[test]
    fn test_price_on_or_before_series_entirely_after_date() {
        let series = PriceSeries::new(vec![
            PricePoint::new(d("2024-07-10"), 110.0),
            PricePoint::new(d("2024-07-05"), 105.0),
        ]);

        assert_eq!(series.price_on_or_before(d("2024-07-04")), None);
    }

    #[test]
    fn test_price_on_or_before_empty_series() {
        let series = PriceSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.price_on_or_before(d("2024-07-04")), None);
    }
}
