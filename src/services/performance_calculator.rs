use chrono::{Days, Months, NaiveDate};

use crate::errors::PerformanceError;
use crate::models::{PerformanceResult, PriceSeries};

/// Reference dates for the four look-back windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackDates {
    pub as_of: NaiveDate,
    pub week_ago: NaiveDate,
    pub month_ago: NaiveDate,
    pub year_ago: NaiveDate,
    pub five_years_ago: NaiveDate,
}

impl LookbackDates {
    pub fn from_anchor(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            week_ago: as_of.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN),
            month_ago: months_before(as_of, 1),
            year_ago: months_before(as_of, 12),
            five_years_ago: months_before(as_of, 60),
        }
    }
}

/// Calendar subtraction; a day that does not exist in the target month
/// clamps to that month's last day (Mar 31 -> Feb 29/28).
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Percentage change from `old` to `new`, or 0 without a usable base.
pub fn percent_change(old: Option<f64>, new: f64) -> f64 {
    match old {
        Some(old) if old != 0.0 => (new - old) / old * 100.0,
        _ => 0.0,
    }
}

pub fn calculate_performance(
    series: &PriceSeries,
    as_of: NaiveDate,
) -> Result<PerformanceResult, PerformanceError> {
    let dates = LookbackDates::from_anchor(as_of);

    let current = series
        .price_on_or_before(dates.as_of)
        .ok_or(PerformanceError::NoCurrentPrice)?;

    Ok(PerformanceResult {
        weekly_change: percent_change(series.price_on_or_before(dates.week_ago), current),
        monthly_change: percent_change(series.price_on_or_before(dates.month_ago), current),
        yearly_change: percent_change(series.price_on_or_before(dates.year_ago), current),
        five_yearly_change: percent_change(series.price_on_or_before(dates.five_years_ago), current),
    })
}
