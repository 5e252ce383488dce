//! Calendar date range filter.
//!
//! # Invariants
//! - Both range ends are inclusive whole days.
//! - Dates are compared as plain `NaiveDate` values, never as instants.

use crate::model::run::RunRecord;
use chrono::{Months, NaiveDate};

const DEFAULT_RANGE_MONTHS: u32 = 3;

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Initial range shown on first load: the last three months up to today.
    ///
    /// Month subtraction clamps to the end of shorter months
    /// (`2024-05-31` starts at `2024-02-29`).
    pub fn default_for(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_months(Months::new(DEFAULT_RANGE_MONTHS))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Returns records dated within `range`, keeping input order.
///
/// A reversed range (`start > end`) matches nothing.
pub fn filter_by_date_range<'a>(records: &'a [RunRecord], range: &DateRange) -> Vec<&'a RunRecord> {
    records
        .iter()
        .filter(|record| range.contains(record.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::DateRange;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn default_range_spans_three_months() {
        let range = DateRange::default_for(date(2024, 4, 15));
        assert_eq!(range.start, date(2024, 1, 15));
        assert_eq!(range.end, date(2024, 4, 15));
    }

    #[test]
    fn default_range_clamps_to_month_end() {
        let range = DateRange::default_for(date(2024, 5, 31));
        assert_eq!(range.start, date(2024, 2, 29));
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
        assert!(!range.contains(date(2023, 12, 31)));
    }
}
