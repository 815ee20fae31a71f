//! Calendar parsing and temporal features

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a raw date field into a calendar date.
///
/// Accepts a plain `YYYY-MM-DD` date, or a timestamp whose calendar date
/// is used (RFC 3339, or naive `YYYY-MM-DDTHH:MM:SS`). `field` only feeds
/// the error message.
pub fn parse_calendar_date(field: &'static str, raw: &str) -> DataResult<NaiveDate> {
    let value = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|ts| ts.date())
        .ok_or_else(|| DataError::invalid_date(field, raw))
}

/// Temporal signals derived from an expense's dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFeatures {
    /// `submission_date - expense_date` in whole days (negative if submitted "before" spending)
    pub submission_delay: i64,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    pub is_weekend: bool,
    /// 1..=12
    pub month: u8,
    /// 1..=4
    pub quarter: u8,
    /// Expense fell on the last calendar day of its month
    pub is_month_end: bool,
}

impl DateFeatures {
    pub fn from_dates(expense_date: NaiveDate, submission_date: NaiveDate) -> Self {
        let day_of_week = expense_date.weekday().num_days_from_monday() as u8;
        let month = expense_date.month() as u8;

        Self {
            submission_delay: (submission_date - expense_date).num_days(),
            day_of_week,
            is_weekend: day_of_week >= 5,
            month,
            quarter: (month - 1) / 3 + 1,
            is_month_end: is_last_day_of_month(expense_date),
        }
    }
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    match date.succ_opt() {
        Some(next) => next.month() != date.month(),
        // NaiveDate::MAX is Dec 31
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        let parsed = parse_calendar_date("expense_date", "2024-02-08").unwrap();
        assert_eq!(parsed, date(2024, 2, 8));
    }

    #[test]
    fn test_parse_timestamps() {
        assert_eq!(
            parse_calendar_date("expense_date", "2024-02-08T17:30:00Z").unwrap(),
            date(2024, 2, 8)
        );
        assert_eq!(
            parse_calendar_date("expense_date", "2024-02-08T09:00:00").unwrap(),
            date(2024, 2, 8)
        );
        assert_eq!(
            parse_calendar_date("expense_date", " 2024-02-08 09:00:00 ").unwrap(),
            date(2024, 2, 8)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", "yesterday", "2024-13-01", "2023-02-29", "08/02/2024"] {
            let err = parse_calendar_date("submission_date", raw).unwrap_err();
            assert_eq!(err, DataError::invalid_date("submission_date", raw));
        }
    }

    #[test]
    fn test_thursday_in_february() {
        let features = DateFeatures::from_dates(date(2024, 2, 8), date(2024, 2, 10));

        assert_eq!(features.submission_delay, 2);
        assert_eq!(features.day_of_week, 3);
        assert!(!features.is_weekend);
        assert_eq!(features.month, 2);
        assert_eq!(features.quarter, 1);
        assert!(!features.is_month_end);
    }

    #[test]
    fn test_weekend_days() {
        // 2024-02-10 is a Saturday, 2024-02-11 a Sunday
        let saturday = DateFeatures::from_dates(date(2024, 2, 10), date(2024, 2, 10));
        let sunday = DateFeatures::from_dates(date(2024, 2, 11), date(2024, 2, 11));
        let monday = DateFeatures::from_dates(date(2024, 2, 12), date(2024, 2, 12));

        assert_eq!(saturday.day_of_week, 5);
        assert!(saturday.is_weekend);
        assert_eq!(sunday.day_of_week, 6);
        assert!(sunday.is_weekend);
        assert_eq!(monday.day_of_week, 0);
        assert!(!monday.is_weekend);
    }

    #[test]
    fn test_quarters() {
        let quarter = |m| DateFeatures::from_dates(date(2024, m, 1), date(2024, m, 1)).quarter;

        assert_eq!([1, 2, 3].map(quarter), [1, 1, 1]);
        assert_eq!([4, 5, 6].map(quarter), [2, 2, 2]);
        assert_eq!([7, 8, 9].map(quarter), [3, 3, 3]);
        assert_eq!([10, 11, 12].map(quarter), [4, 4, 4]);
    }

    #[test]
    fn test_month_end_handles_leap_years() {
        assert!(DateFeatures::from_dates(date(2024, 2, 29), date(2024, 3, 1)).is_month_end);
        assert!(!DateFeatures::from_dates(date(2024, 2, 28), date(2024, 3, 1)).is_month_end);
        assert!(DateFeatures::from_dates(date(2023, 2, 28), date(2023, 3, 1)).is_month_end);
        assert!(DateFeatures::from_dates(date(2024, 12, 31), date(2025, 1, 2)).is_month_end);
        assert!(DateFeatures::from_dates(date(2024, 4, 30), date(2024, 5, 1)).is_month_end);
    }

    #[test]
    fn test_negative_delay_is_kept() {
        let features = DateFeatures::from_dates(date(2024, 3, 10), date(2024, 3, 1));
        assert_eq!(features.submission_delay, -9);
    }

    #[test]
    fn test_delay_across_year_boundary() {
        let features = DateFeatures::from_dates(date(2023, 12, 30), date(2024, 1, 4));
        assert_eq!(features.submission_delay, 5);
        assert_eq!(features.quarter, 4);
    }
}
