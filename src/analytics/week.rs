//! ISO-8601 week numbers used to bucket employee hours.

use chrono::{Datelike, Duration, NaiveDate};

/// ISO-8601 week number (1..=53) of a date.
///
/// The date is moved to the Thursday of its Monday-based week; the week number
/// is then counted from January 1st of that Thursday's year.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let weekday = i64::from(date.weekday().number_from_monday());
    let thursday = date + Duration::days(4 - weekday);
    let year_start = NaiveDate::from_ymd_opt(thursday.year(), 1, 1).unwrap_or(thursday);
    let days = (thursday - year_start).num_days() as u32;
    (days + 1).div_ceil(7)
}

/// Parse a `YYYY-MM-DD` record date.
pub fn parse_record_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Week number of a record date string, `None` when the date does not parse.
pub fn week_of(date: &str) -> Option<u32> {
    parse_record_date(date).map(iso_week_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_thursday_and_sunday_share_week() {
        assert_eq!(iso_week_number(ymd(2026, 1, 1)), 1);
        assert_eq!(iso_week_number(ymd(2026, 1, 4)), 1);
        assert_eq!(iso_week_number(ymd(2026, 1, 5)), 2);
    }

    #[test]
    fn test_year_boundary() {
        // 2026 starts on a Thursday and so has 53 weeks.
        assert_eq!(iso_week_number(ymd(2026, 12, 31)), 53);
        assert_eq!(iso_week_number(ymd(2027, 1, 1)), 53);
        assert_eq!(iso_week_number(ymd(2027, 1, 4)), 1);
        // Late December landing in week 1 of the next year.
        assert_eq!(iso_week_number(ymd(2024, 12, 30)), 1);
        // Early January landing in week 52 of the previous year.
        assert_eq!(iso_week_number(ymd(2023, 1, 1)), 52);
    }

    #[test]
    fn test_matches_chrono_iso_week() {
        let mut date = ymd(2019, 12, 1);
        let end = ymd(2028, 2, 1);
        while date < end {
            assert_eq!(iso_week_number(date), date.iso_week().week(), "mismatch on {date}");
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_week_of_string() {
        assert_eq!(week_of("2026-01-04"), Some(1));
        assert_eq!(week_of("2026/01/04"), None);
        assert_eq!(week_of(""), None);
    }
}
