//! Calendar dates and clock times from source extracts.
//!
//! Extracts disagree on date layout (`05/03/2024` in the faculty list,
//! `05-Mar-2024` in the events export), so the format is always supplied by
//! the caller as a `strftime` pattern.

use chrono::{NaiveDate, NaiveTime};

/// Default layout of dates in the faculty list.
pub const DAY_MONTH_YEAR_NUMERIC: &str = "%d/%m/%Y";

/// Default layout of dates in the events export.
pub const DAY_ABBREVIATED_MONTH_YEAR: &str = "%d-%b-%Y";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Parse a trimmed date with the given format; blank or mismatched input is None.
pub fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, format).ok()
}

/// Parse an `HH:MM` clock time.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M").ok()
}

/// Seconds from `start` to `end`, wrapping past midnight when `end` is earlier.
pub fn clock_duration_seconds(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_seconds().rem_euclid(SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_source_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_date("05/03/2024", DAY_MONTH_YEAR_NUMERIC), expected);
        assert_eq!(parse_date(" 05-Mar-2024 ", DAY_ABBREVIATED_MONTH_YEAR), expected);
    }

    #[test]
    fn rejects_mismatched_layout() {
        assert_eq!(parse_date("05-Mar-2024", DAY_MONTH_YEAR_NUMERIC), None);
        assert_eq!(parse_date("31/02/2024", DAY_MONTH_YEAR_NUMERIC), None);
        assert_eq!(parse_date("", DAY_MONTH_YEAR_NUMERIC), None);
    }

    #[test]
    fn duration_wraps_midnight() {
        let start = parse_clock("22:00").unwrap();
        let end = parse_clock("02:00").unwrap();
        assert_eq!(clock_duration_seconds(start, end), 4 * 3600);
    }
}
