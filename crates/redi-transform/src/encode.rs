//! Literal encoders.
//!
//! Every function here is total: blank or absent input, and anything that
//! fails to parse, comes back as [`Literal::Null`]. Nothing returns an error.

use redi_model::Literal;

use crate::normalization::datetime::{clock_duration_seconds, parse_clock, parse_date};
use crate::normalization::numeric::{parse_f64, truncate_to_i64};

const TRUE_TOKENS: [&str; 3] = ["true", "1", "yes"];

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Text literal, stored verbatim. Quotes are doubled when rendered.
pub fn encode_text(raw: Option<&str>) -> Literal {
    non_blank(raw).map_or(Literal::Null, Literal::text)
}

/// Parse as a float, then truncate toward zero.
pub fn encode_integer(raw: Option<&str>) -> Literal {
    non_blank(raw)
        .and_then(parse_f64)
        .and_then(truncate_to_i64)
        .map_or(Literal::Null, Literal::Integer)
}

pub fn encode_decimal(raw: Option<&str>) -> Literal {
    non_blank(raw)
        .and_then(parse_f64)
        .map_or(Literal::Null, Literal::Decimal)
}

/// Case-insensitive membership in {"true", "1", "yes"}; anything else is FALSE.
pub fn encode_bool(raw: Option<&str>) -> Literal {
    match non_blank(raw) {
        Some(value) => {
            let lowered = value.to_lowercase();
            Literal::Boolean(TRUE_TOKENS.contains(&lowered.as_str()))
        }
        None => Literal::Null,
    }
}

/// Date in the caller's `format`, rendered as ISO `YYYY-MM-DD`.
pub fn encode_date(raw: Option<&str>, format: &str) -> Literal {
    non_blank(raw)
        .and_then(|value| parse_date(value, format))
        .map_or(Literal::Null, Literal::Date)
}

/// Decade age band (`"30-39"`), with everything from 90 up in `"90+"`.
pub fn encode_age_band(raw: Option<&str>) -> Literal {
    raw.and_then(parse_f64)
        .and_then(truncate_to_i64)
        .map_or(Literal::Null, age_band_for_years)
}

pub fn age_band_for_years(years: i64) -> Literal {
    if years >= 90 {
        return Literal::text("90+");
    }
    let floor = years.div_euclid(10) * 10;
    Literal::Text(format!("{}-{}", floor, floor + 9))
}

/// Hours between two `HH:MM` times, rounded to two decimals.
pub fn clock_duration_hours(start: Option<&str>, end: Option<&str>) -> Literal {
    let (Some(start), Some(end)) = (
        non_blank(start).and_then(parse_clock),
        non_blank(end).and_then(parse_clock),
    ) else {
        return Literal::Null;
    };
    let hours = clock_duration_seconds(start, end) as f64 / 3600.0;
    Literal::Decimal((hours * 100.0).round() / 100.0)
}

/// Given name from a `"SURNAME, Given"` label: the last whitespace token.
pub fn given_name_from_full(raw: Option<&str>) -> Literal {
    non_blank(raw)
        .and_then(|value| value.split_whitespace().last())
        .map_or(Literal::Null, Literal::text)
}

/// Surname from a `"SURNAME, Given"` label: the first token, trailing commas removed.
pub fn surname_from_full(raw: Option<&str>) -> Literal {
    non_blank(raw)
        .and_then(|value| value.split_whitespace().next())
        .map(|token| token.trim_end_matches(','))
        .filter(|token| !token.is_empty())
        .map_or(Literal::Null, Literal::text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_truncates() {
        assert_eq!(encode_integer(Some("12.9")), Literal::Integer(12));
        assert_eq!(encode_integer(Some("-3.7")), Literal::Integer(-3));
        assert!(encode_integer(Some("abc")).is_null());
    }

    #[test]
    fn negative_age_floors_downward() {
        assert_eq!(encode_age_band(Some("-5")), Literal::text("-10--1"));
    }

    #[test]
    fn splits_full_names() {
        let full = Some("SMITH, Jane");
        assert_eq!(given_name_from_full(full), Literal::text("Jane"));
        assert_eq!(surname_from_full(full), Literal::text("SMITH"));
        assert_eq!(given_name_from_full(Some("Cher")), Literal::text("Cher"));
        assert!(surname_from_full(Some("  ")).is_null());
    }
}
