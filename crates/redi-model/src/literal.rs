//! Typed literal values carried through reconciliation and into upsert batches.
//!
//! A [`Literal`] is what every encoder produces. [`Literal::Null`] is the
//! single "absent" sentinel: blank input, coercion failures and unresolved
//! categories all end up here, and the reconciler only ever asks
//! [`Literal::is_null`] to decide whether a field holds a value.
//!
//! `Display` renders the literal as SQL text. Text quoting happens here, so a
//! `Literal::Text` always holds the raw value and the rendered form is always
//! safe to embed.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A typed value, or the NULL sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    /// Absent value (blank, missing or unparsable input).
    #[default]
    Null,
    /// Free text, stored unescaped.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Number with a fractional part.
    Decimal(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Calendar date, rendered as ISO `YYYY-MM-DD`.
    Date(NaiveDate),
}

impl Literal {
    /// Build a text literal.
    pub fn text(value: impl Into<String>) -> Self {
        Literal::Text(value.into())
    }

    /// Returns true for the NULL sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Returns the text payload, if this is a text literal.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer literal.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Literal::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns `self` unless it is NULL, in which case `fallback` is used.
    #[must_use]
    pub fn or(self, fallback: Literal) -> Literal {
        if self.is_null() { fallback } else { self }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<NaiveDate> for Literal {
    fn from(value: NaiveDate) -> Self {
        Literal::Date(value)
    }
}

impl From<Option<&str>> for Literal {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Literal::Null, Literal::text)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("NULL"),
            Literal::Text(value) => write!(f, "'{}'", escape_quotes(value)),
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::Decimal(value) => f.write_str(&format_decimal(*value)),
            Literal::Boolean(true) => f.write_str("TRUE"),
            Literal::Boolean(false) => f.write_str("FALSE"),
            Literal::Date(date) => write!(f, "'{}'", date.format("%Y-%m-%d")),
        }
    }
}

/// Double every single quote so the value can sit inside a quoted literal.
pub fn escape_quotes(value: &str) -> String {
    value.replace('\'', "''")
}

/// Format a decimal keeping at least one fractional digit (`12` → `12.0`).
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
