//! Per-field merge rules.
//!
//! Every field a source contributes is governed by exactly one
//! [`MergeRule`]. The rule decides, given the value already stored for the
//! entity and the source's [`Candidate`], whether the candidate replaces it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::literal::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRule {
    /// Always replace, even with NULL.
    Overwrite,
    /// Write only when nothing is stored yet (coalesce).
    FillIfAbsent,
    /// Replace only when the source actually supplied a value.
    OverwriteIfPresent,
}

impl MergeRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeRule::Overwrite => "overwrite",
            MergeRule::FillIfAbsent => "fill-if-absent",
            MergeRule::OverwriteIfPresent => "overwrite-if-present",
        }
    }

    /// Returns true when `candidate` should replace `current`.
    pub fn admits(&self, current: &Literal, candidate: &Candidate) -> bool {
        match self {
            MergeRule::Overwrite => true,
            MergeRule::FillIfAbsent => current.is_null(),
            MergeRule::OverwriteIfPresent => candidate.is_present(),
        }
    }

    /// Apply the rule, returning the value the field should hold afterwards.
    pub fn merge(&self, current: &Literal, candidate: Candidate) -> Literal {
        if self.admits(current, &candidate) {
            candidate.value
        } else {
            current.clone()
        }
    }
}

impl fmt::Display for MergeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "overwrite" | "overwrite-unconditional" => Ok(MergeRule::Overwrite),
            "fill-if-absent" | "coalesce" => Ok(MergeRule::FillIfAbsent),
            "overwrite-if-present" => Ok(MergeRule::OverwriteIfPresent),
            _ => Err(format!("Unknown merge rule: {s}")),
        }
    }
}

/// A source's proposed value for one field.
///
/// `raw_present` records whether the source's own cell was non-blank. It is
/// kept apart from the encoded value because a categorical default can turn
/// a blank label into a non-NULL code.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub value: Literal,
    pub raw_present: bool,
}

impl Candidate {
    pub fn new(value: Literal, raw_present: bool) -> Self {
        Self { value, raw_present }
    }

    /// The source supplied a non-blank cell that encoded to a value.
    pub fn is_present(&self) -> bool {
        self.raw_present && !self.value.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_accepts_null() {
        let current = Literal::text("Smith");
        let merged = MergeRule::Overwrite.merge(&current, Candidate::new(Literal::Null, false));
        assert!(merged.is_null());
    }

    #[test]
    fn fill_if_absent_keeps_existing() {
        let current = Literal::text("Smith");
        let merged = MergeRule::FillIfAbsent
            .merge(&current, Candidate::new(Literal::text("Jones"), true));
        assert_eq!(merged, Literal::text("Smith"));
        let merged = MergeRule::FillIfAbsent
            .merge(&Literal::Null, Candidate::new(Literal::text("Jones"), true));
        assert_eq!(merged, Literal::text("Jones"));
    }

    #[test]
    fn overwrite_if_present_ignores_defaulted_blank() {
        let current = Literal::text("medical");
        let defaulted = Candidate::new(Literal::text("other"), false);
        assert_eq!(
            MergeRule::OverwriteIfPresent.merge(&current, defaulted),
            Literal::text("medical")
        );
    }

    #[test]
    fn parses_rule_names() {
        assert_eq!(
            "fill_if_absent".parse::<MergeRule>().unwrap(),
            MergeRule::FillIfAbsent
        );
        assert_eq!(
            "Overwrite-If-Present".parse::<MergeRule>().unwrap(),
            MergeRule::OverwriteIfPresent
        );
        assert!("latest".parse::<MergeRule>().is_err());
    }
}
