//! Many-to-many associations derived from a denormalized extract.
//!
//! A census row naming a ward and an admitting unit says three things: the
//! ward exists, the unit exists, and the two are associated. [`Relationships`]
//! collects all three as distinct sets, in first-appearance order.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use redi_model::{EntityRecord, Row};
use redi_transform::encode_text;

use crate::store::EntityStore;

/// An enrichment field: record `field` from the extract's `column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichField<'a> {
    pub field: &'a str,
    pub column: &'a str,
}

impl<'a> EnrichField<'a> {
    pub const fn new(field: &'a str, column: &'a str) -> Self {
        Self { field, column }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Relationships {
    left: IndexSet<String>,
    right: IndexMap<String, EntityRecord>,
    pairs: IndexSet<(String, String)>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one co-occurrence. Blank codes are ignored; a pair needs both sides.
    pub fn observe(&mut self, left: &str, right: &str) {
        let left = left.trim();
        let right = right.trim();
        if !left.is_empty() {
            self.left.insert(left.to_string());
        }
        if !right.is_empty() {
            self.add_right(right);
        }
        if !left.is_empty() && !right.is_empty() {
            self.pairs.insert((left.to_string(), right.to_string()));
        }
    }

    fn add_right(&mut self, code: &str) -> &mut EntityRecord {
        self.right
            .entry(code.to_string())
            .or_insert_with(|| EntityRecord::new(code))
    }

    /// Attach descriptive fields to right-side codes from a second extract.
    ///
    /// Every code named joins the right-side set. Per (code, field) the first
    /// non-NULL value wins; later rows for the same code only fill gaps.
    pub fn enrich(&mut self, rows: &[Row], code_column: &str, fields: &[EnrichField<'_>]) {
        let before = self.right.len();
        for row in rows {
            let code = row.text(code_column);
            if code.is_empty() {
                continue;
            }
            let record = self.add_right(code);
            for spec in fields {
                if record.has_value(spec.field) {
                    continue;
                }
                let value = encode_text(row.get(spec.column));
                if !value.is_null() {
                    record.set(spec.field, value);
                }
            }
        }
        debug!(
            rows = rows.len(),
            added = self.right.len() - before,
            "enriched right-side codes"
        );
    }

    pub fn left_codes(&self) -> impl Iterator<Item = &str> {
        self.left.iter().map(String::as_str)
    }

    pub fn right_codes(&self) -> impl Iterator<Item = &str> {
        self.right.keys().map(String::as_str)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(left, right)| (left.as_str(), right.as_str()))
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Left-side codes as bare entity records.
    pub fn left_store(&self) -> EntityStore {
        self.left.iter().map(EntityRecord::new).collect()
    }

    /// Right-side codes with any enrichment fields.
    pub fn right_store(&self) -> EntityStore {
        self.right.values().cloned().collect()
    }
}

/// Derive a relationship set from the `left_column` / `right_column` of each row.
pub fn derive_relationships(rows: &[Row], left_column: &str, right_column: &str) -> Relationships {
    let mut relationships = Relationships::new();
    for row in rows {
        relationships.observe(row.text(left_column), row.text(right_column));
    }
    debug!(
        rows = rows.len(),
        left = relationships.left.len(),
        right = relationships.right.len(),
        pairs = relationships.pairs.len(),
        "derived relationships"
    );
    relationships
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sided_rows_still_contribute_codes() {
        let mut relationships = Relationships::new();
        relationships.observe("WardA", "");
        relationships.observe("", "Unit9");
        assert_eq!(relationships.left_codes().collect::<Vec<_>>(), vec!["WardA"]);
        assert_eq!(relationships.right_codes().collect::<Vec<_>>(), vec!["Unit9"]);
        assert_eq!(relationships.pair_count(), 0);
    }
}
