//! Multi-source entity reconciliation.
//!
//! Each [`SourceSpec`] declares the fields one extract contributes to an
//! entity and the [`MergeRule`] governing each field. Reconciliation is a
//! left fold of [`apply_source`] over the sources in declared order, so the
//! result depends on that order and on nothing else.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use redi_model::{Candidate, EntityKind, Literal, MergeRule, Row};
use redi_transform::{Normalizer, encode_date, encode_integer, encode_text};

use crate::store::EntityStore;

type DeriveFn = Arc<dyn Fn(&Row) -> Literal + Send + Sync>;

/// One field a source contributes.
///
/// `column` is the raw column whose blankness decides presence for
/// [`MergeRule::OverwriteIfPresent`] and for labelled-only fields. The value
/// itself comes from `derive`, which may read any column of the row.
#[derive(Clone)]
pub struct FieldSpec {
    field: String,
    column: String,
    rule: MergeRule,
    labelled_only: bool,
    derive: DeriveFn,
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("field", &self.field)
            .field("column", &self.column)
            .field("rule", &self.rule)
            .field("labelled_only", &self.labelled_only)
            .finish_non_exhaustive()
    }
}

impl FieldSpec {
    pub fn new<F>(
        field: impl Into<String>,
        column: impl Into<String>,
        rule: MergeRule,
        derive: F,
    ) -> Self
    where
        F: Fn(&Row) -> Literal + Send + Sync + 'static,
    {
        Self {
            field: field.into(),
            column: column.into(),
            rule,
            labelled_only: false,
            derive: Arc::new(derive),
        }
    }

    /// Text copied from `column`.
    pub fn text(field: impl Into<String>, column: impl Into<String>, rule: MergeRule) -> Self {
        let column = column.into();
        let source = column.clone();
        Self::new(field, column, rule, move |row| encode_text(row.get(&source)))
    }

    /// Integer parsed from `column`, truncated toward zero.
    pub fn integer(field: impl Into<String>, column: impl Into<String>, rule: MergeRule) -> Self {
        let column = column.into();
        let source = column.clone();
        Self::new(field, column, rule, move |row| encode_integer(row.get(&source)))
    }

    /// Canonical code for the label in `column`.
    pub fn code(
        field: impl Into<String>,
        column: impl Into<String>,
        normalizer: &'static Normalizer,
        rule: MergeRule,
    ) -> Self {
        let column = column.into();
        let source = column.clone();
        Self::new(field, column, rule, move |row| {
            normalizer.encode(row.text(&source))
        })
    }

    /// Date parsed from `column` with a `strftime` format.
    pub fn date(
        field: impl Into<String>,
        column: impl Into<String>,
        format: impl Into<String>,
        rule: MergeRule,
    ) -> Self {
        let column = column.into();
        let source = column.clone();
        let format = format.into();
        Self::new(field, column, rule, move |row| {
            encode_date(row.get(&source), &format)
        })
    }

    /// Only write the field when this source's own label in `column` is non-blank.
    #[must_use]
    pub fn labelled_only(mut self) -> Self {
        self.labelled_only = true;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn rule(&self) -> MergeRule {
        self.rule
    }

    pub fn is_labelled_only(&self) -> bool {
        self.labelled_only
    }

    /// The value this row proposes, with presence taken from `column`.
    pub fn candidate(&self, row: &Row) -> Candidate {
        Candidate::new((self.derive)(row), !row.is_blank(&self.column))
    }
}

/// How a source names the entity each row belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    /// Trimmed value of a column; rows with a blank key are skipped.
    Column(String),
    /// Numeric value of a column, so `42`, `042` and `42.0` name one record.
    /// Rows whose value is not a number are skipped.
    IntegerColumn(String),
    /// 1-based position of the row in the extract.
    RowPosition,
}

/// A named extract and the fields it contributes to one entity kind.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    name: String,
    entity: EntityKind,
    key: KeySpec,
    fields: Vec<FieldSpec>,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, entity: EntityKind, key: KeySpec) -> Self {
        Self {
            name: name.into(),
            entity,
            key,
            fields: Vec::new(),
        }
    }

    /// Source keyed by the trimmed value of `column`.
    pub fn keyed_by(name: impl Into<String>, entity: EntityKind, column: impl Into<String>) -> Self {
        Self::new(name, entity, KeySpec::Column(column.into()))
    }

    /// Source keyed by the integer value of `column`.
    pub fn keyed_by_integer(
        name: impl Into<String>,
        entity: EntityKind,
        column: impl Into<String>,
    ) -> Self {
        Self::new(name, entity, KeySpec::IntegerColumn(column.into()))
    }

    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn key(&self) -> &KeySpec {
        &self.key
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn key_for(&self, index: usize, row: &Row) -> Option<String> {
        match &self.key {
            KeySpec::Column(column) => {
                let key = row.text(column);
                (!key.is_empty()).then(|| key.to_string())
            }
            KeySpec::IntegerColumn(column) => encode_integer(row.get(column))
                .as_integer()
                .map(|key| key.to_string()),
            KeySpec::RowPosition => Some((index + 1).to_string()),
        }
    }
}

/// Fold one source's rows into the store.
pub fn apply_source(mut store: EntityStore, source: &SourceSpec, rows: &[Row]) -> EntityStore {
    let mut created = 0usize;
    let mut skipped = 0usize;
    for (index, row) in rows.iter().enumerate() {
        let Some(key) = source.key_for(index, row) else {
            skipped += 1;
            continue;
        };
        let (record, is_new) = store.record_mut(&key);
        if is_new {
            created += 1;
        }
        for spec in &source.fields {
            if spec.labelled_only && row.is_blank(&spec.column) {
                continue;
            }
            let candidate = spec.candidate(row);
            if spec.rule.admits(record.get(&spec.field), &candidate) {
                record.set(spec.field.as_str(), candidate.value);
            }
        }
    }
    debug!(
        source = %source.name,
        entity = %source.entity,
        rows = rows.len(),
        created,
        skipped,
        "applied source"
    );
    store
}

/// Fold sources, in order, into a fresh store.
pub fn reconcile<'a, I>(sources: I) -> EntityStore
where
    I: IntoIterator<Item = (&'a SourceSpec, &'a [Row])>,
{
    sources
        .into_iter()
        .fold(EntityStore::new(), |store, (source, rows)| {
            apply_source(store, source, rows)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_are_skipped() {
        let source = SourceSpec::keyed_by("events", EntityKind::Course, "ID")
            .field(FieldSpec::text("title", "CourseTitle", MergeRule::Overwrite));
        let rows = vec![
            Row::from_pairs([("ID", "  "), ("CourseTitle", "ALS")]),
            Row::from_pairs([("ID", " 7 "), ("CourseTitle", "BLS")]),
        ];
        let store = apply_source(EntityStore::new(), &source, &rows);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["7"]);
    }

    #[test]
    fn integer_keys_skip_non_numeric_values() {
        let source = SourceSpec::keyed_by_integer("events", EntityKind::Course, "ID")
            .field(FieldSpec::text("title", "CourseTitle", MergeRule::Overwrite));
        let rows = vec![
            Row::from_pairs([("ID", "n/a"), ("CourseTitle", "ALS")]),
            Row::from_pairs([("ID", "7.0"), ("CourseTitle", "BLS")]),
        ];
        let store = apply_source(EntityStore::new(), &source, &rows);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["7"]);
    }

    #[test]
    fn row_position_keys_start_at_one() {
        let source = SourceSpec::new("faculty", EntityKind::FacultyMember, KeySpec::RowPosition)
            .field(FieldSpec::text("surname", "Surname", MergeRule::Overwrite));
        let rows = vec![Row::new(), Row::from_pairs([("Surname", "Lee")])];
        let store = apply_source(EntityStore::new(), &source, &rows);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(store.get("2").map(|r| r.get("surname").clone()), Some(Literal::text("Lee")));
    }

    #[test]
    fn labelled_only_skips_blank_labels_even_for_overwrite() {
        let source = SourceSpec::keyed_by("als", EntityKind::Staff, "Id").field(
            FieldSpec::code(
                "discipline_stream_code",
                "Job Family Name",
                &redi_transform::STREAM,
                MergeRule::Overwrite,
            )
            .labelled_only(),
        );
        let rows = vec![
            Row::from_pairs([("Id", "1"), ("Job Family Name", "Medical")]),
            Row::from_pairs([("Id", "1"), ("Job Family Name", "")]),
        ];
        let store = apply_source(EntityStore::new(), &source, &rows);
        assert_eq!(
            store.get("1").map(|r| r.get("discipline_stream_code").clone()),
            Some(Literal::text("medical"))
        );
    }
}
