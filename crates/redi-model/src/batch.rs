//! Statement batches handed to the bulk loader.
//!
//! One [`UpsertBatch`] per entity kind. Each row names its natural key cells
//! and value cells; the batch-level [`ConflictRule`] tells the loader what to
//! do when the key already exists. Applying a batch twice leaves the
//! destination as applying it once.

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::literal::Literal;

/// Resolve a surrogate id in another table by natural key at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyLookup {
    pub table: String,
    pub id_column: String,
    pub key_column: String,
    pub key: Literal,
}

impl KeyLookup {
    /// Look up `id` in `table` where `key_column = key`.
    pub fn id_by(table: impl Into<String>, key_column: impl Into<String>, key: Literal) -> Self {
        Self {
            table: table.into(),
            id_column: "id".to_string(),
            key_column: key_column.into(),
            key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Value(Literal),
    Lookup(KeyLookup),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Value(Literal::Null))
    }
}

impl From<Literal> for Cell {
    fn from(value: Literal) -> Self {
        Cell::Value(value)
    }
}

impl From<KeyLookup> for Cell {
    fn from(value: KeyLookup) -> Self {
        Cell::Lookup(value)
    }
}

/// What the loader does when a row's natural key already exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum ConflictRule {
    /// Leave the existing row untouched.
    DoNothing,
    /// Take each listed column from the incoming row unless it is NULL;
    /// stamp `touch` columns with the load time.
    Coalesce {
        columns: Vec<String>,
        touch: Vec<String>,
    },
}

impl ConflictRule {
    /// Coalesce the given columns, stamping `touch` columns.
    pub fn coalesce(columns: &[&str], touch: &[&str]) -> Self {
        ConflictRule::Coalesce {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            touch: touch.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertRow {
    pub key: Vec<Cell>,
    pub values: Vec<Cell>,
}

impl UpsertRow {
    pub fn new(key: Vec<Cell>, values: Vec<Cell>) -> Self {
        Self { key, values }
    }

    /// Key cells followed by value cells, in column order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.key.iter().chain(self.values.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertBatch {
    pub entity: EntityKind,
    pub table: String,
    pub key_columns: Vec<String>,
    pub value_columns: Vec<String>,
    pub conflict: ConflictRule,
    pub rows: Vec<UpsertRow>,
}

impl UpsertBatch {
    pub fn new(
        entity: EntityKind,
        key_columns: &[&str],
        value_columns: &[&str],
        conflict: ConflictRule,
    ) -> Self {
        Self {
            entity,
            table: entity.table().to_string(),
            key_columns: key_columns.iter().map(|c| (*c).to_string()).collect(),
            value_columns: value_columns.iter().map(|c| (*c).to_string()).collect(),
            conflict,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: UpsertRow) {
        debug_assert_eq!(row.key.len(), self.key_columns.len());
        debug_assert_eq!(row.values.len(), self.value_columns.len());
        self.rows.push(row);
    }

    /// Key columns followed by value columns.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.key_columns
            .iter()
            .chain(self.value_columns.iter())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
