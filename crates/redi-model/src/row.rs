use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One record of a source extract: field name → raw text.
///
/// A field that the extract does not carry is simply missing from the map;
/// callers see it the same way as a blank cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    fields: BTreeMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(field, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { fields }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Raw value as stored, or `None` when the field is absent.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Trimmed value; absent fields read as the empty string.
    pub fn text(&self, field: &str) -> &str {
        self.get(field).map(str::trim).unwrap_or("")
    }

    /// True when the field is absent or holds only whitespace.
    pub fn is_blank(&self, field: &str) -> bool {
        self.text(field).is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Row::from_pairs(iter)
    }
}
