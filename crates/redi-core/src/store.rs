use indexmap::IndexMap;
use indexmap::map::Entry;

use redi_model::EntityRecord;

/// Reconciled records of one entity kind, in first-sighting order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    records: IndexMap<String, EntityRecord>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `key`, created empty on first sighting.
    ///
    /// Returns true alongside the record when it was just created.
    pub fn record_mut(&mut self, key: &str) -> (&mut EntityRecord, bool) {
        match self.records.entry(key.to_string()) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => (entry.insert(EntityRecord::new(key)), true),
        }
    }

    /// Insert or replace a whole record, keeping the original position of the key.
    pub fn insert(&mut self, record: EntityRecord) {
        self.records.insert(record.key().to_string(), record);
    }

    pub fn get(&self, key: &str) -> Option<&EntityRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &EntityRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<EntityRecord> for EntityStore {
    fn from_iter<T: IntoIterator<Item = EntityRecord>>(iter: T) -> Self {
        let mut store = EntityStore::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use redi_model::Literal;

    use super::*;

    #[test]
    fn keeps_first_sighting_order() {
        let mut store = EntityStore::new();
        store.record_mut("b");
        store.record_mut("a");
        let (record, created) = store.record_mut("b");
        record.set("surname", Literal::text("Smith"));
        assert!(!created);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(store.get("b").is_some_and(|r| r.has_value("surname")));
    }
}
