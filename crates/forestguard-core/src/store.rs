//! Entity stores.
//!
//! A store holds every record of one kind in insertion order and guarantees id
//! uniqueness for its whole lifetime: removing a record retires its id, and a
//! retired id is never accepted again.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::tracing_config::span_names;
use crate::types::{Entity, EntityId};

/// Read access to a collection of entities of one kind.
pub trait EntityStore<E: Entity> {
    /// All records, in insertion order.
    fn list(&self) -> &[E];

    /// Look up one record.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] when no live record has this id.
    fn get(&self, id: &EntityId) -> RegistryResult<&E>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    fn contains(&self, id: &EntityId) -> bool {
        self.list().iter().any(|entity| entity.id() == id)
    }
}

// ─── In-Memory Store ────────────────────────────────────────────────────────

/// Vector-backed store loaded from a data source.
#[derive(Debug, Clone)]
pub struct InMemoryStore<E> {
    records: Vec<E>,
    retired: HashSet<EntityId>,
    high_water: u64,
}

impl<E: Entity> InMemoryStore<E> {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            retired: HashSet::new(),
            high_water: 0,
        }
    }

    /// Build a store from an initial batch, keeping the given order.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateId`] when two records share an id.
    pub fn from_records(records: Vec<E>) -> RegistryResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut high_water = 0;
        for record in &records {
            let id = record.id();
            if !seen.insert(id) {
                return Err(RegistryError::DuplicateId {
                    kind: E::KIND,
                    id: id.clone(),
                });
            }
            if let Some(n) = id.as_num() {
                high_water = high_water.max(n);
            }
        }
        debug!(
            target: span_names::STORE,
            kind = %E::KIND,
            count = records.len(),
            "store loaded"
        );
        Ok(Self {
            records,
            retired: HashSet::new(),
            high_water,
        })
    }

    /// Append a new record.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateId`] when the id is live or was retired.
    pub fn insert(&mut self, record: E) -> RegistryResult<()> {
        let id = record.id();
        if self.retired.contains(id) || self.position(id).is_some() {
            return Err(RegistryError::DuplicateId {
                kind: E::KIND,
                id: id.clone(),
            });
        }
        if let Some(n) = id.as_num() {
            self.high_water = self.high_water.max(n);
        }
        debug!(target: span_names::STORE, kind = %E::KIND, id = %id, "insert");
        self.records.push(record);
        Ok(())
    }

    /// Replace the record with the same id, keeping its position.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] when no live record has this id.
    pub fn update(&mut self, record: E) -> RegistryResult<()> {
        let index = self.require(record.id())?;
        debug!(target: span_names::STORE, kind = %E::KIND, id = %record.id(), "update");
        self.records[index] = record;
        Ok(())
    }

    /// Remove a record and retire its id.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] when no live record has this id.
    pub fn remove(&mut self, id: &EntityId) -> RegistryResult<E> {
        let index = self.require(id)?;
        let removed = self.records.remove(index);
        self.retired.insert(id.clone());
        debug!(target: span_names::STORE, kind = %E::KIND, id = %id, "remove");
        Ok(removed)
    }

    /// One past the highest numeric id ever issued, retired ids included.
    #[must_use]
    pub const fn next_numeric_id(&self) -> EntityId {
        EntityId::Num(self.high_water.saturating_add(1))
    }

    /// Whether this id was removed earlier.
    #[must_use]
    pub fn is_retired(&self, id: &EntityId) -> bool {
        self.retired.contains(id)
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn require(&self, id: &EntityId) -> RegistryResult<usize> {
        self.position(id).ok_or_else(|| RegistryError::NotFound {
            kind: E::KIND,
            id: id.clone(),
        })
    }
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityStore<E> for InMemoryStore<E> {
    fn list(&self) -> &[E] {
        &self.records
    }

    fn get(&self, id: &EntityId) -> RegistryResult<&E> {
        let index = self.require(id)?;
        Ok(&self.records[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityKind, FieldValue};

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: EntityId,
        text: String,
    }

    impl Entity for Note {
        const KIND: EntityKind = EntityKind::Staff;
        const SEARCH_FIELDS: &'static [&'static str] = &["text"];

        fn id(&self) -> &EntityId {
            &self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            (name == "text").then_some(FieldValue::Text(&self.text))
        }
    }

    fn note(id: u64, text: &str) -> Note {
        Note {
            id: EntityId::Num(id),
            text: text.into(),
        }
    }

    fn seeded() -> InMemoryStore<Note> {
        InMemoryStore::from_records(vec![note(1, "a"), note(2, "b"), note(3, "c")]).unwrap()
    }

    #[test]
    fn list_keeps_insertion_order() {
        let store = seeded();
        let texts: Vec<&str> = store.list().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
    }

    #[test]
    fn from_records_rejects_duplicates() {
        let err = InMemoryStore::from_records(vec![note(1, "a"), note(1, "b")]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { id: EntityId::Num(1), .. }));
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = seeded();
        assert_eq!(store.get(&EntityId::Num(2)).unwrap().text, "b");
        let err = store.get(&EntityId::Num(9)).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { kind: EntityKind::Staff, .. }));
    }

    #[test]
    fn insert_rejects_live_id() {
        let mut store = seeded();
        assert!(store.insert(note(2, "again")).is_err());
        store.insert(note(4, "d")).unwrap();
        assert_eq!(store.list().last().unwrap().text, "d");
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let mut store = seeded();
        let removed = store.remove(&EntityId::Num(3)).unwrap();
        assert_eq!(removed.text, "c");
        assert!(store.is_retired(&EntityId::Num(3)));
        assert!(!store.contains(&EntityId::Num(3)));

        let err = store.insert(note(3, "reborn")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { .. }));
        assert_eq!(store.next_numeric_id(), EntityId::Num(4));
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = seeded();
        store.update(note(2, "B")).unwrap();
        let texts: Vec<&str> = store.list().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "B", "c"]);
        assert!(store.update(note(7, "x")).is_err());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut store = seeded();
        assert!(store.remove(&EntityId::Num(42)).is_err());
        assert!(!store.is_retired(&EntityId::Num(42)));
    }

    #[test]
    fn next_numeric_id_on_empty_store() {
        let store = InMemoryStore::<Note>::default();
        assert_eq!(store.next_numeric_id(), EntityId::Num(1));
        assert!(store.is_empty());
    }
}
