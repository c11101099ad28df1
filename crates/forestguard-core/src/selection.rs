//! Zero-or-one selected entity per view.

use tracing::debug;

use crate::store::EntityStore;
use crate::tracing_config::span_names;
use crate::types::{Entity, EntityId};

/// Which record, if any, the user has selected.
///
/// `select` replaces, never stacks. `select` does not check that the id
/// exists; [`resolve`](Self::resolve) returns `None` for a missing id and the
/// view renders its empty state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<EntityId>,
}

impl SelectionState {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    pub fn select(&mut self, id: EntityId) {
        debug!(target: span_names::SELECTION, id = %id, previous = ?self.current, "select");
        self.current = Some(id);
    }

    pub fn deselect(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!(target: span_names::SELECTION, id = %previous, "deselect");
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&EntityId> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Clear the selection if it points at the deleted entity.
    pub fn on_entity_deleted(&mut self, id: &EntityId) {
        if self.is_selected(id) {
            self.deselect();
        }
    }

    /// The selected record, or `None` when nothing is selected or the id is
    /// no longer in the store.
    #[must_use]
    pub fn resolve<'s, E, S>(&self, store: &'s S) -> Option<&'s E>
    where
        E: Entity,
        S: EntityStore<E>,
    {
        self.current.as_ref().and_then(|id| store.get(id).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::types::{EntityKind, FieldValue};

    #[derive(Debug)]
    struct Tag(EntityId);

    impl Entity for Tag {
        const KIND: EntityKind = EntityKind::Zone;
        const SEARCH_FIELDS: &'static [&'static str] = &[];

        fn id(&self) -> &EntityId {
            &self.0
        }

        fn field(&self, _name: &str) -> Option<FieldValue<'_>> {
            None
        }
    }

    fn store() -> InMemoryStore<Tag> {
        InMemoryStore::from_records(vec![Tag("B-8".into()), Tag("C-15".into())]).unwrap()
    }

    #[test]
    fn starts_unselected() {
        let selection = SelectionState::new();
        assert_eq!(selection.current(), None);
        assert!(selection.resolve(&store()).is_none());
    }

    #[test]
    fn select_replaces() {
        let mut selection = SelectionState::new();
        selection.select("B-8".into());
        selection.select("C-15".into());
        assert_eq!(selection.current(), Some(&EntityId::from("C-15")));
    }

    #[test]
    fn select_missing_id_round_trips_but_resolves_to_none() {
        let store = store();
        let mut selection = SelectionState::new();
        selection.select("Z-99".into());
        assert_eq!(selection.current(), Some(&EntityId::from("Z-99")));
        assert!(selection.resolve(&store).is_none());

        selection.select("B-8".into());
        assert_eq!(selection.resolve(&store).map(|t| &t.0), Some(&EntityId::from("B-8")));
    }

    #[test]
    fn deselect_clears() {
        let mut selection = SelectionState::new();
        selection.select("B-8".into());
        selection.deselect();
        assert_eq!(selection.current(), None);
        selection.deselect();
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn deleting_other_entity_keeps_selection() {
        let mut selection = SelectionState::new();
        selection.select("B-8".into());
        selection.on_entity_deleted(&"C-15".into());
        assert!(selection.is_selected(&"B-8".into()));
        selection.on_entity_deleted(&"B-8".into());
        assert_eq!(selection.current(), None);
    }
}
