//! View composition: store + query + selection → what a screen draws.
//!
//! Nothing here touches the terminal. Screens own a [`RegistryState`] or
//! [`MapState`], feed it user input and render the composed view.
//!
//! ```text
//!   InMemoryStore ──► filter(query, fields) ──► rows ─┐
//!         │                                          ├──► RegistryView
//!         └──────► SelectionState::resolve ──► detail┘
//! ```

use tracing::{debug, trace};

use crate::error::RegistryResult;
use crate::filter::{DEFAULT_MAX_QUERY_LEN, FilterQuery, filter};
use crate::selection::SelectionState;
use crate::spatial::{Coordinate, Located, SpatialIndex, Viewport};
use crate::store::{EntityStore, InMemoryStore};
use crate::tracing_config::span_names;
use crate::types::{Entity, EntityId};

// ─── Composed Views ─────────────────────────────────────────────────────────

/// Right-hand detail pane.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPane<'a, E> {
    Selected(&'a E),
    /// Nothing selected, or the selected id no longer exists.
    Empty,
}

impl<'a, E> DetailPane<'a, E> {
    #[must_use]
    pub const fn selected(&self) -> Option<&'a E> {
        match self {
            Self::Selected(entity) => Some(*entity),
            Self::Empty => None,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A list screen after filtering.
#[derive(Debug, Clone)]
pub struct RegistryView<'a, E> {
    /// Matching records in store order.
    pub rows: Vec<&'a E>,
    pub detail: DetailPane<'a, E>,
    /// Size of the unfiltered store.
    pub total: usize,
}

/// A map marker ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView<'a> {
    pub id: &'a EntityId,
    pub at: Coordinate,
    pub selected: bool,
}

/// The map screen after composition.
#[derive(Debug, Clone)]
pub struct MapView<'a, E> {
    pub markers: Vec<MarkerView<'a>>,
    pub detail: DetailPane<'a, E>,
}

fn detail_for<'a, E: Entity>(
    store: &'a InMemoryStore<E>,
    selection: &SelectionState,
) -> DetailPane<'a, E> {
    selection
        .resolve(store)
        .map_or(DetailPane::Empty, DetailPane::Selected)
}

// ─── Registry State ─────────────────────────────────────────────────────────

/// Searchable list with an optional selected record.
#[derive(Debug, Clone)]
pub struct RegistryState<E> {
    store: InMemoryStore<E>,
    query: FilterQuery,
    selection: SelectionState,
    fields: &'static [&'static str],
    max_query_len: usize,
}

impl<E: Entity> RegistryState<E> {
    /// Searches the kind's default fields.
    #[must_use]
    pub fn new(store: InMemoryStore<E>) -> Self {
        Self::with_fields(store, E::SEARCH_FIELDS)
    }

    #[must_use]
    pub const fn with_fields(store: InMemoryStore<E>, fields: &'static [&'static str]) -> Self {
        Self {
            store,
            query: FilterQuery::new(),
            selection: SelectionState::new(),
            fields,
            max_query_len: DEFAULT_MAX_QUERY_LEN,
        }
    }

    #[must_use]
    pub const fn with_max_query_len(mut self, max_query_len: usize) -> Self {
        self.max_query_len = max_query_len;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &InMemoryStore<E> {
        &self.store
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Replace the query text.
    ///
    /// # Errors
    ///
    /// [`InvalidQuery`](crate::RegistryError::InvalidQuery) when the text is
    /// longer than the configured limit; the previous query is kept.
    pub fn set_query(&mut self, text: &str) -> RegistryResult<()> {
        let mut candidate = FilterQuery::new();
        candidate.set(text);
        candidate.validate(self.max_query_len)?;
        self.query = candidate;
        Ok(())
    }

    /// Append one typed character.
    ///
    /// # Errors
    ///
    /// [`InvalidQuery`](crate::RegistryError::InvalidQuery) when the keystroke
    /// would cross the length limit; the query is left unchanged.
    pub fn push_char(&mut self, ch: char) -> RegistryResult<()> {
        self.query.push_char(ch);
        if let Err(err) = self.query.validate(self.max_query_len) {
            self.query.pop_char();
            return Err(err);
        }
        Ok(())
    }

    pub fn pop_char(&mut self) {
        self.query.pop_char();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn select(&mut self, id: EntityId) {
        self.selection.select(id);
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    /// Move the selection to the next visible row, wrapping at the end.
    pub fn select_next(&mut self) {
        self.select_next_where(|_| true);
    }

    /// Move the selection to the previous visible row, wrapping at the start.
    pub fn select_prev(&mut self) {
        self.select_prev_where(|_| true);
    }

    /// [`select_next`](Self::select_next) over rows that also pass `scope`.
    pub fn select_next_where(&mut self, scope: impl Fn(&E) -> bool) {
        self.step(&scope, true);
    }

    /// [`select_prev`](Self::select_prev) over rows that also pass `scope`.
    pub fn select_prev_where(&mut self, scope: impl Fn(&E) -> bool) {
        self.step(&scope, false);
    }

    fn step(&mut self, scope: &dyn Fn(&E) -> bool, forward: bool) {
        let rows = self.visible(scope);
        if rows.is_empty() {
            return;
        }
        let count = rows.len();
        let position = self
            .selection
            .current()
            .and_then(|id| rows.iter().position(|row| row.id() == id));
        let next = match (position, forward) {
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        let id = rows[next].id().clone();
        self.selection.select(id);
    }

    /// Delete a record and reset the selection if it pointed at it.
    ///
    /// # Errors
    ///
    /// [`NotFound`](crate::RegistryError::NotFound) when no record has this id.
    pub fn remove(&mut self, id: &EntityId) -> RegistryResult<E> {
        let removed = self.store.remove(id)?;
        self.selection.on_entity_deleted(id);
        debug!(target: span_names::VIEW, kind = %E::KIND, id = %id, "record removed from view");
        Ok(removed)
    }

    /// Compose the filtered list and detail pane.
    #[must_use]
    pub fn compose(&self) -> RegistryView<'_, E> {
        self.compose_where(|_| true)
    }

    /// Compose with an extra row predicate applied after the text query.
    #[must_use]
    pub fn compose_where(&self, scope: impl Fn(&E) -> bool) -> RegistryView<'_, E> {
        let rows = self.visible(&scope);
        trace!(
            target: span_names::VIEW,
            kind = %E::KIND,
            query_len = self.query.char_len(),
            result_count = rows.len(),
            "registry composed"
        );
        RegistryView {
            rows,
            detail: detail_for(&self.store, &self.selection),
            total: self.store.len(),
        }
    }

    fn visible(&self, scope: &dyn Fn(&E) -> bool) -> Vec<&E> {
        filter(self.store.list(), self.query.as_str(), self.fields)
            .filter(|entity| scope(*entity))
            .collect()
    }
}

// ─── Map State ──────────────────────────────────────────────────────────────

/// Zone map: markers, hit-testing and one selected zone.
#[derive(Debug, Clone)]
pub struct MapState<E> {
    store: InMemoryStore<E>,
    index: SpatialIndex,
    selection: SelectionState,
}

impl<E: Located> MapState<E> {
    #[must_use]
    pub fn new(store: InMemoryStore<E>, tolerance: f64) -> Self {
        let index = SpatialIndex::build(store.list(), tolerance);
        Self {
            store,
            index,
            selection: SelectionState::new(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &InMemoryStore<E> {
        &self.store
    }

    #[must_use]
    pub const fn index(&self) -> &SpatialIndex {
        &self.index
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Select the marker under a normalized point.
    ///
    /// A miss leaves the current selection untouched and returns `None`.
    pub fn click(&mut self, x: f64, y: f64) -> Option<EntityId> {
        let hit = self.index.hit_test(x, y).cloned()?;
        self.selection.select(hit.clone());
        Some(hit)
    }

    /// Select the marker under a clicked terminal cell.
    ///
    /// A marker drawn on the cell wins. Otherwise the cell's point is
    /// hit-tested with a radius of at least [`Viewport::cell_radius`], so a
    /// coarse viewport still reaches every marker. Misses and cells outside
    /// the viewport leave the selection untouched.
    pub fn click_cell(&mut self, column: u16, row: u16, viewport: Viewport) -> Option<EntityId> {
        let hit = match self.index.marker_at_cell(column, row, viewport) {
            Some(id) => id.clone(),
            None => {
                let point = Coordinate::from_cell(column, row, viewport)?;
                let radius = self.index.tolerance().max(viewport.cell_radius());
                self.index
                    .hit_test_within(point.x(), point.y(), radius)
                    .cloned()?
            }
        };
        self.selection.select(hit.clone());
        Some(hit)
    }

    pub fn select(&mut self, id: EntityId) {
        self.selection.select(id);
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    /// Cycle through markers in store order.
    pub fn select_next(&mut self) {
        let markers = self.index.markers();
        if markers.is_empty() {
            return;
        }
        let next = self
            .selection
            .current()
            .and_then(|id| markers.iter().position(|marker| &marker.id == id))
            .map_or(0, |i| (i + 1) % markers.len());
        self.selection.select(markers[next].id.clone());
    }

    /// Delete a zone, rebuild the markers and reset the selection if needed.
    ///
    /// # Errors
    ///
    /// [`NotFound`](crate::RegistryError::NotFound) when no zone has this id.
    pub fn remove(&mut self, id: &EntityId) -> RegistryResult<E> {
        let removed = self.store.remove(id)?;
        self.index = SpatialIndex::build(self.store.list(), self.index.tolerance());
        self.selection.on_entity_deleted(id);
        Ok(removed)
    }

    #[must_use]
    pub fn compose(&self) -> MapView<'_, E> {
        let markers = self
            .index
            .markers()
            .iter()
            .map(|marker| MarkerView {
                id: &marker.id,
                at: marker.at,
                selected: self.selection.is_selected(&marker.id),
            })
            .collect();
        MapView {
            markers,
            detail: detail_for(&self.store, &self.selection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::types::{EntityKind, FieldValue};

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: EntityId,
        name: String,
    }

    impl Entity for Person {
        const KIND: EntityKind = EntityKind::Staff;
        const SEARCH_FIELDS: &'static [&'static str] = &["name"];

        fn id(&self) -> &EntityId {
            &self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            (name == "name").then_some(FieldValue::Text(&self.name))
        }
    }

    fn people() -> RegistryState<Person> {
        let records = ["John Rodriguez", "Sarah Chen", "Mike Thompson"]
            .iter()
            .zip(1..)
            .map(|(name, id)| Person {
                id: EntityId::Num(id),
                name: (*name).to_owned(),
            })
            .collect();
        RegistryState::new(InMemoryStore::from_records(records).unwrap())
    }

    fn names<'a>(view: &RegistryView<'a, Person>) -> Vec<&'a str> {
        view.rows.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn compose_without_query_shows_everything() {
        let state = people();
        let view = state.compose();
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.total, 3);
        assert!(view.detail.is_empty());
    }

    #[test]
    fn typing_narrows_rows() {
        let mut state = people();
        for ch in "th".chars() {
            state.push_char(ch).unwrap();
        }
        assert_eq!(names(&state.compose()), vec!["Mike Thompson"]);
        state.pop_char();
        assert_eq!(state.query(), "t");
        state.clear_query();
        assert_eq!(state.compose().rows.len(), 3);
    }

    #[test]
    fn over_long_keystroke_is_rejected() {
        let mut state = people().with_max_query_len(2);
        state.push_char('a').unwrap();
        state.push_char('b').unwrap();
        let err = state.push_char('c').unwrap_err();
        assert!(matches!(err, RegistryError::InvalidQuery { len: 3, max: 2 }));
        assert_eq!(state.query(), "ab");
        assert!(state.set_query("abc").is_err());
        assert_eq!(state.query(), "ab");
    }

    #[test]
    fn selection_survives_filtering() {
        let mut state = people();
        state.select(EntityId::Num(2));
        state.set_query("mike").unwrap();
        let view = state.compose();
        assert_eq!(names(&view), vec!["Mike Thompson"]);
        assert_eq!(view.detail.selected().map(|p| p.name.as_str()), Some("Sarah Chen"));
    }

    #[test]
    fn select_next_and_prev_wrap() {
        let mut state = people();
        state.select_next();
        assert_eq!(state.selection().current(), Some(&EntityId::Num(1)));
        state.select_prev();
        assert_eq!(state.selection().current(), Some(&EntityId::Num(3)));
        state.select_next();
        assert_eq!(state.selection().current(), Some(&EntityId::Num(1)));
    }

    #[test]
    fn select_prev_from_nothing_picks_last_visible() {
        let mut state = people();
        state.set_query("o").unwrap();
        state.select_prev();
        assert_eq!(state.selection().current(), Some(&EntityId::Num(3)));
    }

    #[test]
    fn stepping_over_empty_rows_is_a_no_op() {
        let mut state = people();
        state.set_query("xyz").unwrap();
        state.select_next();
        assert_eq!(state.selection().current(), None);
    }

    #[test]
    fn scoped_stepping_skips_rows_outside_scope() {
        let mut state = people();
        state.select_next_where(|p| p.name.starts_with('M'));
        assert_eq!(state.selection().current(), Some(&EntityId::Num(3)));
        let view = state.compose_where(|p| p.name.starts_with('M'));
        assert_eq!(names(&view), vec!["Mike Thompson"]);
        assert_eq!(view.total, 3);
    }

    #[test]
    fn removing_selected_record_empties_detail() {
        let mut state = people();
        state.select(EntityId::Num(2));
        let removed = state.remove(&EntityId::Num(2)).unwrap();
        assert_eq!(removed.name, "Sarah Chen");
        let view = state.compose();
        assert!(view.detail.is_empty());
        assert_eq!(view.total, 2);
        assert_eq!(state.selection().current(), None);
    }

    #[test]
    fn dangling_selection_renders_empty_detail() {
        let mut state = people();
        state.select(EntityId::Num(99));
        assert!(state.compose().detail.is_empty());
    }
}
