//! End-to-end scenarios across store, filter, selection and spatial index.

use forestguard_core::{
    Coordinate, DEFAULT_HIT_TOLERANCE, Entity, EntityId, EntityStore, InMemoryStore, MapState,
    RegistryError, RegistryState, RiskLevel, RiskSummary, SelectionState, SpatialIndex, Staff,
    StaffStatus, Viewport, Zone, filter,
};

fn staff(id: u64, name: &str, role: &str, forest: &str) -> Staff {
    Staff {
        id: EntityId::Num(id),
        name: name.into(),
        role: role.into(),
        forest: forest.into(),
        zone: "Zone A-12".into(),
        phone: "+1 (555) 123-4567".into(),
        email: "ranger@forestguard.com".into(),
        status: StaffStatus::Active,
        experience_years: 5,
        specialization: "Fire Prevention".into(),
    }
}

fn roster() -> InMemoryStore<Staff> {
    InMemoryStore::from_records(vec![
        staff(1, "John Rodriguez", "Forest Supervisor", "Pine Valley National Forest"),
        staff(2, "Sarah Chen", "Fire Detection Specialist", "Cedar Mountain Reserve"),
        staff(3, "Mike Thompson", "Forest Ranger", "Oak Ridge Forest"),
    ])
    .unwrap()
}

fn zone(id: &str, name: &str, risk: RiskLevel, x: f64, y: f64) -> Zone {
    Zone {
        id: EntityId::from(id),
        name: name.into(),
        risk,
        temperature: 24,
        humidity: 45,
        wind_speed: 8,
        coordinates: Coordinate::new(x, y).unwrap(),
        staff: 2,
        last_inspection: "2 hours ago".into(),
    }
}

fn zones() -> InMemoryStore<Zone> {
    InMemoryStore::from_records(vec![
        zone("A-12", "Pine Valley North", RiskLevel::High, 20.0, 15.0),
        zone("B-8", "Cedar Mountain East", RiskLevel::Medium, 45.0, 25.0),
        zone("C-15", "Oak Ridge Valley", RiskLevel::Low, 70.0, 40.0),
        zone("D-7", "Maple Creek Basin", RiskLevel::Low, 30.0, 60.0),
        zone("E-22", "Birch Hill Ridge", RiskLevel::Medium, 60.0, 70.0),
    ])
    .unwrap()
}

fn names<'a>(rows: impl Iterator<Item = &'a Staff>) -> Vec<&'a str> {
    rows.map(|s| s.name.as_str()).collect()
}

#[test]
fn staff_search_by_surname() {
    let store = roster();
    assert_eq!(
        names(filter(store.list(), "chen", Staff::SEARCH_FIELDS)),
        vec!["Sarah Chen"]
    );
}

#[test]
fn staff_empty_query_lists_everyone_in_order() {
    let store = roster();
    assert_eq!(
        names(filter(store.list(), "", Staff::SEARCH_FIELDS)),
        vec!["John Rodriguez", "Sarah Chen", "Mike Thompson"]
    );
}

#[test]
fn staff_search_without_hits_is_empty() {
    let store = roster();
    assert!(filter(store.list(), "xyz", Staff::SEARCH_FIELDS).next().is_none());
}

#[test]
fn staff_search_matches_forest_and_role() {
    let store = roster();
    assert_eq!(
        names(filter(store.list(), "oak ridge", Staff::SEARCH_FIELDS)),
        vec!["Mike Thompson"]
    );
    assert_eq!(
        names(filter(store.list(), "FOREST", Staff::SEARCH_FIELDS)),
        vec!["John Rodriguez", "Mike Thompson"]
    );
}

#[test]
fn click_near_zone_selects_it() {
    let store = zones();
    let index = SpatialIndex::build(store.list(), DEFAULT_HIT_TOLERANCE);
    assert_eq!(index.markers().len(), 5);
    assert_eq!(index.hit_test(21.0, 15.0), Some(&EntityId::from("A-12")));
}

#[test]
fn click_far_from_every_zone_misses() {
    let store = zones();
    let index = SpatialIndex::build(store.list(), DEFAULT_HIT_TOLERANCE);
    assert_eq!(index.hit_test(95.0, 95.0), None);
    assert_eq!(index.hit_test(5.0, 90.0), None);
}

#[test]
fn second_zone_selection_replaces_first() {
    let mut selection = SelectionState::new();
    selection.select(EntityId::from("B-8"));
    selection.select(EntityId::from("C-15"));
    assert_eq!(selection.current(), Some(&EntityId::from("C-15")));

    let store = zones();
    assert_eq!(selection.resolve(&store).map(|z| z.name.as_str()), Some("Oak Ridge Valley"));
}

#[test]
fn map_state_click_then_delete_clears_detail() {
    let mut map = MapState::new(zones(), DEFAULT_HIT_TOLERANCE);
    assert_eq!(map.click(45.0, 26.0), Some(EntityId::from("B-8")));
    let view = map.compose();
    assert_eq!(view.markers.iter().filter(|m| m.selected).count(), 1);
    assert_eq!(view.detail.selected().map(|z| z.name.as_str()), Some("Cedar Mountain East"));

    assert_eq!(map.click(99.0, 1.0), None);
    assert!(map.selection().is_selected(&EntityId::from("B-8")));

    map.remove(&EntityId::from("B-8")).unwrap();
    let view = map.compose();
    assert!(view.detail.is_empty());
    assert_eq!(view.markers.len(), 4);
    assert_eq!(map.index().hit_test(45.0, 25.0), None);
}

#[test]
fn clicking_a_drawn_marker_selects_it_in_short_viewports() {
    for height in 2..=8 {
        let viewport = Viewport::new(1, 4, 40, height);
        let mut map = MapState::new(zones(), DEFAULT_HIT_TOLERANCE);
        for zone in zones().list() {
            let (column, row) = zone.coordinates.to_cell(viewport);
            assert_eq!(
                map.click_cell(column, row, viewport).as_ref(),
                Some(&zone.id),
                "height {height}"
            );
        }
    }
}

#[test]
fn coarse_viewport_widens_the_click_radius() {
    let viewport = Viewport::new(0, 0, 40, 2);
    let mut map = MapState::new(zones(), DEFAULT_HIT_TOLERANCE);
    // One column right of A-12's marker at (8, 0).
    assert_eq!(map.click_cell(9, 0, viewport), Some(EntityId::from("A-12")));
    assert_eq!(map.click_cell(40, 0, viewport), None);
    assert!(map.selection().is_selected(&EntityId::from("A-12")));
}

#[test]
fn marker_lookup_for_removed_zone_is_not_found() {
    let mut map = MapState::new(zones(), DEFAULT_HIT_TOLERANCE);
    map.remove(&EntityId::from("E-22")).unwrap();
    let err = map.index().marker_for::<Zone>(&EntityId::from("E-22")).unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[test]
fn risk_summary_over_sample_zones() {
    let store = zones();
    let summary = RiskSummary::from_zones(store.list());
    assert_eq!((summary.high, summary.medium, summary.low), (1, 2, 2));
}

#[test]
fn deleting_selected_staff_resets_registry_selection() {
    let mut registry = RegistryState::new(roster());
    registry.set_query("chen").unwrap();
    registry.select_next();
    assert_eq!(registry.selection().current(), Some(&EntityId::Num(2)));

    registry.remove(&EntityId::Num(2)).unwrap();
    assert_eq!(registry.selection().current(), None);
    assert!(registry.compose().rows.is_empty());

    let err = InMemoryStore::from_records(vec![
        staff(4, "Emma Wilson", "Environmental Analyst", "Maple Creek Preserve"),
        staff(4, "David Garcia", "Senior Ranger", "Pine Valley National Forest"),
    ])
    .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateId { .. }));
}
