//! Spatial index over located entities.
//!
//! Zones live on a normalized `[0, 100] x [0, 100]` plane. The map screen
//! places one marker per zone and resolves clicks back to a zone id with
//! [`SpatialIndex::hit_test`].

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{RegistryError, RegistryResult};
use crate::tracing_config::span_names;
use crate::types::{Entity, EntityId};

/// Default hit-test radius in normalized units.
pub const DEFAULT_HIT_TOLERANCE: f64 = 5.0;

const PLANE_MAX: f64 = 100.0;

// ─── Coordinate ─────────────────────────────────────────────────────────────

/// A point on the normalized map plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    x: f64,
    y: f64,
}

impl Coordinate {
    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidCoordinate`] when either axis is
    /// non-finite or outside `[0, 100]`.
    pub fn new(x: f64, y: f64) -> RegistryResult<Self> {
        check_axis("x", x)?;
        check_axis("y", y)?;
        Ok(Self { x, y })
    }

    #[must_use]
    pub const fn x(self) -> f64 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> f64 {
        self.y
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Project into a terminal viewport, returning `(column, row)`.
    ///
    /// `0` maps to the first cell and `100` to the last one on each axis.
    #[must_use]
    pub fn to_cell(self, viewport: Viewport) -> (u16, u16) {
        let col = project(self.x, viewport.width);
        let row = project(self.y, viewport.height);
        (
            viewport.x.saturating_add(col),
            viewport.y.saturating_add(row),
        )
    }

    /// Inverse of [`to_cell`](Self::to_cell) for a clicked cell.
    ///
    /// Returns `None` when the cell lies outside the viewport.
    #[must_use]
    pub fn from_cell(column: u16, row: u16, viewport: Viewport) -> Option<Self> {
        if !viewport.contains(column, row) {
            return None;
        }
        let x = unproject(column - viewport.x, viewport.width);
        let y = unproject(row - viewport.y, viewport.height);
        Some(Self { x, y })
    }
}

fn check_axis(axis: &'static str, value: f64) -> RegistryResult<()> {
    if value.is_finite() && (0.0..=PLANE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(RegistryError::InvalidCoordinate { axis, value })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn project(value: f64, extent: u16) -> u16 {
    let span = f64::from(extent.saturating_sub(1));
    (value / PLANE_MAX * span).round() as u16
}

/// Worst-case rounding error of one axis of a projection round trip.
fn cell_error(extent: u16) -> f64 {
    match extent.saturating_sub(1) {
        // Every value lands on the single cell, which maps back to 0.
        0 => PLANE_MAX,
        span => PLANE_MAX / f64::from(span) / 2.0,
    }
}

fn unproject(offset: u16, extent: u16) -> f64 {
    let span = extent.saturating_sub(1);
    if span == 0 {
        return 0.0;
    }
    f64::from(offset) / f64::from(span) * PLANE_MAX
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = RegistryError;

    fn try_from([x, y]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.x, value.y]
    }
}

// ─── Viewport ───────────────────────────────────────────────────────────────

/// Terminal rectangle the map plane is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn contains(self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && (column - self.x) < self.width
            && (row - self.y) < self.height
    }

    /// Largest distance, in plane units, between a coordinate and the point
    /// its cell maps back to through [`Coordinate::from_cell`].
    #[must_use]
    pub fn cell_radius(self) -> f64 {
        cell_error(self.width).hypot(cell_error(self.height))
    }
}

// ─── Located ────────────────────────────────────────────────────────────────

/// Entities that have a position on the map plane.
pub trait Located: Entity {
    fn coordinate(&self) -> Coordinate;
}

/// One marker on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialMarker {
    pub id: EntityId,
    pub at: Coordinate,
}

// ─── Spatial Index ──────────────────────────────────────────────────────────

/// Marker set built from a store snapshot, in store order.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    markers: Vec<SpatialMarker>,
    tolerance: f64,
}

impl SpatialIndex {
    /// Collect one marker per entity.
    #[must_use]
    pub fn build<E: Located>(entities: &[E], tolerance: f64) -> Self {
        let markers = entities
            .iter()
            .map(|entity| SpatialMarker {
                id: entity.id().clone(),
                at: entity.coordinate(),
            })
            .collect();
        Self { markers, tolerance }
    }

    #[must_use]
    pub fn markers(&self) -> &[SpatialMarker] {
        &self.markers
    }

    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Position of an entity's marker.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] when no marker has this id.
    pub fn marker_for<E: Located>(&self, id: &EntityId) -> RegistryResult<Coordinate> {
        self.markers
            .iter()
            .find(|marker| &marker.id == id)
            .map(|marker| marker.at)
            .ok_or_else(|| RegistryError::NotFound {
                kind: E::KIND,
                id: id.clone(),
            })
    }

    /// Nearest marker within the tolerance radius (inclusive).
    ///
    /// Equidistant markers resolve to the one that comes first in store order.
    /// A non-finite point hits nothing.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&EntityId> {
        self.hit_test_within(x, y, self.tolerance)
    }

    /// Marker drawn on a terminal cell of `viewport`.
    ///
    /// Markers sharing a cell overdraw in store order, so the last one is the
    /// one on screen.
    #[must_use]
    pub fn marker_at_cell(&self, column: u16, row: u16, viewport: Viewport) -> Option<&EntityId> {
        self.markers
            .iter()
            .rev()
            .find(|marker| marker.at.to_cell(viewport) == (column, row))
            .map(|marker| &marker.id)
    }

    /// [`hit_test`](Self::hit_test) with an explicit radius.
    #[must_use]
    pub fn hit_test_within(&self, x: f64, y: f64, tolerance: f64) -> Option<&EntityId> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let point = Coordinate { x, y };
        let mut best: Option<(&SpatialMarker, f64)> = None;
        for marker in &self.markers {
            let distance = marker.at.distance(point);
            if distance > tolerance {
                continue;
            }
            match best {
                Some((_, current)) if distance >= current => {}
                _ => best = Some((marker, distance)),
            }
        }
        let hit = best.map(|(marker, _)| &marker.id);
        trace!(
            target: span_names::SPATIAL,
            x,
            y,
            hit = ?hit,
            "hit test"
        );
        hit
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::{EntityKind, FieldValue};

    struct Pin {
        id: EntityId,
        at: Coordinate,
    }

    impl Entity for Pin {
        const KIND: EntityKind = EntityKind::Zone;
        const SEARCH_FIELDS: &'static [&'static str] = &["id"];

        fn id(&self) -> &EntityId {
            &self.id
        }

        fn field(&self, _name: &str) -> Option<FieldValue<'_>> {
            None
        }
    }

    impl Located for Pin {
        fn coordinate(&self) -> Coordinate {
            self.at
        }
    }

    fn pin(id: &str, x: f64, y: f64) -> Pin {
        Pin {
            id: EntityId::from(id),
            at: Coordinate::new(x, y).unwrap(),
        }
    }

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(Coordinate::new(0.0, 100.0).is_ok());
        let err = Coordinate::new(100.5, 10.0).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidCoordinate { axis: "x", .. }));
        let err = Coordinate::new(10.0, -0.1).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidCoordinate { axis: "y", .. }));
        assert!(Coordinate::new(f64::NAN, 1.0).is_err());
        assert!(Coordinate::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn coordinate_serde_validates() {
        let ok: Coordinate = serde_json::from_str("[20.0, 15.0]").unwrap();
        assert_eq!(ok, Coordinate::new(20.0, 15.0).unwrap());
        assert!(serde_json::from_str::<Coordinate>("[120.0, 15.0]").is_err());
    }

    #[test]
    fn hit_on_boundary_is_inclusive() {
        let index = SpatialIndex::build(&[pin("A", 50.0, 50.0)], 5.0);
        assert_eq!(index.hit_test(55.0, 50.0), Some(&EntityId::from("A")));
        assert_eq!(index.hit_test(55.1, 50.0), None);
    }

    #[test]
    fn nearest_marker_wins() {
        let index = SpatialIndex::build(&[pin("far", 10.0, 10.0), pin("near", 13.0, 10.0)], 5.0);
        assert_eq!(index.hit_test(12.0, 10.0), Some(&EntityId::from("near")));
    }

    #[test]
    fn equidistant_tie_goes_to_earlier_marker() {
        let index = SpatialIndex::build(&[pin("first", 10.0, 10.0), pin("second", 20.0, 10.0)], 5.0);
        assert_eq!(index.hit_test(15.0, 10.0), Some(&EntityId::from("first")));

        let reversed =
            SpatialIndex::build(&[pin("second", 20.0, 10.0), pin("first", 10.0, 10.0)], 5.0);
        assert_eq!(reversed.hit_test(15.0, 10.0), Some(&EntityId::from("second")));
    }

    #[test]
    fn empty_index_never_hits() {
        let index = SpatialIndex::build::<Pin>(&[], DEFAULT_HIT_TOLERANCE);
        assert!(index.markers().is_empty());
        assert_eq!(index.hit_test(50.0, 50.0), None);
    }

    #[test]
    fn marker_for_missing_id_is_not_found() {
        let index = SpatialIndex::build(&[pin("A-12", 20.0, 15.0)], 5.0);
        assert_eq!(
            index.marker_for::<Pin>(&EntityId::from("A-12")).unwrap(),
            Coordinate::new(20.0, 15.0).unwrap()
        );
        let err = index.marker_for::<Pin>(&EntityId::from("Z-1")).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { kind: EntityKind::Zone, .. }));
    }

    #[test]
    fn cell_projection_hits_corners() {
        let viewport = Viewport::new(2, 1, 101, 51);
        assert_eq!(Coordinate::new(0.0, 0.0).unwrap().to_cell(viewport), (2, 1));
        assert_eq!(Coordinate::new(100.0, 100.0).unwrap().to_cell(viewport), (102, 51));
        assert_eq!(Coordinate::new(50.0, 50.0).unwrap().to_cell(viewport), (52, 26));
    }

    #[test]
    fn from_cell_inverts_to_cell_within_half_a_cell() {
        let viewport = Viewport::new(0, 0, 41, 21);
        let original = Coordinate::new(45.0, 25.0).unwrap();
        let (col, row) = original.to_cell(viewport);
        let back = Coordinate::from_cell(col, row, viewport).unwrap();
        assert!((back.x() - original.x()).abs() <= 100.0 / 40.0 / 2.0 + 1e-9);
        assert!((back.y() - original.y()).abs() <= 100.0 / 20.0 / 2.0 + 1e-9);
    }

    #[test]
    fn from_cell_outside_viewport_is_none() {
        let viewport = Viewport::new(5, 5, 10, 10);
        assert!(Coordinate::from_cell(4, 6, viewport).is_none());
        assert!(Coordinate::from_cell(15, 6, viewport).is_none());
        assert!(Coordinate::from_cell(6, 15, viewport).is_none());
        assert!(Coordinate::from_cell(5, 5, viewport).is_some());
    }

    #[test]
    fn non_finite_point_hits_nothing() {
        let pins = [pin("A", 10.0, 10.0), pin("B", 90.0, 90.0)];
        let index = SpatialIndex::build(&pins, 5.0);
        assert_eq!(index.hit_test(f64::NAN, f64::NAN), None);
        assert_eq!(index.hit_test(f64::NAN, 10.0), None);
        assert_eq!(index.hit_test(f64::INFINITY, 90.0), None);
        assert_eq!(index.hit_test(10.0, 10.0), Some(&EntityId::from("A")));
    }

    #[test]
    fn explicit_radius_overrides_index_tolerance() {
        let pins = [pin("A", 10.0, 10.0)];
        let index = SpatialIndex::build(&pins, 5.0);
        assert_eq!(index.hit_test(20.0, 10.0), None);
        assert_eq!(
            index.hit_test_within(20.0, 10.0, 10.0),
            Some(&EntityId::from("A"))
        );
    }

    #[test]
    fn marker_at_cell_prefers_the_visible_marker() {
        let pins = [pin("A", 10.0, 10.0), pin("B", 12.0, 11.0), pin("C", 90.0, 90.0)];
        let index = SpatialIndex::build(&pins, 5.0);
        let viewport = Viewport::new(0, 0, 10, 4);
        let (col, row) = pins[0].at.to_cell(viewport);
        assert_eq!(pins[1].at.to_cell(viewport), (col, row));
        assert_eq!(
            index.marker_at_cell(col, row, viewport),
            Some(&EntityId::from("B"))
        );
        assert_eq!(index.marker_at_cell(5, 0, viewport), None);
    }

    #[test]
    fn cell_radius_grows_as_viewport_shrinks() {
        let roomy = Viewport::new(0, 0, 101, 101).cell_radius();
        let short = Viewport::new(0, 0, 40, 2).cell_radius();
        assert!(roomy < 1.0);
        assert!(short > 50.0);
        assert!((Viewport::new(0, 0, 1, 1).cell_radius() - 100.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn projected_cell_stays_in_viewport(
            x in 0.0..=100.0f64,
            y in 0.0..=100.0f64,
            left in 0u16..50,
            top in 0u16..50,
            width in 1u16..200,
            height in 1u16..80,
        ) {
            let viewport = Viewport::new(left, top, width, height);
            let (col, row) = Coordinate::new(x, y).unwrap().to_cell(viewport);
            prop_assert!(viewport.contains(col, row));
        }

        #[test]
        fn marker_position_always_hits_a_marker(
            points in proptest::collection::vec((0.0..=100.0f64, 0.0..=100.0f64), 1..12),
            pick in any::<prop::sample::Index>(),
        ) {
            let pins: Vec<Pin> = points
                .iter()
                .enumerate()
                .map(|(i, (x, y))| pin(&format!("Z-{i}"), *x, *y))
                .collect();
            let index = SpatialIndex::build(&pins, 0.0);
            let target = &pins[pick.index(pins.len())];
            prop_assert!(index.hit_test(target.at.x(), target.at.y()).is_some());
        }

        #[test]
        fn clicked_cell_maps_back_within_cell_radius(
            x in 0.0..=100.0f64,
            y in 0.0..=100.0f64,
            width in 1u16..120,
            height in 1u16..40,
        ) {
            let viewport = Viewport::new(2, 3, width, height);
            let original = Coordinate::new(x, y).unwrap();
            let (col, row) = original.to_cell(viewport);
            let back = Coordinate::from_cell(col, row, viewport).unwrap();
            prop_assert!(original.distance(back) <= viewport.cell_radius() + 1e-9);
        }
    }
}
