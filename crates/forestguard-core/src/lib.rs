//! Core model for the forestguard console.
//!
//! This crate holds everything that does not touch a terminal: the entity
//! records, per-kind entity stores, the substring filter engine, selection
//! state, the spatial index behind the zone map, view composition, the
//! category → style table, derived statistics, configuration, and the error
//! type shared by every forestguard crate.
//!
//! ```text
//!  DataSource ──► InMemoryStore<E> ──► filter() ──┐
//!                        │                        ├──► RegistryView / MapView
//!                        ├──► SelectionState ─────┤
//!                        └──► SpatialIndex ───────┘
//! ```

pub mod category;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod selection;
pub mod spatial;
pub mod stats;
pub mod store;
pub mod tracing_config;
pub mod types;
pub mod view;

pub use category::{
    AlertStatus, Category, DetectionStatus, IncidentStatus, RiskLevel, Severity, StaffStatus,
    StyleToken, SystemStatus,
};
pub use config::{
    ConfigLoadResult, ConsoleConfig, ThemeName, default_config_file_path, emit_config_loaded,
    load_from_sources, load_from_str,
};
pub use domain::{ActivityEntry, Alert, Detection, DetectionSystem, Forest, Incident, Staff, Zone};
pub use error::{RegistryError, RegistryResult};
pub use filter::{DEFAULT_MAX_QUERY_LEN, FilterQuery, Filtered, filter, matches};
pub use selection::SelectionState;
pub use spatial::{
    Coordinate, DEFAULT_HIT_TOLERANCE, Located, SpatialIndex, SpatialMarker, Viewport,
};
pub use stats::{
    DashboardStats, DetectionStats, IncidentStats, RiskSummary, StaffStats, YearFilter,
};
pub use store::{EntityStore, InMemoryStore};
pub use types::{Entity, EntityId, EntityKind, FieldValue};
pub use view::{DetailPane, MapState, MapView, MarkerView, RegistryState, RegistryView};
