//! Forest management console.
//!
//! Builds on [`forestguard_tui`] and [`forestguard_core`] to provide the six
//! console tabs: dashboard, staff roster, zone map, forest registry, fire
//! detection and incident history.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │  forestguard-console (this crate)               │
//! │  ├─ app: ConsoleApp, palette actions, overlays  │
//! │  ├─ data_source: DataSource trait + mock data   │
//! │  ├─ state: typed stores loaded at startup       │
//! │  ├─ screens: one Screen per tab                 │
//! │  └─ tracing_setup: subscriber for the binary    │
//! ├─────────────────────────────────────────────────┤
//! │  forestguard-tui                                │
//! │  Screen, ScreenRegistry, AppShell, Keymap, ...  │
//! ├─────────────────────────────────────────────────┤
//! │  forestguard-core                               │
//! │  stores, filter, selection, spatial, views      │
//! └─────────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]

pub mod app;
pub mod data_source;
pub mod overlays;
pub mod screens;
pub mod state;
pub mod tracing_setup;

// ─── Re-exports ─────────────────────────────────────────────────────────────

pub use app::ConsoleApp;
pub use data_source::{DataSource, MockDataSource};
pub use overlays::{render_overlay, render_palette_overlay};
pub use screens::{
    DashboardScreen, DetectionScreen, ForestRegistryScreen, IncidentHistoryScreen, StaffScreen,
    ZoneMapScreen,
};
pub use state::AppState;
pub use tracing_setup::{Verbosity, init_subscriber, set_terminal_owned};
