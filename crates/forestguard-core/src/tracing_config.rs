//! Tracing conventions shared by the forestguard crates.
//!
//! Every event is emitted under a target beginning with [`TARGET_PREFIX`], so
//! the whole console can be filtered with:
//!
//! ```text
//! FORESTGUARD_LOG=forestguard=debug
//! ```
//!
//! Subscriber installation lives in the binary; this module only fixes names.

use tracing::Level;

/// Target prefix used by all forestguard events.
pub const TARGET_PREFIX: &str = "forestguard";

/// Event targets, one per component.
pub mod span_names {
    /// Entity store loads and mutations.
    pub const STORE: &str = "forestguard::store";
    /// Selection transitions.
    pub const SELECTION: &str = "forestguard::selection";
    /// Marker hit-tests.
    pub const SPATIAL: &str = "forestguard::spatial";
    /// View composition.
    pub const VIEW: &str = "forestguard::view";
    /// Configuration loading.
    pub const CONFIG: &str = "forestguard::config";
    /// Screen navigation and input routing.
    pub const SHELL: &str = "forestguard::shell";
    /// Binary lifecycle.
    pub const CONSOLE: &str = "forestguard::console";
}

/// Parse a log level (case-insensitive, no surrounding whitespace).
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// `FORESTGUARD_LOG_LEVEL` if set and valid, else `default`.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    level_from_var("FORESTGUARD_LOG_LEVEL", default)
}

fn level_from_var(key: &str, default: Level) -> Level {
    std::env::var(key)
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(default)
}
