use crate::types::{EntityId, EntityKind};

/// Unified error type covering every failure mode of the forestguard registry.
///
/// None of these are fatal to the console. `NotFound` is recovered by the view
/// layer, which renders an empty detail pane instead. `InvalidQuery` rejects a
/// keystroke. Only `InvalidConfig` and `Io` can stop the binary from starting.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Lookup by id found no entity (or no marker) in the store.
    #[error("{kind} {id} not found. It may have been removed; clear the selection and retry.")]
    NotFound {
        /// Which registry was searched.
        kind: EntityKind,
        /// The id that was looked up.
        id: EntityId,
    },

    /// An insert would break id uniqueness (live or retired id).
    #[error("{kind} id {id} is already in use or was retired. Request a fresh id from the store.")]
    DuplicateId {
        /// Which registry rejected the record.
        kind: EntityKind,
        /// The conflicting id.
        id: EntityId,
    },

    /// A filter query exceeds the configured length limit.
    #[error("Query of {len} characters exceeds the limit of {max}. Shorten the search text.")]
    InvalidQuery {
        /// Length of the rejected query, in characters.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A marker coordinate lies outside the normalized `[0, 100]` plane.
    #[error("Coordinate {axis} = {value} is outside [0, 100].")]
    InvalidCoordinate {
        /// Which axis (`x` or `y`).
        axis: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A configuration value is invalid.
    #[error("Invalid config: {field} = \"{value}\": {reason}")]
    InvalidConfig {
        /// Which config field.
        field: String,
        /// The invalid value.
        value: String,
        /// Why it is invalid.
        reason: String,
    },

    /// Wraps `std::io::Error` for config file access.
    #[error("I/O error: {0}. Check the config path and file permissions.")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the forestguard crates.
pub type RegistryResult<T> = Result<T, RegistryError>;

impl RegistryError {
    /// Whether the view layer should absorb this error as an empty state.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidQuery { .. })
    }
}
