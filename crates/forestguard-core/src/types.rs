//! Entity identity and field model shared by every registry.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Entity Id ──────────────────────────────────────────────────────────────

/// Opaque, stable identifier of a domain record.
///
/// Staff, incidents and forests use numeric ids; zones use string keys
/// such as `A-12`. The two spaces never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Numeric id assigned by the data source.
    Num(u64),
    /// String key (zone codes).
    Key(String),
}

impl EntityId {
    /// Numeric value, if this is a numeric id.
    #[must_use]
    pub const fn as_num(&self) -> Option<u64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Key(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Key(value.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::Key(value)
    }
}

// ─── Entity Kind ────────────────────────────────────────────────────────────

/// The registries the console knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Staff,
    Incident,
    Zone,
    Forest,
    DetectionSystem,
    Detection,
    Alert,
}

impl EntityKind {
    /// Lowercase label used in messages and log fields.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Incident => "incident",
            Self::Zone => "zone",
            Self::Forest => "forest",
            Self::DetectionSystem => "detection system",
            Self::Detection => "detection",
            Self::Alert => "alert",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Field Value ────────────────────────────────────────────────────────────

/// A displayable field value.
///
/// The [`Display`](fmt::Display) form is what the filter engine matches
/// against, so it must be exactly what a user sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Free text.
    Text(&'a str),
    /// Whole number.
    Integer(i64),
    /// Fractional number.
    Number(f64),
    /// Label of a closed enumeration.
    Category(&'static str),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Category(label) => f.write_str(label),
        }
    }
}

// ─── Entity Trait ───────────────────────────────────────────────────────────

/// A domain record held in an entity store.
pub trait Entity {
    /// Which registry the record belongs to.
    const KIND: EntityKind;

    /// Fields searched by default when a view filters this kind.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Stable unique id.
    fn id(&self) -> &EntityId;

    /// Look up a field by name. Unknown names return `None`.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_key_ids_never_collide() {
        assert_ne!(EntityId::Num(12), EntityId::from("12"));
    }

    #[test]
    fn id_display() {
        assert_eq!(EntityId::Num(7).to_string(), "7");
        assert_eq!(EntityId::from("B-8").to_string(), "B-8");
    }

    #[test]
    fn id_serde_is_untagged() {
        let json = serde_json::to_string(&EntityId::from("C-15")).unwrap();
        assert_eq!(json, "\"C-15\"");
        let decoded: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(decoded, EntityId::Num(42));
    }

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::Text("Sarah Chen").to_string(), "Sarah Chen");
        assert_eq!(FieldValue::Integer(24).to_string(), "24");
        assert_eq!(FieldValue::Category("on-duty").to_string(), "on-duty");
    }

    #[test]
    fn kind_labels_are_lowercase() {
        for kind in [
            EntityKind::Staff,
            EntityKind::Incident,
            EntityKind::Zone,
            EntityKind::Forest,
            EntityKind::DetectionSystem,
            EntityKind::Detection,
            EntityKind::Alert,
        ] {
            assert_eq!(kind.label(), kind.label().to_lowercase());
        }
    }
}
