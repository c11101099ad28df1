//! Domain records shown by the console.
//!
//! Each record implements [`Entity`] so the store, filter and selection layers
//! can treat them uniformly. Field names passed to [`Entity::field`] match the
//! struct field names.

use serde::{Deserialize, Serialize};

use crate::category::{
    AlertStatus, DetectionStatus, IncidentStatus, RiskLevel, Severity, StaffStatus, SystemStatus,
};
use crate::spatial::{Coordinate, Located};
use crate::types::{Entity, EntityId, EntityKind, FieldValue};

// ─── Staff ──────────────────────────────────────────────────────────────────

/// A ranger, analyst or supervisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: EntityId,
    pub name: String,
    pub role: String,
    pub forest: String,
    pub zone: String,
    pub phone: String,
    pub email: String,
    pub status: StaffStatus,
    /// Years of service.
    pub experience_years: u32,
    pub specialization: String,
}

impl Entity for Staff {
    const KIND: EntityKind = EntityKind::Staff;
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "role", "forest"];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "name" => FieldValue::Text(&self.name),
            "role" => FieldValue::Text(&self.role),
            "forest" => FieldValue::Text(&self.forest),
            "zone" => FieldValue::Text(&self.zone),
            "phone" => FieldValue::Text(&self.phone),
            "email" => FieldValue::Text(&self.email),
            "status" => FieldValue::Category(self.status.label()),
            "experience_years" => FieldValue::Integer(i64::from(self.experience_years)),
            "specialization" => FieldValue::Text(&self.specialization),
            _ => return None,
        };
        Some(value)
    }
}

// ─── Incident ───────────────────────────────────────────────────────────────

/// A historical fire incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: EntityId,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    pub title: String,
    pub location: String,
    pub severity: Severity,
    pub cause: String,
    pub area: String,
    pub duration: String,
    pub staff_deployed: u32,
    pub status: IncidentStatus,
    pub damages: String,
    /// Minutes until first response, when known.
    pub response_time: Option<u32>,
    pub description: String,
}

impl Incident {
    /// Calendar year parsed from the leading `YYYY` of [`date`](Self::date).
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date.get(..4).and_then(|year| year.parse().ok())
    }

    /// Response time as shown to users (`"12 min"` or `"N/A"`).
    #[must_use]
    pub fn response_time_label(&self) -> String {
        self.response_time
            .map_or_else(|| "N/A".to_owned(), |minutes| format!("{minutes} min"))
    }
}

impl Entity for Incident {
    const KIND: EntityKind = EntityKind::Incident;
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "location", "cause"];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "date" => FieldValue::Text(&self.date),
            "time" => FieldValue::Text(&self.time),
            "title" => FieldValue::Text(&self.title),
            "location" => FieldValue::Text(&self.location),
            "severity" => FieldValue::Category(self.severity.label()),
            "cause" => FieldValue::Text(&self.cause),
            "area" => FieldValue::Text(&self.area),
            "duration" => FieldValue::Text(&self.duration),
            "staff_deployed" => FieldValue::Integer(i64::from(self.staff_deployed)),
            "status" => FieldValue::Category(self.status.label()),
            "damages" => FieldValue::Text(&self.damages),
            "response_time" => FieldValue::Integer(i64::from(self.response_time?)),
            "description" => FieldValue::Text(&self.description),
            _ => return None,
        };
        Some(value)
    }
}

// ─── Zone ───────────────────────────────────────────────────────────────────

/// A monitored zone with live conditions and a map position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone code such as `A-12`.
    pub id: EntityId,
    pub name: String,
    pub risk: RiskLevel,
    /// Degrees Celsius.
    pub temperature: i32,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// km/h.
    pub wind_speed: u32,
    pub coordinates: Coordinate,
    /// Staff assigned to the zone.
    pub staff: u32,
    pub last_inspection: String,
}

impl Entity for Zone {
    const KIND: EntityKind = EntityKind::Zone;
    const SEARCH_FIELDS: &'static [&'static str] = &["id", "name"];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "id" => match &self.id {
                EntityId::Key(key) => FieldValue::Text(key),
                EntityId::Num(n) => FieldValue::Integer(i64::try_from(*n).ok()?),
            },
            "name" => FieldValue::Text(&self.name),
            "risk" => FieldValue::Category(self.risk.label()),
            "temperature" => FieldValue::Integer(i64::from(self.temperature)),
            "humidity" => FieldValue::Integer(i64::from(self.humidity)),
            "wind_speed" => FieldValue::Integer(i64::from(self.wind_speed)),
            "staff" => FieldValue::Integer(i64::from(self.staff)),
            "last_inspection" => FieldValue::Text(&self.last_inspection),
            _ => return None,
        };
        Some(value)
    }
}

impl Located for Zone {
    fn coordinate(&self) -> Coordinate {
        self.coordinates
    }
}

// ─── Forest ─────────────────────────────────────────────────────────────────

/// A managed forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    pub id: EntityId,
    pub name: String,
    pub location: String,
    pub area_hectares: u32,
    pub forest_type: String,
    pub established: u16,
    /// Number of monitoring zones.
    pub zones: u32,
    pub staff: u32,
    pub dominant_species: String,
    pub risk: RiskLevel,
    pub last_survey: String,
}

impl Forest {
    /// Area with thousands separators, e.g. `15,420 hectares`.
    #[must_use]
    pub fn area_label(&self) -> String {
        let digits = self.area_hectares.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{grouped} hectares")
    }
}

impl Entity for Forest {
    const KIND: EntityKind = EntityKind::Forest;
    const SEARCH_FIELDS: &'static [&'static str] =
        &["name", "location", "forest_type", "dominant_species"];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "name" => FieldValue::Text(&self.name),
            "location" => FieldValue::Text(&self.location),
            "area_hectares" => FieldValue::Integer(i64::from(self.area_hectares)),
            "forest_type" => FieldValue::Text(&self.forest_type),
            "established" => FieldValue::Integer(i64::from(self.established)),
            "zones" => FieldValue::Integer(i64::from(self.zones)),
            "staff" => FieldValue::Integer(i64::from(self.staff)),
            "dominant_species" => FieldValue::Text(&self.dominant_species),
            "risk" => FieldValue::Category(self.risk.label()),
            "last_survey" => FieldValue::Text(&self.last_survey),
            _ => return None,
        };
        Some(value)
    }
}

// ─── Detection ──────────────────────────────────────────────────────────────

/// A camera, thermal or satellite detection system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSystem {
    pub id: EntityId,
    pub name: String,
    pub system_type: String,
    pub location: String,
    pub status: SystemStatus,
    /// Model confidence, percent.
    pub confidence: u8,
    pub last_scan: String,
    /// Open alerts raised by this system.
    pub alerts: u32,
}

impl Entity for DetectionSystem {
    const KIND: EntityKind = EntityKind::DetectionSystem;
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "system_type", "location"];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "name" => FieldValue::Text(&self.name),
            "system_type" => FieldValue::Text(&self.system_type),
            "location" => FieldValue::Text(&self.location),
            "status" => FieldValue::Category(self.status.label()),
            "confidence" => FieldValue::Integer(i64::from(self.confidence)),
            "last_scan" => FieldValue::Text(&self.last_scan),
            "alerts" => FieldValue::Integer(i64::from(self.alerts)),
            _ => return None,
        };
        Some(value)
    }
}

/// A single fire detection event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: EntityId,
    pub timestamp: String,
    pub location: String,
    pub confidence: u8,
    pub detection_type: String,
    pub status: DetectionStatus,
    /// Degrees Celsius at the site.
    pub temperature: i32,
    /// km/h.
    pub wind_speed: u32,
}

impl Entity for Detection {
    const KIND: EntityKind = EntityKind::Detection;
    const SEARCH_FIELDS: &'static [&'static str] = &["location", "detection_type"];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "timestamp" => FieldValue::Text(&self.timestamp),
            "location" => FieldValue::Text(&self.location),
            "confidence" => FieldValue::Integer(i64::from(self.confidence)),
            "detection_type" => FieldValue::Text(&self.detection_type),
            "status" => FieldValue::Category(self.status.label()),
            "temperature" => FieldValue::Integer(i64::from(self.temperature)),
            "wind_speed" => FieldValue::Integer(i64::from(self.wind_speed)),
            _ => return None,
        };
        Some(value)
    }
}

// ─── Dashboard ──────────────────────────────────────────────────────────────

/// A risk alert shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: EntityId,
    pub forest: String,
    pub zone: String,
    pub alert_type: String,
    pub time: String,
    pub status: AlertStatus,
}

impl Entity for Alert {
    const KIND: EntityKind = EntityKind::Alert;
    const SEARCH_FIELDS: &'static [&'static str] = &["forest", "zone", "alert_type"];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "forest" => FieldValue::Text(&self.forest),
            "zone" => FieldValue::Text(&self.zone),
            "alert_type" => FieldValue::Text(&self.alert_type),
            "time" => FieldValue::Text(&self.time),
            "status" => FieldValue::Category(self.status.label()),
            _ => return None,
        };
        Some(value)
    }
}

/// One line of the dashboard activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub message: String,
    pub time: String,
}
