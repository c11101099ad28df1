//! Data source trait and the bundled mock.
//!
//! Screens never read a [`DataSource`] directly. [`crate::state::AppState`]
//! pulls every record once at startup and hands typed stores to the screens.

use forestguard_core::{
    ActivityEntry, Alert, AlertStatus, Coordinate, Detection, DetectionStatus, DetectionSystem,
    EntityId, Forest, Incident, IncidentStatus, RegistryResult, RiskLevel, Severity, Staff,
    StaffStatus, SystemStatus, Zone,
};

// ─── Data Source Trait ──────────────────────────────────────────────────────

/// Backend feeding the console.
///
/// Each call returns the full record set for one entity kind.
pub trait DataSource: Send {
    fn staff(&self) -> RegistryResult<Vec<Staff>>;

    fn incidents(&self) -> RegistryResult<Vec<Incident>>;

    fn zones(&self) -> RegistryResult<Vec<Zone>>;

    fn forests(&self) -> RegistryResult<Vec<Forest>>;

    fn detection_systems(&self) -> RegistryResult<Vec<DetectionSystem>>;

    fn detections(&self) -> RegistryResult<Vec<Detection>>;

    fn alerts(&self) -> RegistryResult<Vec<Alert>>;

    /// Dashboard activity feed, newest first.
    fn activity(&self) -> RegistryResult<Vec<ActivityEntry>>;
}

// ─── Mock Data Source ───────────────────────────────────────────────────────

/// Raw zone row; coordinates are validated when the zone is built.
#[derive(Debug, Clone)]
struct ZoneSeed {
    id: &'static str,
    name: &'static str,
    risk: RiskLevel,
    temperature: i32,
    humidity: u8,
    wind_speed: u32,
    x: f64,
    y: f64,
    staff: u32,
    last_inspection: &'static str,
}

/// In-memory records for development, demos and tests.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    staff: Vec<Staff>,
    incidents: Vec<Incident>,
    zones: Vec<ZoneSeed>,
    forests: Vec<Forest>,
    systems: Vec<DetectionSystem>,
    detections: Vec<Detection>,
    alerts: Vec<Alert>,
    activity: Vec<ActivityEntry>,
}

impl MockDataSource {
    /// No records at all; every screen shows its empty state.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The sample forest district.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            staff: sample_staff(),
            incidents: sample_incidents(),
            zones: sample_zones(),
            forests: sample_forests(),
            systems: sample_systems(),
            detections: sample_detections(),
            alerts: sample_alerts(),
            activity: sample_activity(),
        }
    }
}

impl DataSource for MockDataSource {
    fn staff(&self) -> RegistryResult<Vec<Staff>> {
        Ok(self.staff.clone())
    }

    fn incidents(&self) -> RegistryResult<Vec<Incident>> {
        Ok(self.incidents.clone())
    }

    fn zones(&self) -> RegistryResult<Vec<Zone>> {
        self.zones
            .iter()
            .map(|seed| {
                Ok(Zone {
                    id: EntityId::from(seed.id),
                    name: seed.name.into(),
                    risk: seed.risk,
                    temperature: seed.temperature,
                    humidity: seed.humidity,
                    wind_speed: seed.wind_speed,
                    coordinates: Coordinate::new(seed.x, seed.y)?,
                    staff: seed.staff,
                    last_inspection: seed.last_inspection.into(),
                })
            })
            .collect()
    }

    fn forests(&self) -> RegistryResult<Vec<Forest>> {
        Ok(self.forests.clone())
    }

    fn detection_systems(&self) -> RegistryResult<Vec<DetectionSystem>> {
        Ok(self.systems.clone())
    }

    fn detections(&self) -> RegistryResult<Vec<Detection>> {
        Ok(self.detections.clone())
    }

    fn alerts(&self) -> RegistryResult<Vec<Alert>> {
        Ok(self.alerts.clone())
    }

    fn activity(&self) -> RegistryResult<Vec<ActivityEntry>> {
        Ok(self.activity.clone())
    }
}

// ─── Sample Records ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn staff(
    id: u64,
    name: &str,
    role: &str,
    forest: &str,
    zone: &str,
    phone: &str,
    status: StaffStatus,
    experience_years: u32,
    specialization: &str,
) -> Staff {
    let email = format!("{}@forestguard.com", name.to_lowercase().replace(' ', "."));
    Staff {
        id: EntityId::Num(id),
        name: name.into(),
        role: role.into(),
        forest: forest.into(),
        zone: zone.into(),
        phone: phone.into(),
        email,
        status,
        experience_years,
        specialization: specialization.into(),
    }
}

#[rustfmt::skip]
fn sample_staff() -> Vec<Staff> {
    vec![
        staff(1, "John Rodriguez", "Forest Supervisor", "Pine Valley National Forest", "Zone A-12", "+1 (555) 123-4567", StaffStatus::Active, 8, "Fire Prevention"),
        staff(2, "Sarah Chen", "Fire Detection Specialist", "Cedar Mountain Reserve", "Zone B-8", "+1 (555) 234-5678", StaffStatus::Active, 5, "AI Detection Systems"),
        staff(3, "Mike Thompson", "Forest Ranger", "Oak Ridge Forest", "Zone C-15", "+1 (555) 345-6789", StaffStatus::OnDuty, 12, "Wildlife Management"),
        staff(4, "Emma Wilson", "Environmental Analyst", "Maple Creek Preserve", "Zone D-7", "+1 (555) 456-7890", StaffStatus::Active, 3, "Data Analysis"),
        staff(5, "David Garcia", "Senior Ranger", "Pine Valley National Forest", "Zone A-5", "+1 (555) 567-8901", StaffStatus::OffDuty, 15, "Emergency Response"),
    ]
}

fn sample_incidents() -> Vec<Incident> {
    let incident = |id: u64,
                    (date, time): (&str, &str),
                    title: &str,
                    location: &str,
                    severity: Severity,
                    cause: &str,
                    (area, duration): (&str, &str),
                    staff_deployed: u32,
                    status: IncidentStatus,
                    damages: &str,
                    response_time: Option<u32>,
                    description: &str| Incident {
        id: EntityId::Num(id),
        date: date.into(),
        time: time.into(),
        title: title.into(),
        location: location.into(),
        severity,
        cause: cause.into(),
        area: area.into(),
        duration: duration.into(),
        staff_deployed,
        status,
        damages: damages.into(),
        response_time,
        description: description.into(),
    };

    vec![
        incident(
            1,
            ("2024-03-10", "14:23"),
            "Oak Ridge Valley Fire",
            "Oak Ridge Forest - Zone C-15",
            Severity::High,
            "Lightning Strike",
            ("45 hectares", "8 hours"),
            24,
            IncidentStatus::Resolved,
            "Moderate tree damage, no structures affected",
            Some(12),
            "Lightning-induced fire during thunderstorm. Quick response prevented major spread.",
        ),
        incident(
            2,
            ("2024-02-28", "09:15"),
            "Pine Valley Controlled Burn",
            "Pine Valley National Forest - Zone A-8",
            Severity::Low,
            "Controlled Burn",
            ("120 hectares", "6 hours"),
            12,
            IncidentStatus::Completed,
            "Planned forest management activity",
            None,
            "Scheduled controlled burn for forest health management and fire prevention.",
        ),
        incident(
            3,
            ("2024-02-15", "16:45"),
            "Cedar Mountain Campfire Incident",
            "Cedar Mountain Reserve - Zone B-12",
            Severity::Medium,
            "Unattended Campfire",
            ("8 hectares", "3 hours"),
            8,
            IncidentStatus::Resolved,
            "Minor undergrowth damage",
            Some(18),
            "Unattended campfire spread to surrounding vegetation. Contained quickly by ground crew.",
        ),
        incident(
            4,
            ("2024-01-22", "11:30"),
            "Maple Creek Brush Fire",
            "Maple Creek Preserve - Zone D-5",
            Severity::Low,
            "Electrical Equipment",
            ("2 hectares", "1.5 hours"),
            6,
            IncidentStatus::Resolved,
            "Minimal brush loss",
            Some(8),
            "Small fire caused by faulty electrical equipment. Rapid containment prevented spread.",
        ),
        incident(
            5,
            ("2023-09-18", "13:20"),
            "Pine Valley Major Fire",
            "Pine Valley National Forest - Zone A-15",
            Severity::Critical,
            "Arson",
            ("280 hectares", "72 hours"),
            45,
            IncidentStatus::Resolved,
            "Significant forest loss, 1 structure damaged",
            Some(15),
            "Major fire incident requiring multi-day response. Investigation confirmed arson as cause.",
        ),
    ]
}

#[rustfmt::skip]
fn sample_zones() -> Vec<ZoneSeed> {
    let seed = |id, name, risk, temperature, humidity, wind_speed, (x, y), staff, last_inspection| {
        ZoneSeed {
            id,
            name,
            risk,
            temperature,
            humidity,
            wind_speed,
            x,
            y,
            staff,
            last_inspection,
        }
    };
    vec![
        seed("A-12", "Pine Valley North", RiskLevel::High, 28, 35, 15, (20.0, 15.0), 3, "2 hours ago"),
        seed("B-8", "Cedar Mountain East", RiskLevel::Medium, 24, 45, 8, (45.0, 25.0), 2, "4 hours ago"),
        seed("C-15", "Oak Ridge Valley", RiskLevel::Low, 22, 60, 5, (70.0, 40.0), 2, "1 day ago"),
        seed("D-7", "Maple Creek Basin", RiskLevel::Low, 20, 65, 3, (30.0, 60.0), 1, "6 hours ago"),
        seed("E-22", "Birch Hill Ridge", RiskLevel::Medium, 26, 40, 12, (60.0, 70.0), 2, "3 hours ago"),
    ]
}

#[rustfmt::skip]
fn sample_forests() -> Vec<Forest> {
    let forest = |id: u64,
                  name: &str,
                  location: &str,
                  area_hectares: u32,
                  forest_type: &str,
                  established: u16,
                  (zones, staff): (u32, u32),
                  dominant_species: &str,
                  risk: RiskLevel,
                  last_survey: &str| Forest {
        id: EntityId::Num(id),
        name: name.into(),
        location: location.into(),
        area_hectares,
        forest_type: forest_type.into(),
        established,
        zones,
        staff,
        dominant_species: dominant_species.into(),
        risk,
        last_survey: last_survey.into(),
    };
    vec![
        forest(1, "Pine Valley National Forest", "Northern Region", 15_420, "Coniferous", 1985, (45, 12), "Pinus sylvestris", RiskLevel::Medium, "2024-01-15"),
        forest(2, "Cedar Mountain Reserve", "Eastern Highlands", 8_750, "Mixed", 1992, (32, 8), "Cedrus atlantica", RiskLevel::Low, "2024-02-20"),
        forest(3, "Oak Ridge Forest", "Central Valley", 12_300, "Deciduous", 1978, (28, 10), "Quercus robur", RiskLevel::High, "2024-01-08"),
    ]
}

#[rustfmt::skip]
fn sample_systems() -> Vec<DetectionSystem> {
    let system = |id: u64,
                  name: &str,
                  system_type: &str,
                  location: &str,
                  status: SystemStatus,
                  confidence: u8,
                  last_scan: &str,
                  alerts: u32| DetectionSystem {
        id: EntityId::Num(id),
        name: name.into(),
        system_type: system_type.into(),
        location: location.into(),
        status,
        confidence,
        last_scan: last_scan.into(),
        alerts,
    };
    vec![
        system(1, "AI Vision System Alpha", "Camera Network", "Pine Valley - Zone A-12", SystemStatus::Online, 95, "30 seconds ago", 2),
        system(2, "Thermal Detector Beta", "Thermal Imaging", "Cedar Mountain - Zone B-8", SystemStatus::Online, 88, "1 minute ago", 0),
        system(3, "Satellite Monitor Gamma", "Satellite Analysis", "Oak Ridge - Zone C-15", SystemStatus::Maintenance, 0, "2 hours ago", 1),
    ]
}

#[rustfmt::skip]
fn sample_detections() -> Vec<Detection> {
    let detection = |id: u64,
                     timestamp: &str,
                     location: &str,
                     confidence: u8,
                     detection_type: &str,
                     status: DetectionStatus,
                     temperature: i32,
                     wind_speed: u32| Detection {
        id: EntityId::Num(id),
        timestamp: timestamp.into(),
        location: location.into(),
        confidence,
        detection_type: detection_type.into(),
        status,
        temperature,
        wind_speed,
    };
    vec![
        detection(1, "2024-03-15 14:32:15", "Pine Valley - Zone A-12", 92, "Visual Detection", DetectionStatus::Investigating, 45, 12),
        detection(2, "2024-03-15 13:18:42", "Cedar Mountain - Zone B-8", 78, "Thermal Anomaly", DetectionStatus::FalsePositive, 38, 8),
        detection(3, "2024-03-15 11:45:30", "Oak Ridge - Zone C-15", 85, "Smoke Detection", DetectionStatus::Confirmed, 52, 15),
    ]
}

#[rustfmt::skip]
fn sample_alerts() -> Vec<Alert> {
    let alert = |id: u64, forest: &str, zone: &str, alert_type: &str, time: &str, status| Alert {
        id: EntityId::Num(id),
        forest: forest.into(),
        zone: zone.into(),
        alert_type: alert_type.into(),
        time: time.into(),
        status,
    };
    vec![
        alert(1, "Pine Valley National Forest", "Zone A-12", "High Risk", "2 hours ago", AlertStatus::Active),
        alert(2, "Cedar Mountain Reserve", "Zone B-8", "Medium Risk", "4 hours ago", AlertStatus::Monitoring),
        alert(3, "Oak Ridge Forest", "Zone C-15", "Fire Detected", "1 day ago", AlertStatus::Resolved),
    ]
}

fn sample_activity() -> Vec<ActivityEntry> {
    [
        ("New staff member assigned to Pine Valley", "30 minutes ago"),
        ("Zone B-8 risk level updated to Medium", "1 hour ago"),
        ("Weekly forest inspection completed", "2 hours ago"),
        ("Fire incident resolved in Oak Ridge", "1 day ago"),
    ]
    .into_iter()
    .map(|(message, time)| ActivityEntry {
        message: message.into(),
        time: time.into(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use forestguard_core::Entity;

    use super::*;

    #[test]
    fn sample_has_every_kind() {
        let source = MockDataSource::sample();
        assert_eq!(source.staff().unwrap().len(), 5);
        assert_eq!(source.incidents().unwrap().len(), 5);
        assert_eq!(source.zones().unwrap().len(), 5);
        assert_eq!(source.forests().unwrap().len(), 3);
        assert_eq!(source.detection_systems().unwrap().len(), 3);
        assert_eq!(source.detections().unwrap().len(), 3);
        assert_eq!(source.alerts().unwrap().len(), 3);
        assert_eq!(source.activity().unwrap().len(), 4);
    }

    #[test]
    fn empty_has_nothing() {
        let source = MockDataSource::empty();
        assert!(source.staff().unwrap().is_empty());
        assert!(source.zones().unwrap().is_empty());
        assert!(source.activity().unwrap().is_empty());
    }

    #[test]
    fn staff_emails_follow_names() {
        let staff = MockDataSource::sample().staff().unwrap();
        assert_eq!(staff[1].email, "sarah.chen@forestguard.com");
        assert_eq!(staff[4].status, StaffStatus::OffDuty);
    }

    #[test]
    fn zone_coordinates_survive_validation() {
        let zones = MockDataSource::sample().zones().unwrap();
        let a12 = zones.iter().find(|z| z.id() == &EntityId::from("A-12")).unwrap();
        assert!((a12.coordinates.x() - 20.0).abs() < f64::EPSILON);
        assert!((a12.coordinates.y() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn controlled_burn_has_no_response_time() {
        let incidents = MockDataSource::sample().incidents().unwrap();
        assert_eq!(incidents[1].response_time, None);
        assert_eq!(incidents[4].year(), Some(2023));
    }
}
