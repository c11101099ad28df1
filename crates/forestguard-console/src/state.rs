//! Typed stores loaded from a [`DataSource`] at startup.
//!
//! [`AppState`] is the hand-off point between the data source and the
//! screens: it owns one [`InMemoryStore`] per entity kind until the app
//! moves each store into the screen that renders it.

use forestguard_core::tracing_config::span_names;
use forestguard_core::{
    ActivityEntry, Alert, DashboardStats, Detection, DetectionSystem, EntityStore, Forest,
    InMemoryStore, Incident, RegistryResult, Staff, Zone,
};
use tracing::info;

use crate::data_source::DataSource;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub staff: InMemoryStore<Staff>,
    pub incidents: InMemoryStore<Incident>,
    pub zones: InMemoryStore<Zone>,
    pub forests: InMemoryStore<Forest>,
    pub detection_systems: InMemoryStore<DetectionSystem>,
    pub detections: InMemoryStore<Detection>,
    pub alerts: InMemoryStore<Alert>,
    pub activity: Vec<ActivityEntry>,
}

impl AppState {
    /// Pull every record set from `source`.
    ///
    /// # Errors
    ///
    /// Propagates data-source failures, and [`forestguard_core::RegistryError::DuplicateId`]
    /// when a record set repeats an id.
    pub fn load(source: &dyn DataSource) -> RegistryResult<Self> {
        let state = Self {
            staff: InMemoryStore::from_records(source.staff()?)?,
            incidents: InMemoryStore::from_records(source.incidents()?)?,
            zones: InMemoryStore::from_records(source.zones()?)?,
            forests: InMemoryStore::from_records(source.forests()?)?,
            detection_systems: InMemoryStore::from_records(source.detection_systems()?)?,
            detections: InMemoryStore::from_records(source.detections()?)?,
            alerts: InMemoryStore::from_records(source.alerts()?)?,
            activity: source.activity()?,
        };
        info!(
            target: span_names::CONSOLE,
            staff = state.staff.len(),
            incidents = state.incidents.len(),
            zones = state.zones.len(),
            forests = state.forests.len(),
            detection_systems = state.detection_systems.len(),
            detections = state.detections.len(),
            alerts = state.alerts.len(),
            "data source loaded"
        );
        Ok(state)
    }

    /// Headline numbers for the dashboard.
    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::compute(self.forests.list(), self.staff.list(), self.alerts.list())
    }
}

#[cfg(test)]
mod tests {
    use forestguard_core::{EntityId, RegistryError, StaffStatus};

    use super::*;
    use crate::data_source::MockDataSource;

    #[test]
    fn loads_sample() {
        let state = AppState::load(&MockDataSource::sample()).unwrap();
        assert_eq!(state.staff.len(), 5);
        assert_eq!(state.zones.len(), 5);
        assert!(state.zones.contains(&EntityId::from("C-15")));
        assert_eq!(state.activity.len(), 4);
    }

    #[test]
    fn dashboard_stats_from_sample() {
        let stats = AppState::load(&MockDataSource::sample())
            .unwrap()
            .dashboard_stats();
        assert_eq!(stats.total_forests, 3);
        assert_eq!(stats.active_staff, 4);
        assert_eq!(stats.monitoring_zones, 45 + 32 + 28);
        assert_eq!(stats.active_alerts, 1);
    }

    #[test]
    fn empty_source_gives_empty_state() {
        let state = AppState::load(&MockDataSource::empty()).unwrap();
        assert!(state.staff.is_empty());
        assert_eq!(state.dashboard_stats(), DashboardStats::default());
    }

    struct Doubled;

    impl DataSource for Doubled {
        fn staff(&self) -> RegistryResult<Vec<Staff>> {
            let mut staff = MockDataSource::sample().staff()?;
            let mut twin = staff[0].clone();
            twin.status = StaffStatus::OffDuty;
            staff.push(twin);
            Ok(staff)
        }

        fn incidents(&self) -> RegistryResult<Vec<Incident>> {
            Ok(Vec::new())
        }

        fn zones(&self) -> RegistryResult<Vec<Zone>> {
            Ok(Vec::new())
        }

        fn forests(&self) -> RegistryResult<Vec<Forest>> {
            Ok(Vec::new())
        }

        fn detection_systems(&self) -> RegistryResult<Vec<DetectionSystem>> {
            Ok(Vec::new())
        }

        fn detections(&self) -> RegistryResult<Vec<Detection>> {
            Ok(Vec::new())
        }

        fn alerts(&self) -> RegistryResult<Vec<Alert>> {
            Ok(Vec::new())
        }

        fn activity(&self) -> RegistryResult<Vec<ActivityEntry>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn duplicate_ids_fail_the_load() {
        let err = AppState::load(&Doubled).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { .. }));
    }
}
