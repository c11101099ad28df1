//! Aggregates derived from the stores for headline cards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::{AlertStatus, IncidentStatus, RiskLevel, StaffStatus, SystemStatus};
use crate::domain::{Alert, DetectionSystem, Forest, Incident, Staff, Zone};

// ─── Year Filter ────────────────────────────────────────────────────────────

/// Incident-history year selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearFilter {
    Year(i32),
    All,
}

impl YearFilter {
    /// Whether an incident falls in the selected year.
    #[must_use]
    pub fn admits(self, incident: &Incident) -> bool {
        match self {
            Self::All => true,
            Self::Year(year) => incident.year() == Some(year),
        }
    }

    /// `reporting → reporting - 1 → All → reporting`.
    #[must_use]
    pub const fn cycle(self, reporting_year: i32) -> Self {
        match self {
            Self::Year(year) if year == reporting_year => Self::Year(reporting_year - 1),
            Self::Year(_) => Self::All,
            Self::All => Self::Year(reporting_year),
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::All => f.write_str("All Years"),
        }
    }
}

// ─── Risk / Staff ───────────────────────────────────────────────────────────

/// Zone count per risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskSummary {
    #[must_use]
    pub fn from_zones(zones: &[Zone]) -> Self {
        let mut summary = Self::default();
        for zone in zones {
            match zone.risk {
                RiskLevel::High => summary.high += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::Low => summary.low += 1,
            }
        }
        summary
    }

    #[must_use]
    pub const fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
        }
    }
}

/// Staff count per duty status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffStats {
    pub total: usize,
    pub active: usize,
    pub on_duty: usize,
    pub off_duty: usize,
}

impl StaffStats {
    #[must_use]
    pub fn from_staff(staff: &[Staff]) -> Self {
        let mut stats = Self {
            total: staff.len(),
            ..Self::default()
        };
        for member in staff {
            match member.status {
                StaffStatus::Active => stats.active += 1,
                StaffStatus::OnDuty => stats.on_duty += 1,
                StaffStatus::OffDuty => stats.off_duty += 1,
            }
        }
        stats
    }
}

// ─── Incidents ──────────────────────────────────────────────────────────────

/// Headline numbers for the incident history screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentStats {
    pub total: usize,
    pub resolved: usize,
    /// Incidents dated in the reporting year.
    pub this_year: usize,
    /// Mean of the known response times, rounded to whole minutes.
    pub avg_response_minutes: Option<u32>,
}

impl IncidentStats {
    #[must_use]
    pub fn compute(incidents: &[Incident], reporting_year: i32) -> Self {
        let resolved = incidents
            .iter()
            .filter(|i| i.status == IncidentStatus::Resolved)
            .count();
        let this_year = incidents
            .iter()
            .filter(|i| i.year() == Some(reporting_year))
            .count();
        let known: Vec<u32> = incidents.iter().filter_map(|i| i.response_time).collect();
        let avg_response_minutes = if known.is_empty() {
            None
        } else {
            let sum: u64 = known.iter().copied().map(u64::from).sum();
            let n = known.len() as u64;
            u32::try_from((sum + n / 2) / n).ok()
        };
        Self {
            total: incidents.len(),
            resolved,
            this_year,
            avg_response_minutes,
        }
    }

    /// `"13 minutes"`, or `"N/A"` when no response time is known.
    #[must_use]
    pub fn avg_response_label(&self) -> String {
        self.avg_response_minutes
            .map_or_else(|| "N/A".to_owned(), |minutes| format!("{minutes} minutes"))
    }
}

// ─── Dashboard ──────────────────────────────────────────────────────────────

/// The four cards at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_forests: usize,
    pub active_staff: usize,
    /// Sum of every forest's zone count.
    pub monitoring_zones: u64,
    pub active_alerts: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(forests: &[Forest], staff: &[Staff], alerts: &[Alert]) -> Self {
        Self {
            total_forests: forests.len(),
            active_staff: staff
                .iter()
                .filter(|s| s.status != StaffStatus::OffDuty)
                .count(),
            monitoring_zones: forests.iter().map(|f| u64::from(f.zones)).sum(),
            active_alerts: alerts
                .iter()
                .filter(|a| a.status == AlertStatus::Active)
                .count(),
        }
    }
}

// ─── Detection ──────────────────────────────────────────────────────────────

/// Summary over the detection system fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStats {
    pub systems: usize,
    pub online: usize,
    /// Open alerts across all systems.
    pub total_alerts: u64,
}

impl DetectionStats {
    #[must_use]
    pub fn compute(systems: &[DetectionSystem]) -> Self {
        Self {
            systems: systems.len(),
            online: systems
                .iter()
                .filter(|s| s.status == SystemStatus::Online)
                .count(),
            total_alerts: systems.iter().map(|s| u64::from(s.alerts)).sum(),
        }
    }
}
