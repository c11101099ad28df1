//! Closed category enumerations and the shared category → style mapping.
//!
//! Every badge in the console (risk, severity, staff status, ...) resolves its
//! look through [`Category::style`]. Screens never pick colors per status; the
//! TUI theme turns a [`StyleToken`] into a concrete terminal style.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Style Token ────────────────────────────────────────────────────────────

/// Semantic style for a category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleToken {
    /// Solid red: the most severe state.
    Critical,
    /// Red: high risk, confirmed fire, offline.
    Danger,
    /// Yellow: medium risk, maintenance, monitoring.
    Warning,
    /// Green: low risk, healthy, resolved.
    Success,
    /// Blue: on duty, investigating, completed.
    Info,
    /// Gray: off duty, false positive.
    Neutral,
}

// ─── Enumerations ───────────────────────────────────────────────────────────

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// All variants in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Label as shown on badges.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Fire risk of a zone or forest.
    RiskLevel { High => "High", Medium => "Medium", Low => "Low" }
}

labelled_enum! {
    /// Severity of a recorded incident.
    Severity { Critical => "Critical", High => "High", Medium => "Medium", Low => "Low" }
}

labelled_enum! {
    /// Duty status of a staff member.
    StaffStatus { Active => "active", OnDuty => "on-duty", OffDuty => "off-duty" }
}

labelled_enum! {
    /// Lifecycle status of an incident.
    IncidentStatus { Resolved => "resolved", Completed => "completed", Active => "active" }
}

labelled_enum! {
    /// Operational status of a detection system.
    SystemStatus { Online => "online", Maintenance => "maintenance", Offline => "offline" }
}

labelled_enum! {
    /// Triage status of a fire detection.
    DetectionStatus {
        Investigating => "investigating",
        Confirmed => "confirmed",
        FalsePositive => "false-positive",
    }
}

labelled_enum! {
    /// Status of a dashboard alert.
    AlertStatus { Active => "active", Monitoring => "monitoring", Resolved => "resolved" }
}

// ─── Category ───────────────────────────────────────────────────────────────

/// Any category attribute, tagged by family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Risk(RiskLevel),
    Severity(Severity),
    Staff(StaffStatus),
    Incident(IncidentStatus),
    System(SystemStatus),
    Detection(DetectionStatus),
    Alert(AlertStatus),
}

impl Category {
    /// The one category → style table used by every view.
    #[must_use]
    pub const fn style(self) -> StyleToken {
        use StyleToken::{Critical, Danger, Info, Neutral, Success, Warning};
        match self {
            Self::Risk(RiskLevel::High) => Danger,
            Self::Risk(RiskLevel::Medium) => Warning,
            Self::Risk(RiskLevel::Low) => Success,

            Self::Severity(Severity::Critical) => Critical,
            Self::Severity(Severity::High) => Danger,
            Self::Severity(Severity::Medium) => Warning,
            Self::Severity(Severity::Low) => Success,

            Self::Staff(StaffStatus::Active) => Success,
            Self::Staff(StaffStatus::OnDuty) => Info,
            Self::Staff(StaffStatus::OffDuty) => Neutral,

            Self::Incident(IncidentStatus::Resolved) => Success,
            Self::Incident(IncidentStatus::Completed) => Info,
            Self::Incident(IncidentStatus::Active) => Warning,

            Self::System(SystemStatus::Online) => Success,
            Self::System(SystemStatus::Maintenance) => Warning,
            Self::System(SystemStatus::Offline) => Danger,

            Self::Detection(DetectionStatus::Investigating) => Info,
            Self::Detection(DetectionStatus::Confirmed) => Danger,
            Self::Detection(DetectionStatus::FalsePositive) => Neutral,

            Self::Alert(AlertStatus::Active) => Danger,
            Self::Alert(AlertStatus::Monitoring) => Warning,
            Self::Alert(AlertStatus::Resolved) => Success,
        }
    }

    /// Badge label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Risk(v) => v.label(),
            Self::Severity(v) => v.label(),
            Self::Staff(v) => v.label(),
            Self::Incident(v) => v.label(),
            Self::System(v) => v.label(),
            Self::Detection(v) => v.label(),
            Self::Alert(v) => v.label(),
        }
    }
}

macro_rules! into_category {
    ($($ty:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Category {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

into_category! {
    RiskLevel => Risk,
    Severity => Severity,
    StaffStatus => Staff,
    IncidentStatus => Incident,
    SystemStatus => System,
    DetectionStatus => Detection,
    AlertStatus => Alert,
}
