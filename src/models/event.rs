use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded health occurrence, anchored to an age and a date.
///
/// `age` and `date` are independent user-supplied fields. The record never
/// cross-checks them against a birth date (none is modeled); stored data may
/// be inconsistent and that is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub age: u32,
    /// ISO-8601 calendar date. Compared lexicographically for ordering.
    pub date: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
}

/// Closed set of event variants. Wire names match the stored-data format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventType {
    Vaccination,
    Medication,
    #[serde(rename = "Doctor Visit")]
    DoctorVisit,
    Disease,
    Measurement,
    Other,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vaccination => write!(f, "Vaccination"),
            Self::Medication => write!(f, "Medication"),
            Self::DoctorVisit => write!(f, "Doctor Visit"),
            Self::Disease => write!(f, "Disease"),
            Self::Measurement => write!(f, "Measurement"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Type-specific payload. Only doctor visits and medications carry one;
/// every other event type stores `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum EventDetails {
    DoctorVisit {
        visit_kind: VisitKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        disease_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        medications_prescribed: Option<String>,
    },
    Medication {
        status: MedicationStatus,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VisitKind {
    #[serde(rename = "Casual Visit")]
    Casual,
    #[serde(rename = "Serious Visit")]
    Serious,
}

impl std::fmt::Display for VisitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Casual => write!(f, "Casual Visit"),
            Self::Serious => write!(f, "Serious Visit"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MedicationStatus {
    Active,
    Stopped,
}

impl std::fmt::Display for MedicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

/// A proposed event without an identity. The mutation protocol assigns a
/// fresh id to every draft it persists.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub age: u32,
    pub date: String,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub details: Option<EventDetails>,
    /// Medication recorded alongside a new disease entry. Consumed by the
    /// cascade; never stored on the disease event itself.
    pub companion_medication: Option<String>,
}

impl EventDraft {
    /// Promote a draft to a stored event under a freshly generated id.
    pub fn into_event(self, id: Uuid) -> TimelineEvent {
        TimelineEvent {
            id,
            age: self.age,
            date: self.date,
            title: self.title,
            description: self.description,
            event_type: self.event_type,
            details: self.details,
        }
    }
}
