use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One visited location. Independent of the timeline; no relation to
/// `TimelineEvent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelRecord {
    pub id: Uuid,
    pub location: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Travel record awaiting an id.
#[derive(Debug, Clone)]
pub struct TravelDraft {
    pub location: String,
    pub year: String,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

impl TravelDraft {
    pub fn into_record(self, id: Uuid) -> TravelRecord {
        TravelRecord {
            id,
            location: self.location,
            year: self.year,
            duration: self.duration,
            notes: self.notes,
        }
    }
}
