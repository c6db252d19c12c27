//! Per-user record service — the one writer of the namespaced store.
//!
//! Wraps a `Store` with the semantics the views rely on: fail-safe timeline
//! reads, the add-event cascade committed as a single batch, travel and
//! family-history records, and the bulk delete.

use uuid::Uuid;

use crate::models::{EventDraft, PersonalInfo, TimelineEvent, TravelDraft, TravelRecord, User};
use crate::store::{keys, Store, StoreError};
use crate::timeline;

pub struct HealthRecord<'a> {
    store: &'a dyn Store,
    user: User,
}

impl<'a> HealthRecord<'a> {
    pub fn new(store: &'a dyn Store, user: User) -> Self {
        Self { store, user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    // ── Timeline ───────────────────────────────────────────────────────

    /// The full event collection, oldest write first.
    ///
    /// Malformed stored data is treated as an empty collection: the failure
    /// is logged and never surfaced, so the views render an empty timeline
    /// instead of an error.
    pub fn events(&self) -> Result<Vec<TimelineEvent>, StoreError> {
        let Some(raw) = self.store.get(&self.user.id, keys::TIMELINE)? else {
            return Ok(Vec::new());
        };
        match timeline::parse_stored_events(&raw) {
            Ok(events) => Ok(events),
            Err(e) => {
                tracing::warn!(user = %self.user.id, error = %e, "Stored timeline unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Expand the draft through the cascade, assign fresh ids, and append
    /// the whole batch in one write. Returns the created events.
    ///
    /// Field validation is the caller's job; the protocol persists what it
    /// is given. The store never observes a partial cascade.
    pub fn add_event(&self, draft: EventDraft) -> Result<Vec<TimelineEvent>, StoreError> {
        let created: Vec<TimelineEvent> = timeline::expand(draft)
            .into_iter()
            .map(|d| d.into_event(Uuid::new_v4()))
            .collect();

        let mut all = self.events()?;
        all.extend(created.iter().cloned());
        self.store
            .set(&self.user.id, keys::TIMELINE, &serde_json::to_string(&all)?)?;

        Ok(created)
    }

    // ── Travel history ─────────────────────────────────────────────────

    pub fn travel_records(&self) -> Result<Vec<TravelRecord>, StoreError> {
        let Some(raw) = self.store.get(&self.user.id, keys::TRAVEL_HISTORY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(user = %self.user.id, error = %e, "Stored travel history unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    pub fn add_travel_record(&self, draft: TravelDraft) -> Result<TravelRecord, StoreError> {
        let record = draft.into_record(Uuid::new_v4());
        let mut records = self.travel_records()?;
        records.push(record.clone());
        self.save_travel_records(&records)?;
        Ok(record)
    }

    pub fn delete_travel_record(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.travel_records()?;
        records.retain(|r| r.id != id);
        self.save_travel_records(&records)
    }

    fn save_travel_records(&self, records: &[TravelRecord]) -> Result<(), StoreError> {
        self.store.set(
            &self.user.id,
            keys::TRAVEL_HISTORY,
            &serde_json::to_string(records)?,
        )
    }

    // ── Family history ─────────────────────────────────────────────────

    /// Free-text blob, empty string when never written.
    pub fn family_history(&self) -> Result<String, StoreError> {
        Ok(self
            .store
            .get(&self.user.id, keys::FAMILY_HISTORY)?
            .unwrap_or_default())
    }

    pub fn set_family_history(&self, text: &str) -> Result<(), StoreError> {
        self.store.set(&self.user.id, keys::FAMILY_HISTORY, text)
    }

    // ── Personal info ──────────────────────────────────────────────────

    pub fn personal_info(&self) -> Result<PersonalInfo, StoreError> {
        Ok(PersonalInfo {
            name: self.user.name.clone(),
            age: self.store.get(&self.user.id, keys::AGE)?,
            height: self.store.get(&self.user.id, keys::HEIGHT)?,
            weight: self.store.get(&self.user.id, keys::WEIGHT)?,
        })
    }

    pub fn set_age(&self, age: &str) -> Result<(), StoreError> {
        self.store.set(&self.user.id, keys::AGE, age)
    }

    pub fn set_height(&self, height: &str) -> Result<(), StoreError> {
        self.store.set(&self.user.id, keys::HEIGHT, height)
    }

    pub fn set_weight(&self, weight: &str) -> Result<(), StoreError> {
        self.store.set(&self.user.id, keys::WEIGHT, weight)
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Permanently clear every namespaced key for this user. The account
    /// identity itself is untouched.
    pub fn delete_all_data(&self) -> Result<(), StoreError> {
        self.store.delete_all(&self.user.id)?;
        tracing::info!(user = %self.user.id, "All health data deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
