//! Namespaced key-value persistence — the only durable state in the app.
//!
//! Every key is scoped to one user id, mirroring the browser-local-storage
//! namespacing of the original design. Values are plain text: JSON for
//! structured collections, raw strings for scalars and free text. The store
//! does no validation beyond shape; parsing policy belongs to the callers.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal lock error")]
    LockPoisoned,
}

/// Persistence keys for one user's records.
pub mod keys {
    pub const TIMELINE: &str = "timeline";
    pub const AGE: &str = "age";
    pub const HEIGHT: &str = "height";
    pub const WEIGHT: &str = "weight";
    pub const FAMILY_HISTORY: &str = "familyHistory";
    pub const TRAVEL_HISTORY: &str = "travelHistory";

    /// All keys cleared by a "delete all data" action.
    pub const ALL: &[&str] = &[TIMELINE, AGE, HEIGHT, WEIGHT, FAMILY_HISTORY, TRAVEL_HISTORY];
}

/// Narrow persistence contract. Any backing medium that isolates users from
/// one another satisfies it, which is what lets tests run on `MemoryStore`
/// while production uses `SqliteStore`.
pub trait Store: Send + Sync {
    /// Read one value. `Ok(None)` when the key has never been written.
    fn get(&self, user_id: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// Write one value, replacing any previous one.
    fn set(&self, user_id: &str, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove one key. Removing an absent key is not an error.
    fn remove(&self, user_id: &str, key: &str) -> Result<(), StoreError>;

    /// Clear every key in the user's namespace. Other users are untouched.
    fn delete_all(&self, user_id: &str) -> Result<(), StoreError>;
}
