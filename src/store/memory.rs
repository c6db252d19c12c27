use std::collections::HashMap;
use std::sync::Mutex;

use super::{Store, StoreError};

/// In-memory backend. Default for tests and for embedders that manage
/// durability themselves.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, user_id: &str, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(&(user_id.to_string(), key.to_string())).cloned())
    }

    fn set(&self, user_id: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert((user_id.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn remove(&self, user_id: &str, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.remove(&(user_id.to_string(), key.to_string()));
        Ok(())
    }

    fn delete_all(&self, user_id: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.retain(|(uid, _), _| uid != user_id);
        Ok(())
    }
}
