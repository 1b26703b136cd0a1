//! In-memory progress store
//!
//! Volatile; everything is lost when the store is dropped.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{ProgressStore, StoreError, StoreResult, StoredRecord};
use crate::progress::ProgressRecord;

/// HashMap-backed store
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, identity: &str) -> StoreResult<Option<StoredRecord>> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(identity).cloned())
    }

    fn save(
        &self,
        identity: &str,
        record: &ProgressRecord,
        expected_version: Option<u64>,
    ) -> StoreResult<u64> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;

        let found = records.get(identity).map(|stored| stored.version);
        if found != expected_version {
            return Err(StoreError::Conflict {
                identity: identity.to_string(),
                expected: expected_version,
                found,
            });
        }

        let version = found.map_or(1, |v| v + 1);
        records.insert(
            identity.to_string(),
            StoredRecord {
                record: record.clone(),
                version,
            },
        );
        Ok(version)
    }

    fn identities(&self) -> StoreResult<Vec<String>> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        let mut ids: Vec<String> = records.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
