//! Progress persistence
//!
//! The [`ProgressStore`] trait is the load/save contract the manager works
//! against. Every stored record carries a version; a save names the version
//! it was loaded at and fails with [`StoreError::Conflict`] if someone else
//! saved in between. That serializes read-modify-write cycles per identity
//! without holding a lock across the engine call.
//!
//! Available stores:
//! - `MemoryStore` - in-process HashMap (tests, embedding)
//! - `SqliteStore` - `~/.study-progress/progress.db`

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::progress::ProgressRecord;

/// A record together with the version it was stored at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub record: ProgressRecord,
    pub version: u64,
}

/// Errors raised by progress stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Write conflict for '{identity}': expected version {expected:?}, found {found:?}")]
    Conflict {
        identity: String,
        expected: Option<u64>,
        found: Option<u64>,
    },

    #[error("Corrupt progress record for '{identity}': {reason}")]
    Corrupt { identity: String, reason: String },

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Load/save contract for progress records
pub trait ProgressStore: Send + Sync {
    /// Load the record for `identity`, if one was ever saved
    fn load(&self, identity: &str) -> StoreResult<Option<StoredRecord>>;

    /// Save `record` for `identity`
    ///
    /// `expected_version` is the version the record was loaded at, or `None`
    /// when no record existed. Returns the new version.
    fn save(
        &self,
        identity: &str,
        record: &ProgressRecord,
        expected_version: Option<u64>,
    ) -> StoreResult<u64>;

    /// All identities with a stored record, sorted
    fn identities(&self) -> StoreResult<Vec<String>>;
}
