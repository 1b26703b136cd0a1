//! CLI command implementations

pub mod init;
pub mod record;
pub mod stats;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use study_progress::{Config, ProgressManager, SqliteStore};

/// Config and manager shared by the commands that touch progress
pub struct Context {
    pub manager: ProgressManager,
}

impl Context {
    /// Load the config and open the database it points at
    ///
    /// `db` overrides `storage.db_path` from the config.
    pub fn open(config_path: Option<&Path>, db: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::from_file(path)?,
            None => Config::load()?,
        };

        let store = match db.or(config.storage.db_path.as_deref()) {
            Some(path) => {
                debug!("Opening progress db at {}", path.display());
                SqliteStore::open(path)?
            }
            None => SqliteStore::open_default()?,
        };

        Ok(Self {
            manager: ProgressManager::new(Arc::new(store), &config),
        })
    }
}
