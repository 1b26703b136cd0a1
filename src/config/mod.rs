//! Configuration loading and management

mod io;
mod settings;

pub use settings::{ProgressSettings, StorageSettings};

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Progress rules
    #[serde(default)]
    pub progress: ProgressSettings,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the progress rules meaningless
    pub fn validate(&self) -> Result<()> {
        if self.progress.minutes_per_xp == 0 {
            bail!("progress.minutes_per_xp must be at least 1");
        }
        Ok(())
    }
}
