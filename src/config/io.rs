//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.study-progress/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".study-progress")
    }

    /// Get the global config file path (~/.study-progress/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from `path`, writing defaults there first if the
    /// file does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::auto_init(path)?;
        }
        Self::from_file(path)
    }

    /// Load global configuration from ~/.study-progress/config.toml
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::global_config_path())
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// This ensures:
    /// 1. Exclusive lock prevents concurrent writes from several processes
    /// 2. Atomic write (temp file + rename) prevents corruption on crash
    /// 3. Parent directory is created if needed
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        Self::ensure_parent(path)?;
        let _lock = Self::lock(path)?;
        Self::write_atomic(path, &content)
        // Lock is released when _lock is dropped
    }

    /// Write default configuration to `path` unless another process beat us to it
    fn auto_init(path: &Path) -> Result<()> {
        Self::ensure_parent(path)?;
        let _lock = Self::lock(path)?;

        // Re-check after acquiring the lock
        if path.exists() {
            return Ok(());
        }

        let content =
            toml::to_string_pretty(&Self::default()).context("Failed to serialize default config")?;
        Self::write_atomic(path, &content)?;

        tracing::info!("Created {}", path.display());
        Ok(())
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        Ok(())
    }

    /// Exclusive lock on a sidecar file (separate from config to survive the rename)
    fn lock(path: &Path) -> Result<File> {
        let lock_path = path.with_extension("toml.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        lock_file
            .lock_exclusive()
            .context("Failed to acquire config lock")?;

        Ok(lock_file)
    }

    fn write_atomic(path: &Path, content: &str) -> Result<()> {
        let temp_path = path.with_extension("toml.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .context("Failed to write config content")?;
        temp_file.sync_all().context("Failed to sync config file")?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename config file: {}", path.display()))?;
        Ok(())
    }
}
