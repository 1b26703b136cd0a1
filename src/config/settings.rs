//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::progress::XpRewards;

/// Progress rule settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSettings {
    /// Minutes of study that earn one XP point
    #[serde(default = "default_minutes_per_xp")]
    pub minutes_per_xp: u64,

    /// Award milestone badges (first_day, week_streak, month_streak, hundred_days)
    #[serde(default = "default_milestone_badges")]
    pub milestone_badges: bool,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Database location (defaults to ~/.study-progress/progress.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// How often a save is retried after a concurrent write conflict
    #[serde(default = "default_max_save_retries")]
    pub max_save_retries: u32,
}

fn default_minutes_per_xp() -> u64 {
    XpRewards::MINUTES_PER_XP
}

fn default_milestone_badges() -> bool {
    true
}

fn default_max_save_retries() -> u32 {
    3
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            minutes_per_xp: default_minutes_per_xp(),
            milestone_badges: default_milestone_badges(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            db_path: None,
            max_save_retries: default_max_save_retries(),
        }
    }
}
