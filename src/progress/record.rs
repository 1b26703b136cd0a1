//! Progress record and its read-only snapshot

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ProgressError;
use super::levels::{level_for_xp, MAX_EXPERIENCE};

/// A user's progress state
///
/// Fields are only mutated through [`ProgressEngine`](super::ProgressEngine)
/// operations, which keeps `level` tied to `experience_points` and
/// `longest_streak >= current_streak`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub(crate) experience_points: u64,
    pub(crate) level: u32,
    pub(crate) current_streak: u32,
    pub(crate) longest_streak: u32,
    pub(crate) last_activity_date: Option<NaiveDate>,
    pub(crate) badges: BTreeSet<String>,
    pub(crate) study_minutes: u64,
    pub(crate) study_days: u32,
}

/// Raw field values of a record, as read back from storage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordParts {
    pub experience_points: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
    pub badges: Vec<String>,
    pub study_minutes: u64,
    pub study_days: u32,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressRecord {
    /// A fresh record: no XP, level 1, no streak, no badges
    pub fn new() -> Self {
        Self {
            experience_points: 0,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            badges: BTreeSet::new(),
            study_minutes: 0,
            study_days: 0,
        }
    }

    /// Rebuild a record from stored values
    ///
    /// The level is derived from the XP rather than read back. Values that
    /// break the record invariants are rejected.
    pub fn restore(parts: RecordParts) -> Result<Self, ProgressError> {
        if parts.longest_streak < parts.current_streak {
            return Err(ProgressError::invalid(format!(
                "longest streak {} is below current streak {}",
                parts.longest_streak, parts.current_streak
            )));
        }
        if parts.current_streak > 0 && parts.last_activity_date.is_none() {
            return Err(ProgressError::invalid(
                "streak without a last activity date",
            ));
        }
        if parts.current_streak == 0 && parts.last_activity_date.is_some() {
            return Err(ProgressError::invalid(
                "last activity date without a streak",
            ));
        }
        if parts.experience_points > MAX_EXPERIENCE || parts.study_minutes > MAX_EXPERIENCE {
            return Err(ProgressError::invalid("counter out of range"));
        }
        if parts.badges.iter().any(|b| b.trim().is_empty()) {
            return Err(ProgressError::invalid("blank badge identifier"));
        }

        Ok(Self {
            experience_points: parts.experience_points,
            level: level_for_xp(parts.experience_points),
            current_streak: parts.current_streak,
            longest_streak: parts.longest_streak,
            last_activity_date: parts.last_activity_date,
            badges: parts.badges.into_iter().collect(),
            study_minutes: parts.study_minutes,
            study_days: parts.study_days,
        })
    }

    /// Field values for storage
    pub fn to_parts(&self) -> RecordParts {
        RecordParts {
            experience_points: self.experience_points,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_activity_date: self.last_activity_date,
            badges: self.badges.iter().cloned().collect(),
            study_minutes: self.study_minutes,
            study_days: self.study_days,
        }
    }

    pub fn experience_points(&self) -> u64 {
        self.experience_points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn last_activity_date(&self) -> Option<NaiveDate> {
        self.last_activity_date
    }

    pub fn badges(&self) -> &BTreeSet<String> {
        &self.badges
    }

    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.contains(badge)
    }

    /// Total minutes of recorded study
    pub fn study_minutes(&self) -> u64 {
        self.study_minutes
    }

    /// Number of distinct days with a qualifying activity
    pub fn study_days(&self) -> u32 {
        self.study_days
    }
}

/// Immutable view of a record for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub experience_points: u64,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub badges: Vec<String>,
    pub study_minutes: u64,
    pub study_days: u32,
}
