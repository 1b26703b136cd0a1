//! Streak tracking
//!
//! A streak counts consecutive calendar days with at least one qualifying
//! activity. Dates are plain calendar days; no timezone conversion happens here.

use chrono::{Local, NaiveDate};

use super::error::ProgressError;

/// Date format used when a day is stored as text
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// How a streak moved after an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// First qualifying activity ever
    Started,
    /// Activity on the day after the last one
    Extended,
    /// Another activity on the same day as the last one
    SameDay,
    /// Activity after a gap of more than one day
    Reset,
}

impl StreakChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Extended => "extended",
            Self::SameDay => "same_day",
            Self::Reset => "reset",
        }
    }

    /// Whether the activity landed on a day not seen before
    pub fn is_new_day(&self) -> bool {
        !matches!(self, Self::SameDay)
    }

    /// Apply this change to a current streak count
    pub fn apply(&self, current: u32) -> u32 {
        match self {
            Self::Started | Self::Reset => 1,
            Self::Extended => current.saturating_add(1),
            Self::SameDay => current,
        }
    }
}

/// Classify an activity against the last recorded activity day
///
/// Activity dated before `last` is rejected: activity days must be
/// non-decreasing.
pub fn classify(last: Option<NaiveDate>, activity: NaiveDate) -> Result<StreakChange, ProgressError> {
    let Some(last) = last else {
        return Ok(StreakChange::Started);
    };

    let days_diff = (activity - last).num_days();
    match days_diff {
        0 => Ok(StreakChange::SameDay),
        1 => Ok(StreakChange::Extended),
        d if d > 1 => Ok(StreakChange::Reset),
        _ => Err(ProgressError::invalid(format!(
            "activity on {} is earlier than last recorded activity on {}",
            activity.format(DAY_FORMAT),
            last.format(DAY_FORMAT)
        ))),
    }
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a stored `YYYY-MM-DD` day
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DAY_FORMAT).ok()
}
