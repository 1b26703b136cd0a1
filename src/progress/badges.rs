//! Badge definitions and milestone checks
//!
//! Badges are opaque string tokens. The ones defined here are granted by the
//! engine itself; callers may award any other non-empty token.

use std::collections::BTreeSet;

/// Badge granted on the first level up
pub const LEVEL_UP: &str = "level_up";

/// Identifier for each milestone badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MilestoneId {
    FirstDay,
    WeekStreak,
    MonthStreak,
    HundredDays,
}

impl MilestoneId {
    /// Badge token stored on the record
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstDay => "first_day",
            Self::WeekStreak => "week_streak",
            Self::MonthStreak => "month_streak",
            Self::HundredDays => "hundred_days",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_day" => Some(Self::FirstDay),
            "week_streak" => Some(Self::WeekStreak),
            "month_streak" => Some(Self::MonthStreak),
            "hundred_days" => Some(Self::HundredDays),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstDay => "First study day",
            Self::WeekStreak => "7-day streak",
            Self::MonthStreak => "30-day streak",
            Self::HundredDays => "100 study days",
        }
    }
}

/// Display label for a badge token; milestones get their description appended
pub fn badge_label(badge: &str) -> String {
    match MilestoneId::from_str(badge) {
        Some(id) => format!("{} ({})", badge, id.description()),
        None if badge == LEVEL_UP => format!("{} (First level up)", badge),
        None => badge.to_string(),
    }
}

/// Milestones keyed on the number of distinct study days
const STUDY_DAY_MILESTONES: [(u32, MilestoneId); 2] =
    [(1, MilestoneId::FirstDay), (100, MilestoneId::HundredDays)];

/// Milestones keyed on the current streak
const STREAK_MILESTONES: [(u32, MilestoneId); 2] =
    [(7, MilestoneId::WeekStreak), (30, MilestoneId::MonthStreak)];

/// Milestones reached but not yet held as badges
pub fn check_milestones(
    study_days: u32,
    current_streak: u32,
    held: &BTreeSet<String>,
) -> Vec<MilestoneId> {
    let mut newly_reached = Vec::new();

    for (threshold, id) in STUDY_DAY_MILESTONES {
        if study_days >= threshold && !held.contains(id.as_str()) {
            newly_reached.push(id);
        }
    }

    for (threshold, id) in STREAK_MILESTONES {
        if current_streak >= threshold && !held.contains(id.as_str()) {
            newly_reached.push(id);
        }
    }

    newly_reached
}
