//! Progress engine - core state transitions
//!
//! Handles XP awards, level computation, streak updates and badge grants on a
//! detached [`ProgressRecord`]. Nothing here touches storage or the clock:
//! callers load the record, pass in the current date, and save the result.

use chrono::NaiveDate;
use tracing::debug;

use super::badges::{check_milestones, LEVEL_UP};
use super::error::ProgressError;
use super::levels::{level_for_xp, LevelUp, XpRewards, MAX_EXPERIENCE};
use super::record::{ProgressRecord, ProgressSnapshot};
use super::streaks::{classify, StreakChange};
use crate::config::ProgressSettings;

/// Result of a streak-qualifying activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub change: StreakChange,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Things that happened during a composite update, for caller notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    XpAwarded { amount: u64 },
    LevelUp(LevelUp),
    StreakUpdated(StreakUpdate),
    BadgeAwarded { badge: String },
}

/// Stateless progress rules
///
/// Holds only policy knobs; every operation takes the record it works on.
/// Failed operations leave the record exactly as it was.
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    minutes_per_xp: u64,
    milestone_badges: bool,
}

impl Default for ProgressEngine {
    fn default() -> Self {
        Self {
            minutes_per_xp: XpRewards::MINUTES_PER_XP,
            milestone_badges: true,
        }
    }
}

impl ProgressEngine {
    pub fn new(settings: &ProgressSettings) -> Self {
        Self {
            minutes_per_xp: settings.minutes_per_xp,
            milestone_badges: settings.milestone_badges,
        }
    }

    // ========================================
    // XP & LEVEL OPERATIONS
    // ========================================

    /// Add experience points and recompute the level
    ///
    /// Returns the level transition when the level went up. The first level
    /// up also grants the `level_up` badge.
    pub fn grant_experience(
        &self,
        record: &mut ProgressRecord,
        points: i64,
    ) -> Result<Option<LevelUp>, ProgressError> {
        let points = u64::try_from(points).map_err(|_| {
            ProgressError::invalid(format!(
                "experience points must be non-negative, got {}",
                points
            ))
        })?;
        let (level_up, _) = self.add_experience(record, points)?;
        Ok(level_up)
    }

    /// Returns the level up (if any) and whether the `level_up` badge was new
    fn add_experience(
        &self,
        record: &mut ProgressRecord,
        points: u64,
    ) -> Result<(Option<LevelUp>, bool), ProgressError> {
        let total = record
            .experience_points
            .checked_add(points)
            .filter(|total| *total <= MAX_EXPERIENCE)
            .ok_or_else(|| ProgressError::invalid("experience points overflow"))?;

        let old_level = record.level;
        let new_level = level_for_xp(total);
        record.experience_points = total;
        record.level = new_level;

        if new_level > old_level {
            let badge_new = record.badges.insert(LEVEL_UP.to_string());
            Ok((
                Some(LevelUp {
                    old_level,
                    new_level,
                }),
                badge_new,
            ))
        } else {
            Ok((None, false))
        }
    }

    // ========================================
    // STREAK OPERATIONS
    // ========================================

    /// Update streak counters for a qualifying activity
    ///
    /// `activity_date` defaults to `now`. Activity dated before the last
    /// recorded activity is rejected.
    pub fn record_activity(
        &self,
        record: &mut ProgressRecord,
        activity_date: Option<NaiveDate>,
        now: NaiveDate,
    ) -> Result<StreakUpdate, ProgressError> {
        let day = activity_date.unwrap_or(now);
        let change = classify(record.last_activity_date, day)?;

        record.current_streak = change.apply(record.current_streak);
        if record.current_streak > record.longest_streak {
            record.longest_streak = record.current_streak;
        }
        if change.is_new_day() {
            record.study_days = record.study_days.saturating_add(1);
        }
        record.last_activity_date = Some(day);

        debug!(
            change = change.as_str(),
            streak = record.current_streak,
            "streak updated"
        );

        Ok(StreakUpdate {
            change,
            current_streak: record.current_streak,
            longest_streak: record.longest_streak,
        })
    }

    // ========================================
    // BADGE OPERATIONS
    // ========================================

    /// Grant a badge; returns `true` only the first time it is granted
    pub fn award_badge(
        &self,
        record: &mut ProgressRecord,
        badge_id: &str,
    ) -> Result<bool, ProgressError> {
        let badge_id = badge_id.trim();
        if badge_id.is_empty() {
            return Err(ProgressError::invalid("badge identifier must not be empty"));
        }
        if record.badges.contains(badge_id) {
            return Ok(false);
        }
        record.badges.insert(badge_id.to_string());
        Ok(true)
    }

    /// Award every milestone badge the record has reached but does not hold
    ///
    /// Returns the newly awarded badge identifiers.
    pub fn check_milestones(&self, record: &mut ProgressRecord) -> Vec<String> {
        if !self.milestone_badges {
            return Vec::new();
        }

        let reached = check_milestones(record.study_days, record.current_streak, &record.badges);

        let mut awarded = Vec::with_capacity(reached.len());
        for id in reached {
            record.badges.insert(id.as_str().to_string());
            awarded.push(id.as_str().to_string());
        }
        awarded
    }

    // ========================================
    // COMPOSITE OPERATIONS
    // ========================================

    /// Record a study session
    ///
    /// Adds the minutes, counts the session as a streak activity, awards one
    /// XP per `minutes_per_xp` minutes and checks milestones. All-or-nothing:
    /// on error the record is unchanged.
    pub fn record_study_session(
        &self,
        record: &mut ProgressRecord,
        minutes: i64,
        activity_date: Option<NaiveDate>,
        now: NaiveDate,
    ) -> Result<Vec<ProgressEvent>, ProgressError> {
        let minutes = u64::try_from(minutes).map_err(|_| {
            ProgressError::invalid(format!("study minutes must be non-negative, got {}", minutes))
        })?;

        let mut next = record.clone();
        let mut events = Vec::new();

        next.study_minutes = next
            .study_minutes
            .checked_add(minutes)
            .filter(|total| *total <= MAX_EXPERIENCE)
            .ok_or_else(|| ProgressError::invalid("study minutes overflow"))?;

        let streak = self.record_activity(&mut next, activity_date, now)?;
        events.push(ProgressEvent::StreakUpdated(streak));

        let xp = XpRewards::for_study(minutes, self.minutes_per_xp);
        if xp > 0 {
            let (level_up, badge_new) = self.add_experience(&mut next, xp)?;
            events.push(ProgressEvent::XpAwarded { amount: xp });
            if let Some(level_up) = level_up {
                events.push(ProgressEvent::LevelUp(level_up));
            }
            if badge_new {
                events.push(ProgressEvent::BadgeAwarded {
                    badge: LEVEL_UP.to_string(),
                });
            }
        }

        for badge in self.check_milestones(&mut next) {
            events.push(ProgressEvent::BadgeAwarded { badge });
        }

        *record = next;
        Ok(events)
    }

    /// Read-only view of a record
    pub fn snapshot(&self, record: &ProgressRecord) -> ProgressSnapshot {
        ProgressSnapshot {
            experience_points: record.experience_points,
            level: record.level,
            current_streak: record.current_streak,
            longest_streak: record.longest_streak,
            badges: record.badges.iter().cloned().collect(),
            study_minutes: record.study_minutes,
            study_days: record.study_days,
        }
    }
}
