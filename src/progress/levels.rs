//! XP and Level system
//!
//! Levels follow a square-root curve: `level = floor(sqrt(xp / 100)) + 1`.

/// XP that makes up one "unit" of the level curve
pub const XP_PER_LEVEL_UNIT: u64 = 100;

/// Largest total a counter may hold; stores keep counters as signed 64-bit integers
pub const MAX_EXPERIENCE: u64 = i64::MAX as u64;

/// Level reached with the given amount of XP
///
/// `floor(sqrt(xp / 100))` is computed with integer math: for an integer
/// `n`, `n² <= xp / 100` holds exactly when `n² <= floor(xp / 100)`.
pub fn level_for_xp(xp: u64) -> u32 {
    let steps = (xp / XP_PER_LEVEL_UNIT).isqrt();
    u32::try_from(steps).unwrap_or(u32::MAX - 1) + 1
}

/// Minimum XP needed to reach `level` (level 1 needs nothing)
pub fn xp_for_level(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    steps
        .saturating_mul(steps)
        .saturating_mul(XP_PER_LEVEL_UNIT)
}

/// A level up event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

/// XP rewards for study activity
pub struct XpRewards;

impl XpRewards {
    /// Default minutes of study per XP point
    pub const MINUTES_PER_XP: u64 = 10;

    /// XP earned for a study session of `minutes`
    pub fn for_study(minutes: u64, minutes_per_xp: u64) -> u64 {
        if minutes_per_xp == 0 {
            return 0;
        }
        minutes / minutes_per_xp
    }
}
