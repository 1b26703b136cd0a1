//! Learning progress: XP, levels, streaks and badges
//!
//! The engine is a pure set of state transitions over a [`ProgressRecord`].
//! Loading and saving records is left to a [`ProgressStore`](crate::store::ProgressStore),
//! and [`ProgressManager`](crate::manager::ProgressManager) ties the two together.

mod badges;
mod engine;
mod error;
mod levels;
mod record;
mod streaks;

pub use badges::{badge_label, check_milestones, MilestoneId, LEVEL_UP};
pub use engine::{ProgressEngine, ProgressEvent, StreakUpdate};
pub use error::ProgressError;
pub use levels::{level_for_xp, xp_for_level, LevelUp, XpRewards, MAX_EXPERIENCE, XP_PER_LEVEL_UNIT};
pub use record::{ProgressRecord, ProgressSnapshot, RecordParts};
pub use streaks::{classify, parse_day, today, StreakChange, DAY_FORMAT};
