//! Commands that apply activity events

use anyhow::Result;
use chrono::NaiveDate;

use study_progress::progress::{self, ProgressEvent};
use study_progress::ActivityEvent;

use super::Context;

pub fn grant_command(ctx: &Context, user: &str, points: i64) -> Result<()> {
    apply(ctx, user, ActivityEvent::ExperienceGranted { points })
}

pub fn activity_command(ctx: &Context, user: &str, date: Option<NaiveDate>) -> Result<()> {
    apply(ctx, user, ActivityEvent::Login { date })
}

pub fn study_command(ctx: &Context, user: &str, minutes: i64, date: Option<NaiveDate>) -> Result<()> {
    apply(ctx, user, ActivityEvent::StudySession { minutes, date })
}

pub fn quiz_command(ctx: &Context, user: &str, points: i64, date: Option<NaiveDate>) -> Result<()> {
    apply(ctx, user, ActivityEvent::QuizCompleted { points, date })
}

pub fn badge_command(ctx: &Context, user: &str, badge: &str) -> Result<()> {
    apply(
        ctx,
        user,
        ActivityEvent::BadgeEarned {
            badge: badge.to_string(),
        },
    )
}

fn apply(ctx: &Context, user: &str, event: ActivityEvent) -> Result<()> {
    let events = ctx.manager.apply(user, &event, progress::today())?;

    if events.is_empty() {
        println!("No change for {}.", user);
        return Ok(());
    }

    for event in &events {
        println!("  {}", describe(event));
    }
    Ok(())
}

fn describe(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::XpAwarded { amount } => format!("+{} XP", amount),
        ProgressEvent::LevelUp(level_up) => {
            format!("Level up! {} -> {}", level_up.old_level, level_up.new_level)
        }
        ProgressEvent::StreakUpdated(update) => format!(
            "Streak {}: {} day(s) (best {})",
            update.change.as_str(),
            update.current_streak,
            update.longest_streak
        ),
        ProgressEvent::BadgeAwarded { badge } => format!("Badge earned: {}", badge),
    }
}
