//! Stats command implementation

use anyhow::Result;

use study_progress::progress::{badge_label, xp_for_level};

use super::Context;

/// Show a user's progress
pub fn stats_command(ctx: &Context, user: &str, json: bool) -> Result<()> {
    let stats = ctx.manager.stats(user)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let next_level_xp = xp_for_level(stats.level.saturating_add(1));

    println!("Progress for {}:\n", user);
    println!(
        "  Level {} ({} XP, next level at {} XP)",
        stats.level, stats.experience_points, next_level_xp
    );
    println!(
        "  Streak: {} day(s), best {} day(s)",
        stats.current_streak, stats.longest_streak
    );
    println!(
        "  Studied {} minute(s) over {} day(s)",
        stats.study_minutes, stats.study_days
    );

    if stats.badges.is_empty() {
        println!("  Badges: none yet");
    } else {
        println!("  Badges:");
        for badge in &stats.badges {
            println!("    - {}", badge_label(badge));
        }
    }

    Ok(())
}
