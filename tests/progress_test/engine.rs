//! Property-style tests for ProgressEngine

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use study_progress::progress::{
    level_for_xp, ProgressEngine, ProgressError, ProgressRecord, StreakChange, LEVEL_UP,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

#[test]
fn test_grants_are_additive() {
    let engine = ProgressEngine::default();

    for (a, b) in [(0, 0), (10, 90), (250, 1000), (99, 1), (12_345, 67_890)] {
        let mut split = ProgressRecord::new();
        engine.grant_experience(&mut split, a).unwrap();
        engine.grant_experience(&mut split, b).unwrap();

        let mut once = ProgressRecord::new();
        engine.grant_experience(&mut once, a + b).unwrap();

        assert_eq!(split.experience_points(), once.experience_points());
        assert_eq!(split.level(), once.level());
    }
}

#[test]
fn test_level_tracks_experience_and_never_drops() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::new();
    let mut last_level = record.level();

    let mut rng = StdRng::seed_from_u64(0x9E37_79B9);

    for _ in 0..200 {
        let points: i64 = rng.gen_range(0..700);
        engine.grant_experience(&mut record, points).unwrap();

        let expected = ((record.experience_points() as f64 / 100.0).sqrt()).floor() as u32 + 1;
        assert_eq!(record.level(), expected);
        assert_eq!(record.level(), level_for_xp(record.experience_points()));
        assert!(record.level() >= last_level);
        last_level = record.level();
    }
    assert!(last_level > 5);
}

#[test]
fn test_level_up_badge_granted_once() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::new();
    let mut level_ups = 0;

    for _ in 0..50 {
        if engine.grant_experience(&mut record, 500).unwrap().is_some() {
            level_ups += 1;
        }
    }

    assert!(level_ups > 1);
    let count = record.badges().iter().filter(|b| *b == LEVEL_UP).count();
    assert_eq!(count, 1);
    assert_eq!(record.badges().len(), 1);
}

#[test]
fn test_streak_rules() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::new();
    let day = |n: u64| start().checked_add_days(Days::new(n)).unwrap();

    engine.record_activity(&mut record, Some(day(0)), day(0)).unwrap();
    engine.record_activity(&mut record, Some(day(1)), day(1)).unwrap();
    assert_eq!(record.current_streak(), 2);

    // Same day never changes the streak
    for _ in 0..5 {
        let update = engine.record_activity(&mut record, Some(day(1)), day(1)).unwrap();
        assert_eq!(update.change, StreakChange::SameDay);
        assert_eq!(record.current_streak(), 2);
    }

    // Next day adds exactly one
    engine.record_activity(&mut record, Some(day(2)), day(2)).unwrap();
    assert_eq!(record.current_streak(), 3);

    // Any gap resets to one
    let update = engine.record_activity(&mut record, Some(day(4)), day(4)).unwrap();
    assert_eq!(update.change, StreakChange::Reset);
    assert_eq!(record.current_streak(), 1);
    assert_eq!(record.longest_streak(), 3);
}

#[test]
fn test_longest_streak_invariant_over_random_walk() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::new();
    let mut offset = 0u64;

    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        // Mostly consecutive days, some repeats and some gaps
        offset += match rng.gen_range(0..10) {
            0..=2 => 0,
            3..=8 => 1,
            _ => rng.gen_range(2..7),
        };
        let day = start().checked_add_days(Days::new(offset)).unwrap();
        engine.record_activity(&mut record, Some(day), day).unwrap();
        engine.grant_experience(&mut record, rng.gen_range(0..50)).unwrap();
        engine.check_milestones(&mut record);

        assert!(record.longest_streak() >= record.current_streak());
        assert!(record.current_streak() >= 1);
    }
}

#[test]
fn test_award_badge_idempotent() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::new();

    assert!(engine.award_badge(&mut record, "quiz_ace").unwrap());
    let after_first = record.clone();

    for _ in 0..3 {
        assert!(!engine.award_badge(&mut record, "quiz_ace").unwrap());
        assert_eq!(record, after_first);
    }
}

#[test]
fn test_invalid_arguments_leave_record_unchanged() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::new();
    let day = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
    engine.record_activity(&mut record, Some(day), day).unwrap();
    engine.grant_experience(&mut record, 320).unwrap();
    let before = record.clone();

    let earlier = day.pred_opt().unwrap();
    let results = [
        engine.record_activity(&mut record, Some(earlier), day).map(|_| ()),
        engine.grant_experience(&mut record, -10).map(|_| ()),
        engine.grant_experience(&mut record, i64::MIN).map(|_| ()),
        engine.award_badge(&mut record, "").map(|_| ()),
        engine
            .record_study_session(&mut record, 30, Some(earlier), day)
            .map(|_| ()),
    ];

    for result in results {
        assert!(matches!(result, Err(ProgressError::InvalidArgument(_))));
    }
    assert_eq!(record, before);
}
