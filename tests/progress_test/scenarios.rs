//! Worked examples of the progress rules

use chrono::NaiveDate;
use study_progress::progress::{
    ProgressEngine, ProgressRecord, RecordParts, StreakChange, LEVEL_UP,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

#[test]
fn test_first_grant_of_250() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::new();
    assert_eq!(record.level(), 1);

    let level_up = engine.grant_experience(&mut record, 250).unwrap();

    assert_eq!(record.experience_points(), 250);
    assert_eq!(record.level(), 2);
    assert!(level_up.is_some());
    assert!(record.has_badge(LEVEL_UP));
}

#[test]
fn test_streak_from_day_five() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::restore(RecordParts {
        current_streak: 3,
        longest_streak: 3,
        last_activity_date: Some(day(5)),
        study_days: 3,
        ..Default::default()
    })
    .unwrap();

    let update = engine.record_activity(&mut record, Some(day(6)), day(6)).unwrap();
    assert_eq!(update.change, StreakChange::Extended);
    assert_eq!(record.current_streak(), 4);
    assert_eq!(record.longest_streak(), 4);

    let update = engine.record_activity(&mut record, Some(day(6)), day(6)).unwrap();
    assert_eq!(update.change, StreakChange::SameDay);
    assert_eq!(record.current_streak(), 4);
    assert_eq!(record.longest_streak(), 4);

    let update = engine.record_activity(&mut record, Some(day(9)), day(9)).unwrap();
    assert_eq!(update.change, StreakChange::Reset);
    assert_eq!(record.current_streak(), 1);
    assert_eq!(record.longest_streak(), 4);
    assert_eq!(record.study_days(), 5);
}

#[test]
fn test_earlier_activity_rejected() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::restore(RecordParts {
        current_streak: 2,
        longest_streak: 2,
        last_activity_date: Some(day(5)),
        ..Default::default()
    })
    .unwrap();
    let before = record.clone();

    assert!(engine.record_activity(&mut record, Some(day(4)), day(5)).is_err());
    assert_eq!(record, before);
    assert_eq!(record.to_parts(), before.to_parts());
}

#[test]
fn test_study_session_of_25_minutes() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::new();

    engine
        .record_study_session(&mut record, 25, None, day(1))
        .unwrap();

    assert_eq!(record.study_minutes(), 25);
    assert_eq!(record.experience_points(), 2);
    assert_eq!(record.current_streak(), 1);
    assert!(record.has_badge("first_day"));
}

#[test]
fn test_week_of_study_earns_week_streak() {
    let engine = ProgressEngine::default();
    let mut record = ProgressRecord::new();

    for d in 1..=7 {
        engine
            .record_study_session(&mut record, 30, Some(day(d)), day(d))
            .unwrap();
    }

    assert_eq!(record.current_streak(), 7);
    assert!(record.has_badge("week_streak"));
    assert!(!record.has_badge("month_streak"));
    assert_eq!(record.experience_points(), 21);
}
