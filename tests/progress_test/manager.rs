//! Tests for ProgressManager over the memory and SQLite stores

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use study_progress::progress::ProgressEvent;
use study_progress::{
    ActivityEvent, Config, MemoryStore, ProgressManager, ProgressStore, SqliteStore,
};
use tempfile::tempdir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
}

#[test]
fn test_concurrent_grants_are_all_applied() {
    let store = Arc::new(MemoryStore::new());
    let mut config = Config::default();
    config.storage.max_save_retries = 10_000;
    let manager = ProgressManager::new(store.clone(), &config);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = manager.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    manager
                        .apply(
                            "shared",
                            &ActivityEvent::ExperienceGranted { points: 4 },
                            day(1),
                        )
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stored = store.load("shared").unwrap().unwrap();
    assert_eq!(stored.record.experience_points(), 8 * 25 * 4);
    assert_eq!(stored.record.level(), 3);
    assert_eq!(stored.version, 200);
}

#[test]
fn test_sqlite_manager_end_to_end() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("progress.db");
    let config = Config::default();

    {
        let store = Arc::new(SqliteStore::open(&db_path).unwrap());
        let manager = ProgressManager::new(store, &config);

        manager
            .apply("ana", &ActivityEvent::Login { date: None }, day(1))
            .unwrap();
        manager
            .apply(
                "ana",
                &ActivityEvent::StudySession {
                    minutes: 90,
                    date: Some(day(2)),
                },
                day(2),
            )
            .unwrap();
        manager
            .apply(
                "ana",
                &ActivityEvent::QuizCompleted {
                    points: 100,
                    date: Some(day(2)),
                },
                day(2),
            )
            .unwrap();
    }

    let store = Arc::new(SqliteStore::open(&db_path).unwrap());
    let manager = ProgressManager::new(store.clone(), &config);
    let stats = manager.stats("ana").unwrap();

    assert_eq!(stats.experience_points, 109);
    assert_eq!(stats.level, 2);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.study_minutes, 90);
    assert_eq!(stats.study_days, 2);
    assert_eq!(stats.badges, vec!["first_day", "level_up"]);
    assert_eq!(store.identities().unwrap(), vec!["ana"]);
}

#[test]
fn test_invalid_event_reported_as_invalid_argument() {
    let manager = ProgressManager::new(Arc::new(MemoryStore::new()), &Config::default());

    let err = manager
        .apply("ben", &ActivityEvent::ExperienceGranted { points: -3 }, day(1))
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let err = manager
        .apply(
            "ben",
            &ActivityEvent::BadgeEarned {
                badge: " ".to_string(),
            },
            day(1),
        )
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_sqlite_rejects_experience_past_ceiling() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let manager = ProgressManager::new(store.clone(), &Config::default());

    manager
        .apply(
            "eli",
            &ActivityEvent::ExperienceGranted { points: i64::MAX },
            day(1),
        )
        .unwrap();

    let err = manager
        .apply("eli", &ActivityEvent::ExperienceGranted { points: 10 }, day(1))
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let stored = store.load("eli").unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.record.experience_points(), i64::MAX as u64);
}

#[test]
fn test_quiz_with_bad_date_saves_nothing() {
    let store = Arc::new(MemoryStore::new());
    let manager = ProgressManager::new(store.clone(), &Config::default());
    manager
        .apply("cleo", &ActivityEvent::Login { date: None }, day(10))
        .unwrap();

    // XP is applied before the streak check fails; none of it may stick
    let result = manager.apply(
        "cleo",
        &ActivityEvent::QuizCompleted {
            points: 500,
            date: Some(day(9)),
        },
        day(10),
    );

    assert!(result.is_err());
    let stored = store.load("cleo").unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.record.experience_points(), 0);
}

#[test]
fn test_minutes_per_xp_from_config() {
    let mut config = Config::default();
    config.progress.minutes_per_xp = 5;
    let manager = ProgressManager::new(Arc::new(MemoryStore::new()), &config);

    let events = manager
        .apply(
            "dina",
            &ActivityEvent::StudySession {
                minutes: 25,
                date: None,
            },
            day(3),
        )
        .unwrap();

    assert!(events.contains(&ProgressEvent::XpAwarded { amount: 5 }));
}
