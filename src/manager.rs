//! Progress Manager - load, update, save
//!
//! Maps domain events (login, study session, quiz completed, ...) to engine
//! calls and runs each one as a read-modify-write cycle against a store.
//! Conflicting concurrent writes for the same identity are retried from a
//! fresh load, so every event is applied exactly once to the latest record.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::progress::{
    ProgressEngine, ProgressError, ProgressEvent, ProgressRecord, ProgressSnapshot, LEVEL_UP,
};
use crate::store::{ProgressStore, StoreError};

/// Domain events that change a user's progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityEvent {
    /// User showed up; counts towards the streak
    Login { date: Option<NaiveDate> },
    /// Minutes of study, e.g. a finished learning-path step
    StudySession { minutes: i64, date: Option<NaiveDate> },
    /// A finished quiz worth `points` XP; also counts towards the streak
    QuizCompleted { points: i64, date: Option<NaiveDate> },
    /// Plain XP grant
    ExperienceGranted { points: i64 },
    /// Badge earned outside the engine's own rules
    BadgeEarned { badge: String },
}

/// Errors from a managed update
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Gave up updating '{identity}' after {attempts} conflicting writes")]
    RetriesExhausted { identity: String, attempts: u32 },
}

impl ManagerError {
    /// Whether the caller sent a bad request (as opposed to a storage failure)
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Progress(ProgressError::InvalidArgument(_)))
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Runs engine operations against stored records
#[derive(Clone)]
pub struct ProgressManager {
    store: Arc<dyn ProgressStore>,
    engine: ProgressEngine,
    max_retries: u32,
}

impl ProgressManager {
    pub fn new(store: Arc<dyn ProgressStore>, config: &Config) -> Self {
        Self {
            store,
            engine: ProgressEngine::new(&config.progress),
            max_retries: config.storage.max_save_retries,
        }
    }

    pub fn with_engine(store: Arc<dyn ProgressStore>, engine: ProgressEngine, max_retries: u32) -> Self {
        Self {
            store,
            engine,
            max_retries,
        }
    }

    /// Current record for `identity` (a fresh record if none was saved yet)
    pub fn load(&self, identity: &str) -> ManagerResult<ProgressRecord> {
        Ok(self
            .store
            .load(identity)?
            .map(|stored| stored.record)
            .unwrap_or_default())
    }

    /// Snapshot for reporting
    pub fn stats(&self, identity: &str) -> ManagerResult<ProgressSnapshot> {
        let record = self.load(identity)?;
        Ok(self.engine.snapshot(&record))
    }

    /// Apply a domain event to `identity`'s record
    ///
    /// `today` is used when the event carries no date of its own.
    pub fn apply(
        &self,
        identity: &str,
        event: &ActivityEvent,
        today: NaiveDate,
    ) -> ManagerResult<Vec<ProgressEvent>> {
        debug!(identity, ?event, "applying activity");
        self.update(identity, |engine, record| dispatch(engine, record, event, today))
    }

    /// Run `op` as one read-modify-write cycle, retrying on write conflicts
    ///
    /// `op` may run more than once; it always starts from a freshly loaded
    /// record. Nothing is saved when `op` fails or leaves the record as it was.
    pub fn update<F>(&self, identity: &str, mut op: F) -> ManagerResult<Vec<ProgressEvent>>
    where
        F: FnMut(&ProgressEngine, &mut ProgressRecord) -> Result<Vec<ProgressEvent>, ProgressError>,
    {
        let attempts = self.max_retries.saturating_add(1);

        for attempt in 1..=attempts {
            let (original, version) = match self.store.load(identity)? {
                Some(stored) => (stored.record, Some(stored.version)),
                None => (ProgressRecord::new(), None),
            };

            let mut record = original.clone();
            let events = op(&self.engine, &mut record)?;
            if record == original {
                return Ok(events);
            }

            match self.store.save(identity, &record, version) {
                Ok(_) => {
                    log_events(identity, &events);
                    return Ok(events);
                }
                Err(StoreError::Conflict { .. }) => {
                    warn!(identity, attempt, "write conflict, reloading progress");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ManagerError::RetriesExhausted {
            identity: identity.to_string(),
            attempts,
        })
    }
}

fn dispatch(
    engine: &ProgressEngine,
    record: &mut ProgressRecord,
    event: &ActivityEvent,
    today: NaiveDate,
) -> Result<Vec<ProgressEvent>, ProgressError> {
    let mut events = Vec::new();

    match event {
        ActivityEvent::Login { date } => {
            let streak = engine.record_activity(record, *date, today)?;
            events.push(ProgressEvent::StreakUpdated(streak));
            push_milestones(engine, record, &mut events);
        }
        ActivityEvent::StudySession { minutes, date } => {
            events = engine.record_study_session(record, *minutes, *date, today)?;
        }
        ActivityEvent::QuizCompleted { points, date } => {
            grant(engine, record, *points, &mut events)?;
            let streak = engine.record_activity(record, *date, today)?;
            events.push(ProgressEvent::StreakUpdated(streak));
            push_milestones(engine, record, &mut events);
        }
        ActivityEvent::ExperienceGranted { points } => {
            grant(engine, record, *points, &mut events)?;
        }
        ActivityEvent::BadgeEarned { badge } => {
            if engine.award_badge(record, badge)? {
                events.push(ProgressEvent::BadgeAwarded {
                    badge: badge.trim().to_string(),
                });
            }
        }
    }

    Ok(events)
}

fn grant(
    engine: &ProgressEngine,
    record: &mut ProgressRecord,
    points: i64,
    events: &mut Vec<ProgressEvent>,
) -> Result<(), ProgressError> {
    let had_badge = record.has_badge(LEVEL_UP);
    let level_up = engine.grant_experience(record, points)?;

    if points > 0 {
        events.push(ProgressEvent::XpAwarded {
            amount: points.unsigned_abs(),
        });
    }
    if let Some(level_up) = level_up {
        events.push(ProgressEvent::LevelUp(level_up));
        if !had_badge {
            events.push(ProgressEvent::BadgeAwarded {
                badge: LEVEL_UP.to_string(),
            });
        }
    }
    Ok(())
}

fn push_milestones(engine: &ProgressEngine, record: &mut ProgressRecord, events: &mut Vec<ProgressEvent>) {
    for badge in engine.check_milestones(record) {
        events.push(ProgressEvent::BadgeAwarded { badge });
    }
}

fn log_events(identity: &str, events: &[ProgressEvent]) {
    for event in events {
        match event {
            ProgressEvent::LevelUp(level_up) => info!(
                identity,
                old_level = level_up.old_level,
                new_level = level_up.new_level,
                "level up"
            ),
            ProgressEvent::BadgeAwarded { badge } => info!(identity, badge = %badge, "badge awarded"),
            _ => {}
        }
    }
}
