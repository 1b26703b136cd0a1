//! SQLite progress store
//!
//! One row per identity in `~/.study-progress/progress.db`. Badges are kept
//! as a JSON array and the last activity day as `YYYY-MM-DD` text.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use super::{ProgressStore, StoreError, StoreResult, StoredRecord};
use crate::config::Config;
use crate::progress::{parse_day, ProgressRecord, RecordParts, DAY_FORMAT};

/// Latest schema version
const SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS progress (
    identity TEXT PRIMARY KEY,
    experience_points INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1,
    current_streak INTEGER NOT NULL DEFAULT 0,
    longest_streak INTEGER NOT NULL DEFAULT 0,
    last_activity_day TEXT,
    badges TEXT NOT NULL DEFAULT '[]',
    study_minutes INTEGER NOT NULL DEFAULT 0,
    study_days INTEGER NOT NULL DEFAULT 0,
    version INTEGER NOT NULL,
    updated_at INTEGER
);
CREATE INDEX IF NOT EXISTS idx_progress_level ON progress(level);
"#;

/// Row values before they are turned back into a record
type ProgressRow = (u64, u32, u32, Option<String>, String, u64, u32, u64);

/// SQLite-backed store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database at the default location (~/.study-progress/progress.db)
    pub fn open_default() -> Result<Self> {
        let db_path = Config::global_config_dir().join("progress.db");
        Self::open(&db_path)
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create progress dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open progress db: {}", path.display()))?;

        // WAL lets the CLI read while another process writes
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory progress db")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize progress schema")?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Version currently stored for `identity`
    fn current_version(conn: &Connection, identity: &str) -> StoreResult<Option<u64>> {
        let version = conn
            .query_row(
                "SELECT version FROM progress WHERE identity = ?1",
                [identity],
                |r| r.get::<_, u64>(0),
            )
            .optional()?;
        Ok(version)
    }

    fn row_to_record(identity: &str, row: ProgressRow) -> StoreResult<StoredRecord> {
        let (xp, current, longest, last_day, badges, minutes, days, version) = row;

        let corrupt = |reason: String| StoreError::Corrupt {
            identity: identity.to_string(),
            reason,
        };

        let last_activity_date = match last_day {
            Some(day) => {
                Some(parse_day(&day).ok_or_else(|| corrupt(format!("bad activity day '{}'", day)))?)
            }
            None => None,
        };
        let badges: Vec<String> = serde_json::from_str(&badges)?;

        let record = ProgressRecord::restore(RecordParts {
            experience_points: xp,
            current_streak: current,
            longest_streak: longest,
            last_activity_date,
            badges,
            study_minutes: minutes,
            study_days: days,
        })
        .map_err(|e| corrupt(e.to_string()))?;

        Ok(StoredRecord { record, version })
    }
}

impl ProgressStore for SqliteStore {
    fn load(&self, identity: &str) -> StoreResult<Option<StoredRecord>> {
        let conn = self.conn()?;
        let row: Option<ProgressRow> = conn
            .query_row(
                r#"SELECT experience_points, current_streak, longest_streak, last_activity_day,
                          badges, study_minutes, study_days, version
                   FROM progress WHERE identity = ?1"#,
                [identity],
                |r| {
                    Ok((
                        r.get(0)?,
                        r.get(1)?,
                        r.get(2)?,
                        r.get(3)?,
                        r.get(4)?,
                        r.get(5)?,
                        r.get(6)?,
                        r.get(7)?,
                    ))
                },
            )
            .optional()?;
        drop(conn);

        row.map(|row| Self::row_to_record(identity, row)).transpose()
    }

    fn save(
        &self,
        identity: &str,
        record: &ProgressRecord,
        expected_version: Option<u64>,
    ) -> StoreResult<u64> {
        let parts = record.to_parts();
        let badges = serde_json::to_string(&parts.badges)?;
        let last_day = parts
            .last_activity_date
            .map(|d| d.format(DAY_FORMAT).to_string());
        let now = Utc::now().timestamp_millis();

        let conn = self.conn()?;
        let (changed, new_version) = match expected_version {
            Some(version) => {
                let changed = conn.execute(
                    r#"UPDATE progress SET
                           experience_points = ?2, level = ?3, current_streak = ?4,
                           longest_streak = ?5, last_activity_day = ?6, badges = ?7,
                           study_minutes = ?8, study_days = ?9,
                           version = version + 1, updated_at = ?10
                       WHERE identity = ?1 AND version = ?11"#,
                    rusqlite::params![
                        identity, parts.experience_points, record.level(), parts.current_streak,
                        parts.longest_streak, last_day, badges, parts.study_minutes,
                        parts.study_days, now, version,
                    ],
                )?;
                (changed, version + 1)
            }
            None => {
                let changed = conn.execute(
                    r#"INSERT OR IGNORE INTO progress
                           (identity, experience_points, level, current_streak, longest_streak,
                            last_activity_day, badges, study_minutes, study_days, version, updated_at)
                       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1, ?10)"#,
                    rusqlite::params![
                        identity, parts.experience_points, record.level(), parts.current_streak,
                        parts.longest_streak, last_day, badges, parts.study_minutes,
                        parts.study_days, now,
                    ],
                )?;
                (changed, 1)
            }
        };

        if changed == 0 {
            let found = Self::current_version(&conn, identity)?;
            return Err(StoreError::Conflict {
                identity: identity.to_string(),
                expected: expected_version,
                found,
            });
        }

        debug!(identity, version = new_version, "progress saved");
        Ok(new_version)
    }

    fn identities(&self) -> StoreResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT identity FROM progress ORDER BY identity")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}
