//! study-progress - learner progress tracking
//!
//! Experience points, levels, daily study streaks and badges for a learning
//! platform. The rules live in a pure [`ProgressEngine`](progress::ProgressEngine)
//! that works on detached records; persistence sits behind the
//! [`ProgressStore`](store::ProgressStore) trait, and
//! [`ProgressManager`](manager::ProgressManager) runs the load/update/save
//! cycle for domain events such as logins, study sessions and quizzes.
//!
//! ```ignore
//! let store = Arc::new(SqliteStore::open_default()?);
//! let manager = ProgressManager::new(store, &Config::load()?);
//!
//! let events = manager.apply(
//!     "user@example.com",
//!     &ActivityEvent::StudySession { minutes: 45, date: None },
//!     progress::today(),
//! )?;
//! ```

pub mod config;
pub mod manager;
pub mod progress;
pub mod store;

pub use config::Config;
pub use manager::{ActivityEvent, ManagerError, ProgressManager};
pub use progress::{ProgressEngine, ProgressError, ProgressEvent, ProgressRecord, ProgressSnapshot};
pub use store::{MemoryStore, ProgressStore, SqliteStore, StoreError};
