//! Core domain logic for Infine Focus, a daily pillar checklist.
//! This crate is the single source of truth for rollover and streak invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod engine;
pub mod ids;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::resolve_db_path;
pub use engine::rollover::{run_rollover, RolloverEngine, RolloverOutcome};
pub use engine::streak::{evaluate_streak, StreakOutcome};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::overflow::OverflowTask;
pub use model::pillar::{default_pillars, Pillar, PillarId, GENERAL_LIST_TITLE};
pub use model::state::{AppState, ListSelector};
pub use model::summary::{progress_percent, DaySummary, PillarProgress, TaskTally};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::state_repo::{RepoError, RepoResult, SqliteStateRepository, StateRepository};
pub use service::focus_service::{FocusError, FocusResult, FocusService};
pub use service::persistence::{
    decode_state, encode_state, PersistenceGateway, PersistenceReadError, STATE_STORAGE_KEY,
};
pub use store::overflow_ledger::{complete_overflow, delete_overflow, harvest, Harvest};
pub use store::task_store::{add_task, delete_task, reset_day, toggle_task};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
