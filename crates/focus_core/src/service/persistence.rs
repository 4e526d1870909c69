//! Persistence gateway: load-on-start, save-after-mutation.
//!
//! # Responsibility
//! - Encode/decode the whole `AppState` record under one versioned key.
//! - Migrate partial records from older builds into the current shape.
//! - Degrade unparseable records to first-run defaults without surfacing errors.
//!
//! # Invariants
//! - Missing fields take first-run defaults; present fields are kept as-is.
//! - A corrupt record is logged and discarded, never raised to the caller.
//! - A failed storage read is returned, never mistaken for an empty record.

use crate::model::overflow::OverflowTask;
use crate::model::pillar::{default_pillars, Pillar};
use crate::model::state::AppState;
use crate::model::task::Task;
use crate::repo::state_repo::{RepoError, RepoResult, StateRepository};
use chrono::NaiveDate;
use log::{error, info, warn};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the state record. Bump the suffix on breaking shape changes.
pub const STATE_STORAGE_KEY: &str = "infine-focus-data-v1";

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Failure to read a usable state record.
///
/// `Parse` is recovered by the gateway; `Repo` is handed back to the caller.
#[derive(Debug)]
pub enum PersistenceReadError {
    Repo(RepoError),
    Parse(serde_json::Error),
}

impl Display for PersistenceReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "unparseable state record: {err}"),
        }
    }
}

impl Error for PersistenceReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<RepoError> for PersistenceReadError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for PersistenceReadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Record shape accepted from storage, tolerant of older partial writes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    pillars: Option<Vec<Pillar>>,
    general_tasks: Option<Vec<Task>>,
    overflow_tasks: Option<Vec<OverflowTask>>,
    streak: Option<i64>,
    last_completed_date: Option<String>,
    last_active_date: Option<String>,
}

impl StoredState {
    fn into_app_state(self, today: NaiveDate) -> AppState {
        let last_active_date = match parse_wire_date(self.last_active_date.as_deref()) {
            Some(date) => date,
            None => {
                if self.last_active_date.is_some() {
                    warn!("event=state_migrate module=persistence status=fallback field=lastActiveDate");
                }
                today
            }
        };

        AppState {
            pillars: self.pillars.unwrap_or_else(default_pillars),
            general_tasks: self.general_tasks.unwrap_or_default(),
            overflow_tasks: self.overflow_tasks.unwrap_or_default(),
            streak: self
                .streak
                .map_or(0, |value| u32::try_from(value.max(0)).unwrap_or(u32::MAX)),
            last_completed_date: parse_wire_date(self.last_completed_date.as_deref()),
            last_active_date,
        }
    }
}

fn parse_wire_date(value: Option<&str>) -> Option<NaiveDate> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT).ok())
}

/// Decodes a stored record, filling absent fields with first-run defaults.
///
/// # Errors
/// - `PersistenceReadError::Parse` when `raw` is not a JSON object of the
///   expected shape.
pub fn decode_state(raw: &str, today: NaiveDate) -> Result<AppState, PersistenceReadError> {
    let stored: StoredState = serde_json::from_str(raw)?;
    Ok(stored.into_app_state(today))
}

/// Encodes the full state record.
pub fn encode_state(state: &AppState) -> RepoResult<String> {
    Ok(serde_json::to_string(state)?)
}

/// Whole-record load/save over a key-value repository.
pub struct PersistenceGateway<R: StateRepository> {
    repo: R,
    key: String,
}

impl<R: StateRepository> PersistenceGateway<R> {
    /// Creates a gateway using the default storage key.
    pub fn new(repo: R) -> Self {
        Self::with_key(repo, STATE_STORAGE_KEY)
    }

    pub fn with_key(repo: R, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Reads and decodes the stored record, if any.
    pub fn try_load(&self, today: NaiveDate) -> Result<Option<AppState>, PersistenceReadError> {
        match self.repo.read_record(&self.key)? {
            Some(raw) => decode_state(&raw, today).map(Some),
            None => Ok(None),
        }
    }

    /// Loads the stored state, falling back to first-run defaults when the
    /// record is missing or unparseable.
    ///
    /// # Errors
    /// - The repository error when the record could not be read at all. The
    ///   stored record may still be intact, so callers must not overwrite it.
    ///
    /// # Side effects
    /// - Emits `state_load` logging events.
    pub fn load(&self, today: NaiveDate) -> RepoResult<AppState> {
        match self.try_load(today) {
            Ok(Some(state)) => {
                info!(
                    "event=state_load module=persistence status=ok overflow_count={} streak={} last_active_date={}",
                    state.overflow_tasks.len(),
                    state.streak,
                    state.last_active_date
                );
                Ok(state)
            }
            Ok(None) => {
                info!("event=state_load module=persistence status=empty fallback=defaults");
                Ok(AppState::initial(today))
            }
            Err(PersistenceReadError::Parse(err)) => {
                error!(
                    "event=state_load module=persistence status=error fallback=defaults error={}",
                    err
                );
                Ok(AppState::initial(today))
            }
            Err(PersistenceReadError::Repo(err)) => {
                error!(
                    "event=state_load module=persistence status=error fallback=none error={}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Replaces the stored record with `state`.
    pub fn save(&self, state: &AppState) -> RepoResult<()> {
        let raw = encode_state(state)?;
        match self.repo.write_record(&self.key, &raw) {
            Ok(()) => {
                info!(
                    "event=state_save module=persistence status=ok bytes={}",
                    raw.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=state_save module=persistence status=error error={}",
                    err
                );
                Err(err)
            }
        }
    }
}
