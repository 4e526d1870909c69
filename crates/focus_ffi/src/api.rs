//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one sync function per checklist intent to Dart via FRB.
//! - Hold the single process-wide session so the midnight audit runs once
//!   per process activation.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every intent response carries the latest snapshot, even on failure.

use focus_core::db::open_db;
use focus_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, resolve_db_path,
    AppState, DaySummary, FocusError, FocusService, PillarId, PillarProgress,
    SqliteStateRepository, SystemClock, UuidGenerator,
};
use log::error;
use std::sync::{Mutex, MutexGuard};

type Session = FocusService<SqliteStateRepository, SystemClock, UuidGenerator>;

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Progress of one pillar card.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusPillarView {
    /// Stable selector accepted by the `focus_*_pillar_task` calls.
    pub id: String,
    pub title: String,
    pub total: u32,
    pub completed: u32,
    pub progress: f64,
}

impl From<&PillarProgress> for FocusPillarView {
    fn from(pillar: &PillarProgress) -> Self {
        Self {
            id: pillar.id.as_str().to_owned(),
            title: pillar.title.clone(),
            total: saturating_u32(pillar.total),
            completed: saturating_u32(pillar.completed),
            progress: pillar.progress,
        }
    }
}

/// Dashboard numbers flattened for Dart.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusSummaryView {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub global_progress: f64,
    pub overflow_count: u32,
    pub streak: u32,
    pub celebrate: bool,
    /// Fixed pillar order.
    pub pillars: Vec<FocusPillarView>,
}

impl From<&DaySummary> for FocusSummaryView {
    fn from(summary: &DaySummary) -> Self {
        Self {
            total_tasks: saturating_u32(summary.total_tasks),
            completed_tasks: saturating_u32(summary.completed_tasks),
            global_progress: summary.global_progress,
            overflow_count: saturating_u32(summary.overflow_count),
            streak: summary.streak,
            celebrate: summary.celebrate,
            pillars: summary.pillars.iter().map(FocusPillarView::from).collect(),
        }
    }
}

/// Response envelope shared by every checklist intent.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusResponse {
    /// Whether the intent was applied and saved.
    pub ok: bool,
    /// Human-readable diagnostics; empty on success.
    pub message: String,
    /// Latest `AppState` as the persisted JSON record.
    pub state_json: String,
    pub summary: FocusSummaryView,
}

impl FocusResponse {
    fn from_session(session: &Session, outcome: Result<(), String>) -> Self {
        let (ok, message) = match outcome {
            Ok(()) => (true, String::new()),
            Err(message) => (false, message),
        };
        Self {
            ok,
            message,
            state_json: snapshot_json(session.state()),
            summary: FocusSummaryView::from(&session.summary()),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            state_json: String::new(),
            summary: FocusSummaryView {
                total_tasks: 0,
                completed_tasks: 0,
                global_progress: 0.0,
                overflow_count: 0,
                streak: 0,
                celebrate: false,
                pillars: Vec::new(),
            },
        }
    }
}

/// Opens the session (running the midnight audit) and returns the snapshot.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Idempotent: later calls return the current snapshot without re-auditing.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_snapshot() -> FocusResponse {
    with_session(|_| Ok(()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_add_pillar_task(pillar_id: String, text: String) -> FocusResponse {
    with_session(|session| {
        let pillar = PillarId::parse(&pillar_id).map_err(|err| err.to_string())?;
        session
            .add_pillar_task(pillar, &text)
            .map(drop)
            .map_err(describe)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_add_general_task(text: String) -> FocusResponse {
    with_session(|session| session.add_general_task(&text).map(drop).map_err(describe))
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_toggle_pillar_task(pillar_id: String, task_id: String) -> FocusResponse {
    with_session(|session| {
        let pillar = PillarId::parse(&pillar_id).map_err(|err| err.to_string())?;
        session
            .toggle_pillar_task(pillar, &task_id)
            .map(drop)
            .map_err(describe)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_toggle_general_task(task_id: String) -> FocusResponse {
    with_session(|session| {
        session
            .toggle_general_task(&task_id)
            .map(drop)
            .map_err(describe)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_delete_pillar_task(pillar_id: String, task_id: String) -> FocusResponse {
    with_session(|session| {
        let pillar = PillarId::parse(&pillar_id).map_err(|err| err.to_string())?;
        session
            .delete_pillar_task(pillar, &task_id)
            .map(drop)
            .map_err(describe)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_delete_general_task(task_id: String) -> FocusResponse {
    with_session(|session| {
        session
            .delete_general_task(&task_id)
            .map(drop)
            .map_err(describe)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_complete_overflow(overflow_id: String) -> FocusResponse {
    with_session(|session| {
        session
            .complete_overflow(&overflow_id)
            .map(drop)
            .map_err(describe)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn focus_delete_overflow(overflow_id: String) -> FocusResponse {
    with_session(|session| {
        session
            .delete_overflow(&overflow_id)
            .map(drop)
            .map_err(describe)
    })
}

/// Unchecks every task for a same-day restart.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_reset_day() -> FocusResponse {
    with_session(|session| session.reset_day().map(drop).map_err(describe))
}

fn with_session(f: impl FnOnce(&mut Session) -> Result<(), String>) -> FocusResponse {
    let mut guard = lock_session();
    if guard.is_none() {
        match open_session() {
            Ok(session) => *guard = Some(session),
            Err(message) => return FocusResponse::failure(message),
        }
    }
    match guard.as_mut() {
        Some(session) => {
            let outcome = f(session);
            FocusResponse::from_session(session, outcome)
        }
        None => FocusResponse::failure("focus session unavailable"),
    }
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    // A panic inside a previous call must not wedge every later call.
    SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn open_session() -> Result<Session, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("focus DB open failed: {err}"))?;
    let repo = SqliteStateRepository::try_new(conn)
        .map_err(|err| format!("focus repo init failed: {err}"))?;
    // Left unset on failure; the next call retries the read.
    FocusService::start(repo, SystemClock, UuidGenerator)
        .map_err(|err| format!("focus session start failed: {err}"))
}

fn describe(err: FocusError) -> String {
    err.to_string()
}

fn snapshot_json(state: &AppState) -> String {
    match serde_json::to_string(state) {
        Ok(json) => json,
        Err(err) => {
            error!("event=ffi_snapshot module=ffi status=error error={err}");
            String::new()
        }
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
