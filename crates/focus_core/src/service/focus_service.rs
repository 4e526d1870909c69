//! Session orchestration for the daily checklist.
//!
//! # Responsibility
//! - Own the in-memory `AppState` for one process activation.
//! - Sequence every intent as: transition -> streak re-evaluation -> save.
//! - Run the midnight audit before the first intent can be applied.
//!
//! # Invariants
//! - `start` finishes the audit (harvest + reset + date advance) before any
//!   caller can reach a mutation entry point.
//! - Validation failures leave state untouched and skip persistence.
//! - A session is only built from a record that was actually read (or is
//!   known to be absent or corrupt), so a storage read failure never gets
//!   written over with defaults.
//! - Save failures never roll back or corrupt the committed in-memory state.

use crate::clock::Clock;
use crate::engine::rollover::{RolloverEngine, RolloverOutcome};
use crate::engine::streak::evaluate_streak;
use crate::ids::IdGenerator;
use crate::model::pillar::PillarId;
use crate::model::state::{AppState, ListSelector};
use crate::model::summary::DaySummary;
use crate::model::task::TaskValidationError;
use crate::repo::state_repo::{RepoError, StateRepository};
use crate::service::persistence::PersistenceGateway;
use crate::store::{overflow_ledger, task_store};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FocusResult<T> = Result<T, FocusError>;

/// Service error for checklist intents.
#[derive(Debug)]
pub enum FocusError {
    /// Stored state could not be read; no session was started.
    Load(RepoError),
    /// Intent rejected before any change was applied.
    Validation(TaskValidationError),
    /// State changed in memory but could not be written through.
    Persist(RepoError),
}

impl Display for FocusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "state not loaded: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "state not saved: {err}"),
        }
    }
}

impl Error for FocusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for FocusError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for FocusError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

/// Single-writer session over persisted checklist state.
pub struct FocusService<R: StateRepository, C: Clock, G: IdGenerator> {
    gateway: PersistenceGateway<R>,
    clock: C,
    ids: G,
    rollover: RolloverEngine,
    state: AppState,
    celebrate: bool,
}

impl<R: StateRepository, C: Clock, G: IdGenerator> FocusService<R, C, G> {
    /// Loads persisted state and runs activation.
    ///
    /// Missing or corrupt records start from defaults. A failed initial save is
    /// only logged, leaving the session usable in memory.
    ///
    /// # Errors
    /// - `FocusError::Load` when the record could not be read. Nothing is
    ///   written, so a later start can still pick the record up.
    pub fn start(repo: R, clock: C, ids: G) -> FocusResult<Self> {
        let gateway = PersistenceGateway::new(repo);
        let state = gateway.load(clock.today()).map_err(FocusError::Load)?;
        let mut service = Self {
            gateway,
            clock,
            ids,
            rollover: RolloverEngine::new(),
            state,
            celebrate: false,
        };
        service.activate();
        Ok(service)
    }

    /// Runs the midnight audit (once per session) and re-evaluates the streak.
    ///
    /// Repeated calls within the same session do not audit again.
    pub fn activate(&mut self) -> RolloverOutcome {
        let today = self.clock.today();
        let (audited, outcome) =
            self.rollover
                .activate(&self.state, today, &self.ids, &self.clock);
        match outcome {
            RolloverOutcome::Audited {
                missed_date,
                harvested,
            } => info!(
                "event=midnight_audit module=service status=ok missed_date={} harvested={} today={}",
                missed_date, harvested, today
            ),
            RolloverOutcome::AlreadyAudited => {
                debug!("event=midnight_audit module=service status=skipped today={today}")
            }
            RolloverOutcome::ClockBehind { last_active_date } => warn!(
                "event=midnight_audit module=service status=skipped reason=clock_behind last_active_date={} today={}",
                last_active_date, today
            ),
        }

        let (next, streak) = evaluate_streak(&audited, today);
        self.log_streak(streak.advanced, &next);
        self.celebrate = streak.celebrate;
        self.state = next;
        // Written even when unchanged: replaces a missing or discarded record.
        let _ = self.gateway.save(&self.state);
        outcome
    }

    /// Outcome of this session's midnight audit.
    pub fn rollover_outcome(&self) -> Option<RolloverOutcome> {
        self.rollover.outcome()
    }

    /// Current state snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// True exactly when every current task is checked.
    pub fn celebrate(&self) -> bool {
        self.celebrate
    }

    /// Derived dashboard read-model.
    pub fn summary(&self) -> DaySummary {
        DaySummary::from_state(&self.state, self.celebrate)
    }

    /// Adds a task to any list.
    ///
    /// # Errors
    /// - `FocusError::Validation` for blank text; nothing is saved.
    /// - `FocusError::Persist` when the write-through failed.
    pub fn add_task(&mut self, selector: ListSelector, text: &str) -> FocusResult<AppState> {
        let next = match task_store::add_task(&self.state, selector, text, &self.ids, &self.clock)
        {
            Ok(next) => next,
            Err(err) => {
                warn!("event=task_add module=service status=rejected reason={err}");
                return Err(err.into());
            }
        };
        self.apply_task_change(next)
    }

    pub fn add_pillar_task(&mut self, pillar: PillarId, text: &str) -> FocusResult<AppState> {
        self.add_task(ListSelector::Pillar(pillar), text)
    }

    pub fn add_general_task(&mut self, text: &str) -> FocusResult<AppState> {
        self.add_task(ListSelector::General, text)
    }

    /// Flips completion of a task; unknown ids are a no-op.
    pub fn toggle_task(&mut self, selector: ListSelector, task_id: &str) -> FocusResult<AppState> {
        let next = task_store::toggle_task(&self.state, selector, task_id);
        self.apply_task_change(next)
    }

    pub fn toggle_pillar_task(&mut self, pillar: PillarId, task_id: &str) -> FocusResult<AppState> {
        self.toggle_task(ListSelector::Pillar(pillar), task_id)
    }

    pub fn toggle_general_task(&mut self, task_id: &str) -> FocusResult<AppState> {
        self.toggle_task(ListSelector::General, task_id)
    }

    /// Deletes a task; unknown ids are a no-op.
    pub fn delete_task(&mut self, selector: ListSelector, task_id: &str) -> FocusResult<AppState> {
        let next = task_store::delete_task(&self.state, selector, task_id);
        self.apply_task_change(next)
    }

    pub fn delete_pillar_task(&mut self, pillar: PillarId, task_id: &str) -> FocusResult<AppState> {
        self.delete_task(ListSelector::Pillar(pillar), task_id)
    }

    pub fn delete_general_task(&mut self, task_id: &str) -> FocusResult<AppState> {
        self.delete_task(ListSelector::General, task_id)
    }

    /// Clears an overflow entry as done.
    pub fn complete_overflow(&mut self, overflow_id: &str) -> FocusResult<AppState> {
        let next = overflow_ledger::complete_overflow(&self.state, overflow_id);
        self.commit(next)
    }

    /// Discards an overflow entry.
    pub fn delete_overflow(&mut self, overflow_id: &str) -> FocusResult<AppState> {
        let next = overflow_ledger::delete_overflow(&self.state, overflow_id);
        self.commit(next)
    }

    /// Unchecks every task and clears the celebration signal.
    ///
    /// Ledger, streak and active date are left alone.
    pub fn reset_day(&mut self) -> FocusResult<AppState> {
        let next = task_store::reset_day(&self.state);
        let result = self.apply_task_change(next);
        self.celebrate = false;
        result
    }

    fn apply_task_change(&mut self, next: AppState) -> FocusResult<AppState> {
        let (next, streak) = evaluate_streak(&next, self.clock.today());
        self.log_streak(streak.advanced, &next);
        self.celebrate = streak.celebrate;
        self.commit(next)
    }

    fn commit(&mut self, next: AppState) -> FocusResult<AppState> {
        if next == self.state {
            return Ok(next);
        }
        self.state = next;
        self.gateway.save(&self.state)?;
        Ok(self.state.clone())
    }

    fn log_streak(&self, advanced: bool, next: &AppState) {
        if advanced {
            info!(
                "event=streak_update module=service status=ok streak={} last_completed_date={}",
                next.streak,
                next.last_completed_date
                    .map(|date| date.to_string())
                    .unwrap_or_default()
            );
        }
    }
}
