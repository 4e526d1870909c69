//! Midnight audit: detect a crossed day boundary and archive missed tasks.
//!
//! # Invariants
//! - At most one audit per calendar date; a second run on the same date is a
//!   no-op.
//! - Every unchecked task present at audit time lands in the ledger.
//! - Harvest, reset and date advance are applied as one transition.
//! - Streak fields are never touched here.
//!
//! # Known limitation
//! - After a multi-day absence only one batch is produced, stamped with the
//!   last active date. Skipped days in between get no batch of their own.

use crate::clock::Clock;
use crate::ids::IdGenerator;
use crate::model::state::AppState;
use crate::store::overflow_ledger::harvest;
use chrono::NaiveDate;

/// Result of one audit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverOutcome {
    /// `last_active_date` already equals today.
    AlreadyAudited,
    /// Local clock reports a date before `last_active_date`; nothing changed.
    ClockBehind { last_active_date: NaiveDate },
    /// Day boundary crossed; unchecked tasks were archived.
    Audited {
        missed_date: NaiveDate,
        harvested: usize,
    },
}

impl RolloverOutcome {
    pub fn is_audited(self) -> bool {
        matches!(self, Self::Audited { .. })
    }
}

/// Runs the midnight audit against `today`.
///
/// Unchecked tasks are stamped with the previous `last_active_date`, the day
/// they were due, not the day they were discovered.
pub fn run_rollover(
    state: &AppState,
    today: NaiveDate,
    ids: &impl IdGenerator,
    clock: &impl Clock,
) -> (AppState, RolloverOutcome) {
    if state.last_active_date == today {
        return (state.clone(), RolloverOutcome::AlreadyAudited);
    }
    if today < state.last_active_date {
        return (
            state.clone(),
            RolloverOutcome::ClockBehind {
                last_active_date: state.last_active_date,
            },
        );
    }

    let missed_date = state.last_active_date;
    let batch = harvest(&state.pillars, &state.general_tasks, missed_date, ids, clock);
    let harvested = batch.overflow.len();

    let mut overflow_tasks = batch.overflow;
    overflow_tasks.extend(state.overflow_tasks.iter().cloned());

    let next = AppState {
        pillars: batch.pillars,
        general_tasks: batch.general_tasks,
        overflow_tasks,
        streak: state.streak,
        last_completed_date: state.last_completed_date,
        last_active_date: today,
    };

    (
        next,
        RolloverOutcome::Audited {
            missed_date,
            harvested,
        },
    )
}

/// Guards the audit so it fires once per process activation.
#[derive(Debug, Clone, Default)]
pub struct RolloverEngine {
    fired: Option<RolloverOutcome>,
}

impl RolloverEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the audit on first call; later calls return the first outcome and
    /// leave `state` untouched.
    pub fn activate(
        &mut self,
        state: &AppState,
        today: NaiveDate,
        ids: &impl IdGenerator,
        clock: &impl Clock,
    ) -> (AppState, RolloverOutcome) {
        if let Some(outcome) = self.fired {
            return (state.clone(), outcome);
        }
        let (next, outcome) = run_rollover(state, today, ids, clock);
        self.fired = Some(outcome);
        (next, outcome)
    }

    /// Outcome of the audit for this activation, if it has fired.
    pub fn outcome(&self) -> Option<RolloverOutcome> {
        self.fired
    }
}
