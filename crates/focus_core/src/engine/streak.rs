//! Consecutive-day completion streak.
//!
//! # Invariants
//! - An empty day (no tasks at all) is never complete.
//! - The streak advances at most once per calendar date.
//! - This path never decrements or clears `streak`/`last_completed_date`;
//!   a broken streak restarts at 1 on the next complete day.

use crate::model::state::AppState;
use crate::model::summary::TaskTally;
use chrono::NaiveDate;

/// Result of one streak evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakOutcome {
    /// Every current task is checked.
    pub celebrate: bool,
    /// `streak`/`last_completed_date` were written by this evaluation.
    pub advanced: bool,
}

/// Re-evaluates completion after any task list change.
pub fn evaluate_streak(state: &AppState, today: NaiveDate) -> (AppState, StreakOutcome) {
    let tally = TaskTally::of(state.all_tasks());
    if !tally.is_all_complete() {
        return (
            state.clone(),
            StreakOutcome {
                celebrate: false,
                advanced: false,
            },
        );
    }

    if state.last_completed_date == Some(today) {
        return (
            state.clone(),
            StreakOutcome {
                celebrate: true,
                advanced: false,
            },
        );
    }

    let mut next = state.clone();
    next.streak = next_streak(state.streak, state.last_completed_date, today);
    next.last_completed_date = Some(today);
    (
        next,
        StreakOutcome {
            celebrate: true,
            advanced: true,
        },
    )
}

/// Streak value for a day completed on `today`, which is not yet counted.
fn next_streak(streak: u32, last_completed: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match (last_completed, today.pred_opt()) {
        (Some(last), Some(yesterday)) if last == yesterday => streak.saturating_add(1),
        _ => 1,
    }
}
