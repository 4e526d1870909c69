//! Task list CRUD over pillar lists and the general list.
//!
//! # Invariants
//! - New tasks are prepended (most recent first).
//! - Toggle/delete preserve the relative order of remaining tasks.
//! - Validation failures leave the input state untouched.

use crate::clock::Clock;
use crate::ids::IdGenerator;
use crate::model::state::{AppState, ListSelector};
use crate::model::task::{normalize_task_text, Task, TaskValidationError};

/// Prepends a new unchecked task to the selected list.
///
/// A selector naming a pillar missing from stored state is a no-op.
///
/// # Errors
/// - `TaskValidationError::EmptyText` when `text` trims to empty.
pub fn add_task(
    state: &AppState,
    selector: ListSelector,
    text: &str,
    ids: &impl IdGenerator,
    clock: &impl Clock,
) -> Result<AppState, TaskValidationError> {
    let text = normalize_task_text(text)?;
    let task = Task {
        id: ids.next_id(),
        text,
        completed: false,
        created_at: clock.now_ms(),
    };
    let mut next = state.clone();
    if let Some(tasks) = next.tasks_mut(selector) {
        tasks.insert(0, task);
    }
    Ok(next)
}

/// Flips `completed` on the matching task.
pub fn toggle_task(state: &AppState, selector: ListSelector, task_id: &str) -> AppState {
    let mut next = state.clone();
    if let Some(tasks) = next.tasks_mut(selector) {
        for task in tasks.iter_mut().filter(|task| task.id == task_id) {
            task.completed = !task.completed;
        }
    }
    next
}

/// Removes the matching task from the selected list.
pub fn delete_task(state: &AppState, selector: ListSelector, task_id: &str) -> AppState {
    let mut next = state.clone();
    if let Some(tasks) = next.tasks_mut(selector) {
        tasks.retain(|task| task.id != task_id);
    }
    next
}

/// Unchecks every task in every list.
///
/// Ledger, streak and `last_active_date` are left alone; this restarts the
/// same calendar day's checklist.
pub fn reset_day(state: &AppState) -> AppState {
    let mut next = state.clone();
    uncheck_all(&mut next);
    next
}

pub(crate) fn uncheck_all(state: &mut AppState) {
    for pillar in &mut state.pillars {
        for task in &mut pillar.tasks {
            task.completed = false;
        }
    }
    for task in &mut state.general_tasks {
        task.completed = false;
    }
}
