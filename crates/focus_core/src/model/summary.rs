//! Derived read-model for presentation callers.
//!
//! Nothing here is persisted; every value is recomputed from `AppState`.

use crate::model::pillar::PillarId;
use crate::model::state::AppState;
use crate::model::task::Task;
use serde::Serialize;

/// Completion counts over a set of tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskTally {
    pub total: usize,
    pub completed: usize,
}

impl TaskTally {
    pub fn of<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut tally, task| {
            tally.total += 1;
            if task.completed {
                tally.completed += 1;
            }
            tally
        })
    }

    /// Completed fraction in `0.0..=1.0`; `0.0` for an empty set.
    pub fn progress(self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    /// True only for a non-empty set with every task checked.
    ///
    /// An empty day never counts as complete.
    pub fn is_all_complete(self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Progress of one pillar checklist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarProgress {
    pub id: PillarId,
    pub title: String,
    pub total: usize,
    pub completed: usize,
    pub progress: f64,
}

/// Dashboard numbers for the current day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub global_progress: f64,
    pub overflow_count: usize,
    pub streak: u32,
    pub celebrate: bool,
    pub pillars: Vec<PillarProgress>,
}

impl DaySummary {
    pub fn from_state(state: &AppState, celebrate: bool) -> Self {
        let tally = TaskTally::of(state.all_tasks());
        let pillars = state
            .pillars
            .iter()
            .map(|pillar| {
                let pillar_tally = TaskTally::of(&pillar.tasks);
                PillarProgress {
                    id: pillar.id,
                    title: pillar.title.clone(),
                    total: pillar_tally.total,
                    completed: pillar_tally.completed,
                    progress: pillar_tally.progress(),
                }
            })
            .collect();

        Self {
            total_tasks: tally.total,
            completed_tasks: tally.completed,
            global_progress: tally.progress(),
            overflow_count: state.overflow_tasks.len(),
            streak: state.streak,
            celebrate,
            pillars,
        }
    }
}

/// Rounds a `0.0..=1.0` progress value to a whole display percentage.
pub fn progress_percent(progress: f64) -> u32 {
    (progress.clamp(0.0, 1.0) * 100.0).round() as u32
}
