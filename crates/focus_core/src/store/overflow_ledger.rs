//! Overflow ledger: archive of tasks missed on their due day.
//!
//! # Invariants
//! - Harvest visits pillars in fixed order, then the general list, keeping
//!   inner task order.
//! - Completing and deleting an entry have the same effect: it is removed.
//!   There is no completed-history sub-list.

use crate::clock::Clock;
use crate::ids::IdGenerator;
use crate::model::overflow::OverflowTask;
use crate::model::pillar::{Pillar, GENERAL_LIST_TITLE};
use crate::model::state::AppState;
use crate::model::task::Task;
use chrono::NaiveDate;

/// Output of one harvest pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harvest {
    /// Input pillars with every task unchecked.
    pub pillars: Vec<Pillar>,
    /// Input general list with every task unchecked.
    pub general_tasks: Vec<Task>,
    /// One entry per unchecked input task, in discovery order.
    pub overflow: Vec<OverflowTask>,
}

/// Collects unchecked tasks into overflow entries stamped with `missed_date`.
///
/// Pure apart from fresh ids/timestamps: the same inputs always harvest the
/// same texts, origins and dates.
pub fn harvest(
    pillars: &[Pillar],
    general_tasks: &[Task],
    missed_date: NaiveDate,
    ids: &impl IdGenerator,
    clock: &impl Clock,
) -> Harvest {
    let archived_at = clock.now_ms();
    let archive = |task: &Task, origin: &str| OverflowTask {
        id: ids.next_id(),
        text: task.text.clone(),
        origin_pillar_title: origin.to_string(),
        date_missed: missed_date,
        created_at: archived_at,
    };

    let mut overflow = Vec::new();
    for pillar in pillars {
        overflow.extend(
            pillar
                .tasks
                .iter()
                .filter(|task| !task.completed)
                .map(|task| archive(task, pillar.title.as_str())),
        );
    }
    overflow.extend(
        general_tasks
            .iter()
            .filter(|task| !task.completed)
            .map(|task| archive(task, GENERAL_LIST_TITLE)),
    );

    Harvest {
        pillars: pillars
            .iter()
            .map(|pillar| Pillar {
                tasks: pillar.tasks.iter().map(Task::unchecked).collect(),
                ..pillar.clone()
            })
            .collect(),
        general_tasks: general_tasks.iter().map(Task::unchecked).collect(),
        overflow,
    }
}

/// Marks an overflow entry done, which removes it from the ledger.
pub fn complete_overflow(state: &AppState, overflow_id: &str) -> AppState {
    remove_overflow(state, overflow_id)
}

/// Discards an overflow entry.
pub fn delete_overflow(state: &AppState, overflow_id: &str) -> AppState {
    remove_overflow(state, overflow_id)
}

fn remove_overflow(state: &AppState, overflow_id: &str) -> AppState {
    let mut next = state.clone();
    next.overflow_tasks.retain(|entry| entry.id != overflow_id);
    next
}
