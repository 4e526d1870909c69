//! Root application aggregate.
//!
//! # Responsibility
//! - Hold every persisted field in one serializable record.
//! - Provide list selection helpers shared by store and engines.
//!
//! # Invariants
//! - `last_active_date` never moves backwards.
//! - `streak >= 0` (enforced by the unsigned type).
//! - A task id appears in at most one list.

use crate::model::overflow::OverflowTask;
use crate::model::pillar::{default_pillars, Pillar, PillarId};
use crate::model::task::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Selects which task list an intent targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSelector {
    Pillar(PillarId),
    General,
}

/// Full persisted state for one installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub pillars: Vec<Pillar>,
    /// Most recently added first.
    pub general_tasks: Vec<Task>,
    /// Newest harvest batch first.
    pub overflow_tasks: Vec<OverflowTask>,
    pub streak: u32,
    pub last_completed_date: Option<NaiveDate>,
    pub last_active_date: NaiveDate,
}

impl AppState {
    /// First-run state: default pillars, empty lists, active as of `today`.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            pillars: default_pillars(),
            general_tasks: Vec::new(),
            overflow_tasks: Vec::new(),
            streak: 0,
            last_completed_date: None,
            last_active_date: today,
        }
    }

    /// Returns the task list addressed by `selector`, if present.
    pub fn tasks(&self, selector: ListSelector) -> Option<&[Task]> {
        match selector {
            ListSelector::General => Some(self.general_tasks.as_slice()),
            ListSelector::Pillar(id) => self
                .pillars
                .iter()
                .find(|pillar| pillar.id == id)
                .map(|pillar| pillar.tasks.as_slice()),
        }
    }

    /// Mutable variant of [`AppState::tasks`].
    ///
    /// Returns `None` when the stored state has no pillar with that id.
    pub fn tasks_mut(&mut self, selector: ListSelector) -> Option<&mut Vec<Task>> {
        match selector {
            ListSelector::General => Some(&mut self.general_tasks),
            ListSelector::Pillar(id) => self
                .pillars
                .iter_mut()
                .find(|pillar| pillar.id == id)
                .map(|pillar| &mut pillar.tasks),
        }
    }

    /// Iterates every task across pillars (fixed order) then the general list.
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.pillars
            .iter()
            .flat_map(|pillar| pillar.tasks.iter())
            .chain(self.general_tasks.iter())
    }
}
