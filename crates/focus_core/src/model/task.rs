//! Task domain model.
//!
//! # Responsibility
//! - Define the checklist item shared by pillar lists and the general list.
//! - Normalize and validate user-entered task text.
//!
//! # Invariants
//! - `text` is never blank and carries no leading/trailing whitespace.
//! - `id` is opaque and never reused for another task.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque identifier for tasks and overflow entries.
///
/// Kept as a string because persisted records from older builds carry
/// whatever identifier shape was generated at the time.
pub type TaskId = String;

/// Validation errors raised before a mutation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task text is empty after trim.
    EmptyText,
    /// Pillar selector does not name one of the fixed pillars.
    UnknownPillar(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be blank"),
            Self::UnknownPillar(value) => write!(f, "unknown pillar: `{value}`"),
        }
    }
}

impl Error for TaskValidationError {}

/// Checklist item for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates an unchecked task from raw user input.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyText` when `text` trims to empty.
    pub fn new(
        id: impl Into<TaskId>,
        text: &str,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        Ok(Self {
            id: id.into(),
            text: normalize_task_text(text)?,
            completed: false,
            created_at,
        })
    }

    /// Returns a copy with `completed` cleared.
    pub fn unchecked(&self) -> Self {
        Self {
            completed: false,
            ..self.clone()
        }
    }
}

/// Trims task input and rejects blank values.
pub fn normalize_task_text(text: &str) -> Result<String, TaskValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}
