//! Domain model for the daily pillar checklist.
//!
//! # Responsibility
//! - Define the persisted aggregate (`AppState`) and everything it owns.
//! - Define the derived read-model handed to presentation callers.
//!
//! # Invariants
//! - A task is owned by exactly one list (one pillar or the general list).
//! - The pillar set is fixed configuration; only pillar task lists mutate.
//! - `streak` and `last_completed_date` only change through the streak engine.

pub mod overflow;
pub mod pillar;
pub mod state;
pub mod summary;
pub mod task;
