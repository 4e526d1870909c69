//! Pure state transitions over task lists and the overflow ledger.
//!
//! # Responsibility
//! - Apply one user intent to an `AppState` and return the next state.
//! - Keep persistence and streak evaluation out of list bookkeeping.
//!
//! # Invariants
//! - Inputs are never mutated; every function returns a fresh state.
//! - Unknown ids are silent no-ops, not errors.

pub mod overflow_ledger;
pub mod task_store;
