//! Day-boundary engines.
//!
//! # Responsibility
//! - `rollover`: the once-per-activation midnight audit.
//! - `streak`: consecutive all-complete day counting and celebration signal.
//!
//! # Invariants
//! - Both engines are pure `AppState -> AppState` transitions; callers own
//!   persistence and sequencing.

pub mod rollover;
pub mod streak;
