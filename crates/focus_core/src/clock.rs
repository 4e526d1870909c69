//! Injected time source.
//!
//! # Responsibility
//! - Provide the local calendar date used for day-boundary detection.
//! - Provide wall-clock timestamps stamped onto new records.
//!
//! # Invariants
//! - `today()` uses the local wall-clock calendar; no timezone scheduling.

use chrono::{Local, NaiveDate, Utc};
use std::cell::Cell;

/// Represents the entity providing dates to the core, so tests can pin time.
pub trait Clock {
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;

    /// Current time as Unix epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually driven clock for tests and deterministic callers.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
    now_ms: Cell<i64>,
}

impl FixedClock {
    pub fn new(today: NaiveDate, now_ms: i64) -> Self {
        Self {
            today: Cell::new(today),
            now_ms: Cell::new(now_ms),
        }
    }

    /// Moves the calendar to `today`.
    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }

    pub fn set_now_ms(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}
