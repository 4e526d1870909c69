//! Injected unique-id generation.

use crate::model::task::TaskId;
use std::cell::Cell;
use uuid::Uuid;

/// Produces fresh opaque ids for tasks and overflow entries.
pub trait IdGenerator {
    fn next_id(&self) -> TaskId;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> TaskId {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` ids, starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> TaskId {
        let value = self.next.get();
        self.next.set(value + 1);
        format!("{}-{value}", self.prefix)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> TaskId {
        (**self).next_id()
    }
}
