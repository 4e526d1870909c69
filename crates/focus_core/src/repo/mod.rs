//! Repository layer over the durable key-value store.
//!
//! # Responsibility
//! - Define the record-level storage contract used by the persistence gateway.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Records are opaque strings here; encoding lives in the gateway.

pub mod state_repo;
