//! Core use-case services.
//!
//! # Responsibility
//! - Compose pure transitions with persistence for presentation callers.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod focus_service;
pub mod persistence;
