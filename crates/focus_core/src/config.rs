//! Runtime configuration for hosts embedding the core.
//!
//! # Invariants
//! - An empty or whitespace-only override is treated as unset.

use std::path::PathBuf;

/// Environment variable overriding the state database location.
pub const DB_PATH_ENV: &str = "FOCUS_DB_PATH";

/// File name used under the temp directory when no override is set.
pub const DEFAULT_DB_FILE_NAME: &str = "infine_focus.sqlite3";

/// Resolves the state database path from the process environment.
pub fn resolve_db_path() -> PathBuf {
    db_path_from(std::env::var(DB_PATH_ENV).ok())
}

/// Resolves the state database path from an optional override value.
pub fn db_path_from(raw: Option<String>) -> PathBuf {
    raw.as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}
