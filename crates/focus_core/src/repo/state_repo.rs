//! Key-value record repository and SQLite implementation.
//!
//! # Invariants
//! - One row per key; writes replace the whole value.
//! - The connection must carry the current layout before use.

use crate::db::{schema_version, DbError, SCHEMA_VERSION};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for record reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// In-memory state could not be encoded for storage.
    Serialize(serde_json::Error),
    /// Connection was not opened through `open_db`/`open_db_in_memory`.
    SchemaNotReady { db_version: u32, required: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode state record: {err}"),
            Self::SchemaNotReady {
                db_version,
                required,
            } => write!(
                f,
                "database schema version {db_version} is older than required {required}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::SchemaNotReady { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Record storage contract: load whole value by key, replace whole value.
pub trait StateRepository {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>>;
    fn write_record(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed key-value repository.
///
/// Owns its connection so a long-lived session can hold it.
pub struct SqliteStateRepository {
    conn: Connection,
}

impl SqliteStateRepository {
    /// Wraps a connection prepared by `open_db`.
    ///
    /// # Errors
    /// - `RepoError::SchemaNotReady` when the layout was never created.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let db_version = schema_version(&conn)?;
        let required = SCHEMA_VERSION;
        if db_version < required {
            return Err(RepoError::SchemaNotReady {
                db_version,
                required,
            });
        }
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl StateRepository for SqliteStateRepository {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_record(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

impl<R: StateRepository + ?Sized> StateRepository for &R {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_record(key)
    }

    fn write_record(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_record(key, value)
    }
}
