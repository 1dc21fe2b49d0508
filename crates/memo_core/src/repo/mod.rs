//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define the group/memo store contracts consumed by `MemoService`.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Stores only accept connections whose memo tables exist.
//! - Update/delete of a missing row is reported as `RepoError::NotFound`,
//!   never silently ignored.

use crate::db::DbError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod group_repo;
pub mod memo_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for group/memo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Row targeted by an update or delete does not exist.
    NotFound { table: &'static str, id: i64 },
    /// Connection has not been migrated to the memo schema.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "row not found in `{table}`: {id}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "memo repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted memo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
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

fn ensure_tables(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(*table));
        }
    }
    Ok(())
}
