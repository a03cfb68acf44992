//! Database operations and SQLite management for the study planner.
//!
//! This module provides low-level database operations for plans, tasks,
//! sessions, and the per-user pointer row. It handles SQLite connections,
//! schema management, and the specialized query interfaces per entity.
//!
//! All timestamps are stored as INTEGER epoch milliseconds (UTC) so range
//! scans and day bucketing work on plain integer comparisons. JSON payloads
//! (plan input, AI plan) are stored as TEXT.

use std::{path::Path, time::Duration};

use jiff::Timestamp;
use rusqlite::{types::Type, Connection, Transaction, TransactionBehavior};

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;
pub mod pointer_queries;
pub mod session_queries;
pub mod task_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(Duration::from_secs(5))
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Begins an immediate-mode transaction for a write path.
    ///
    /// Taking the write lock up front means a concurrent writer waits on the
    /// busy timeout instead of failing at commit after its reads went stale.
    pub(super) fn write_transaction(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")
    }
}

/// Reads an INTEGER epoch-millisecond column as a timestamp.
pub(crate) fn read_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    let ms: i64 = row.get(idx)?;
    Timestamp::from_millisecond(ms)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

/// Reads a nullable INTEGER epoch-millisecond column as a timestamp.
pub(crate) fn read_opt_timestamp(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<Option<Timestamp>> {
    let ms: Option<i64> = row.get(idx)?;
    ms.map(|ms| {
        Timestamp::from_millisecond(ms).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e))
        })
    })
    .transpose()
}

/// Reads a nullable TEXT column holding a JSON document.
pub(crate) fn read_opt_json(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<Option<serde_json::Value>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| {
        serde_json::from_str(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

/// Reads a TEXT column as one of the string-keyed domain enums.
pub(crate) fn read_enum<T>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Reads a nullable TEXT column as one of the string-keyed domain enums.
pub(crate) fn read_opt_enum<T>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| {
        raw.parse::<T>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
    })
    .transpose()
}
