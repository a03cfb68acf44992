//! Per-user pointer reads and merge-scoped writes.
//!
//! The users table holds one row per user caching the active plan and the
//! running session. Writes are merge-scoped upserts: each write touches only
//! the columns it names, so a plan pointer update never disturbs the session
//! pointer and vice versa.

use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    error::{Result, StudyError},
    models::{SessionMode, UserPointer},
};

// Optimized SQL queries as const strings for compile-time optimization
const SELECT_POINTER_SQL: &str = "SELECT id, active_plan_id, active_session_id, active_session_started_at_ms, active_session_mode FROM users WHERE id = ?1";
const UPSERT_PLAN_POINTER_SQL: &str = "INSERT INTO users (id, active_plan_id) VALUES (?1, ?2) ON CONFLICT(id) DO UPDATE SET active_plan_id = excluded.active_plan_id";
const UPSERT_SESSION_POINTER_SQL: &str = "INSERT INTO users (id, active_session_id, active_session_started_at_ms, active_session_mode) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(id) DO UPDATE SET active_session_id = excluded.active_session_id, active_session_started_at_ms = excluded.active_session_started_at_ms, active_session_mode = excluded.active_session_mode";

impl super::Database {
    /// Helper function to construct a UserPointer from a database row
    fn build_pointer_from_row(row: &rusqlite::Row) -> rusqlite::Result<UserPointer> {
        Ok(UserPointer {
            user_id: row.get(0)?,
            active_plan_id: row.get(1)?,
            active_session_id: row.get(2)?,
            active_session_started_at_ms: row.get(3)?,
            active_session_mode: super::read_opt_enum(row, 4)?,
        })
    }

    /// Reads the pointer row inside an existing transaction or connection.
    pub(super) fn pointer_row(conn: &Connection, user_id: &str) -> Result<Option<UserPointer>> {
        conn.query_row(SELECT_POINTER_SQL, params![user_id], |row| {
            Self::build_pointer_from_row(row)
        })
        .optional()
        .map_err(|e| StudyError::database_error("Failed to query user pointer", e))
    }

    /// Writes only the plan half of the pointer.
    pub(super) fn upsert_plan_pointer(
        conn: &Connection,
        user_id: &str,
        plan_id: Option<i64>,
    ) -> Result<()> {
        conn.execute(UPSERT_PLAN_POINTER_SQL, params![user_id, plan_id])
            .map_err(|e| StudyError::database_error("Failed to update plan pointer", e))?;
        Ok(())
    }

    /// Writes only the session half of the pointer.
    pub(super) fn upsert_session_pointer(
        conn: &Connection,
        user_id: &str,
        session: Option<(i64, i64, SessionMode)>,
    ) -> Result<()> {
        let (session_id, started_at_ms, mode) = match session {
            Some((id, ms, mode)) => (Some(id), Some(ms), Some(mode.as_str())),
            None => (None, None, None),
        };
        conn.execute(
            UPSERT_SESSION_POINTER_SQL,
            params![user_id, session_id, started_at_ms, mode],
        )
        .map_err(|e| StudyError::database_error("Failed to update session pointer", e))?;
        Ok(())
    }

    /// Retrieves the pointer row for a user, if it exists.
    pub fn get_pointer(&self, user_id: &str) -> Result<Option<UserPointer>> {
        Self::pointer_row(&self.connection, user_id)
    }

    /// Points the user's active plan cache at the given plan.
    pub fn set_plan_pointer(&mut self, user_id: &str, plan_id: Option<i64>) -> Result<()> {
        Self::upsert_plan_pointer(&self.connection, user_id, plan_id)
    }

    /// Points the user's running session cache at the given session.
    pub fn set_session_pointer(
        &mut self,
        user_id: &str,
        session: Option<(i64, i64, SessionMode)>,
    ) -> Result<()> {
        Self::upsert_session_pointer(&self.connection, user_id, session)
    }
}
