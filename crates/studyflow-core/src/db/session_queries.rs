//! Session lifecycle writes and range reads.
//!
//! The session log is append-only: rows are inserted in the running state
//! and only their terminal columns are ever written afterwards. The start
//! path runs as one transaction over the pointer row and the session table,
//! so the check for an existing running session and the insert of a new one
//! cannot interleave between two callers on the same database.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, StudyError},
    models::{Session, SessionMode, SessionStatus},
    params::StartSession,
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_SESSION_SQL: &str = "INSERT INTO sessions (user_id, plan_id, task_id, mode, status, started_at, planned_minutes, scaled_minutes, subject, burnout_score_at_start) VALUES (?1, ?2, ?3, ?4, 'running', ?5, ?6, ?7, ?8, ?9)";
const SELECT_SESSION_SQL: &str = "SELECT id, user_id, plan_id, task_id, mode, status, started_at, ended_at, duration_minutes, planned_minutes, scaled_minutes, subject, burnout_score_at_start, burnout_score_at_end, completed FROM sessions WHERE id = ?1";
const SELECT_SESSIONS_RANGE_SQL: &str = "SELECT id, user_id, plan_id, task_id, mode, status, started_at, ended_at, duration_minutes, planned_minutes, scaled_minutes, subject, burnout_score_at_start, burnout_score_at_end, completed FROM sessions WHERE user_id = ?1 AND started_at >= ?2 AND started_at < ?3 ORDER BY started_at ASC, id ASC";
const END_SESSION_SQL: &str = "UPDATE sessions SET status = ?2, ended_at = ?3, duration_minutes = ?4, completed = ?5, burnout_score_at_end = COALESCE(?6, burnout_score_at_end) WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a Session from a database row
    fn build_session_from_row(row: &rusqlite::Row) -> rusqlite::Result<Session> {
        Ok(Session {
            id: row.get(0)?,
            user_id: row.get(1)?,
            plan_id: row.get(2)?,
            task_id: row.get(3)?,
            mode: super::read_enum::<SessionMode>(row, 4)?,
            status: super::read_enum::<SessionStatus>(row, 5)?,
            started_at: super::read_timestamp(row, 6)?,
            ended_at: super::read_opt_timestamp(row, 7)?,
            duration_minutes: row.get(8)?,
            planned_minutes: row.get(9)?,
            scaled_minutes: row.get(10)?,
            subject: row.get(11)?,
            burnout_score_at_start: row.get(12)?,
            burnout_score_at_end: row.get(13)?,
            completed: row.get(14)?,
        })
    }

    /// Retrieves a session by its ID.
    pub fn get_session(&self, session_id: i64) -> Result<Option<Session>> {
        self.connection
            .query_row(SELECT_SESSION_SQL, params![session_id], |row| {
                Self::build_session_from_row(row)
            })
            .optional()
            .map_err(|e| StudyError::database_error("Failed to query session", e))
    }

    /// Starts a focus session, reusing an already running one.
    ///
    /// One transaction covers the whole check-then-write: when the user's
    /// pointer names a session still in the running state that session is
    /// returned with `reused = true` and nothing is written. Otherwise any
    /// stale pointer is cleared, a new running row is inserted, and the
    /// pointer is set to it. Returns `(session, reused)`.
    pub fn start_session(
        &mut self,
        user_id: &str,
        params: &StartSession,
        mode: SessionMode,
        burnout_score_at_start: Option<u8>,
        now: Timestamp,
    ) -> Result<(Session, bool)> {
        let now_ms = now.as_millisecond();
        let tx = self.write_transaction()?;

        if let Some(pointer) = Self::pointer_row(&tx, user_id)? {
            if let Some(session_id) = pointer.active_session_id {
                let existing = tx
                    .query_row(SELECT_SESSION_SQL, params![session_id], |row| {
                        Self::build_session_from_row(row)
                    })
                    .optional()
                    .map_err(|e| StudyError::database_error("Failed to query session", e))?;
                if let Some(session) = existing {
                    if session.user_id == user_id && session.status == SessionStatus::Running {
                        return Ok((session, true));
                    }
                }
                // Pointer names a missing or terminal session
                Self::upsert_session_pointer(&tx, user_id, None)?;
            }
        }

        let plan = tx
            .query_row(
                "SELECT user_id FROM plans WHERE id = ?1",
                params![params.plan_id],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| StudyError::database_error("Failed to query plan", e))?
            .ok_or(StudyError::PlanNotFound { id: params.plan_id })?;
        if plan != user_id {
            return Err(StudyError::forbidden_plan(params.plan_id));
        }

        tx.execute(
            INSERT_SESSION_SQL,
            params![
                user_id,
                params.plan_id,
                params.task_id,
                mode.as_str(),
                now_ms,
                params.planned_minutes,
                params.scaled_minutes,
                params.subject,
                burnout_score_at_start
            ],
        )
        .map_err(|e| StudyError::database_error("Failed to insert session", e))?;
        let session_id = tx.last_insert_rowid();

        Self::upsert_session_pointer(&tx, user_id, Some((session_id, now_ms, mode)))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok((
            Session {
                id: session_id,
                user_id: user_id.into(),
                plan_id: params.plan_id,
                task_id: params.task_id,
                mode,
                status: SessionStatus::Running,
                started_at: now,
                ended_at: None,
                duration_minutes: 0,
                planned_minutes: params.planned_minutes,
                scaled_minutes: params.scaled_minutes,
                subject: params.subject.clone(),
                burnout_score_at_start,
                burnout_score_at_end: None,
                completed: false,
            },
            false,
        ))
    }

    /// Writes a session's terminal fields.
    ///
    /// Repeated terminal writes are accepted with last-write-wins semantics.
    /// Pointer cleanup is the caller's responsibility; it is a separate
    /// best-effort write.
    pub fn end_session(
        &mut self,
        session_id: i64,
        duration_minutes: u32,
        status: SessionStatus,
        burnout_score_at_end: Option<u8>,
        now: Timestamp,
    ) -> Result<Session> {
        let changed = self
            .connection
            .execute(
                END_SESSION_SQL,
                params![
                    session_id,
                    status.as_str(),
                    now.as_millisecond(),
                    duration_minutes,
                    status == SessionStatus::Completed,
                    burnout_score_at_end
                ],
            )
            .map_err(|e| StudyError::database_error("Failed to update session", e))?;
        if changed == 0 {
            return Err(StudyError::SessionNotFound { id: session_id });
        }
        self.get_session(session_id)?
            .ok_or(StudyError::SessionNotFound { id: session_id })
    }

    /// Lists a user's sessions with `started_at` in `[start, end)`.
    pub fn list_sessions_between(
        &self,
        user_id: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Session>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SESSIONS_RANGE_SQL)
            .map_err(|e| StudyError::database_error("Failed to prepare query", e))?;
        let sessions = stmt
            .query_map(
                params![user_id, start.as_millisecond(), end.as_millisecond()],
                |row| Self::build_session_from_row(row),
            )
            .map_err(|e| StudyError::database_error("Failed to query sessions", e))?
            .collect::<rusqlite::Result<Vec<Session>>>()
            .map_err(|e| StudyError::database_error("Failed to read session rows", e))?;
        Ok(sessions)
    }
}
