//! Focus session operations for the StudyPlanner.
//!
//! Sessions run `running → {completed, cancelled}` with both end states
//! terminal. Starting is idempotent per user: a second start while a session
//! is still running returns the existing id instead of creating another row.

use jiff::Timestamp;
use log::warn;
use tokio::task;

use super::StudyPlanner;
use crate::{
    db::Database,
    error::{Result, StudyError},
    models::{Session, SessionStatus, StartedSession},
    params::{EndSession, StartSession},
};

impl StudyPlanner {
    /// Starts a focus session against one of the caller's plans.
    ///
    /// When the caller already has a running session its id comes back with
    /// `reused = true` and nothing is written, protecting against duplicate
    /// starts from retries or multiple frontends. The check and the insert
    /// share one transaction, so two concurrent starts on the same database
    /// cannot both create a session.
    pub async fn start_session(&self, user: &str, params: &StartSession) -> Result<StartedSession> {
        let (session, reused) = self.start_session_full(user, params).await?;
        Ok(StartedSession {
            id: session.id,
            reused,
        })
    }

    /// Starts a session and returns the full record with the reuse flag.
    pub async fn start_session_full(
        &self,
        user: &str,
        params: &StartSession,
    ) -> Result<(Session, bool)> {
        let (mode, burnout_score_at_start) = params.validate()?;

        let db_path = self.db_path.clone();
        let user = user.to_string();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.start_session(&user, &params, mode, burnout_score_at_start, Timestamp::now())
        })
        .await
        .map_err(super::join_error)?
    }

    /// Ends a session with the given terminal status and duration.
    ///
    /// Terminal fields are written once per call with last-write-wins
    /// semantics on repeats. The session pointer is cleared unconditionally
    /// afterwards; a failure of that cleanup is logged and swallowed, since
    /// the next start self-heals a stale pointer anyway.
    pub async fn end_session(&self, user: &str, params: &EndSession) -> Result<Session> {
        let (status, burnout_score_at_end) = params.validate()?;
        let duration = params.clamped_duration_minutes();

        let db_path = self.db_path.clone();
        let user = user.to_string();
        let session_id = params.session_id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            // Sessions are scoped per user: a foreign session id reads the
            // same as a missing one, so its existence never leaks
            let session = db
                .get_session(session_id)?
                .ok_or(StudyError::SessionNotFound { id: session_id })?;
            if session.user_id != user {
                return Err(StudyError::SessionNotFound { id: session_id });
            }

            let session = db.end_session(
                session_id,
                duration,
                status,
                burnout_score_at_end,
                Timestamp::now(),
            )?;

            if let Err(e) = db.set_session_pointer(&user, None) {
                warn!("Failed to clear session pointer for session {session_id}: {e}");
            }

            Ok(session)
        })
        .await
        .map_err(super::join_error)?
    }

    /// Cancels a session: zero duration, `cancelled` status.
    pub async fn cancel_session(&self, user: &str, session_id: i64) -> Result<Session> {
        let params = EndSession {
            session_id,
            duration_minutes: 0,
            status: Some(SessionStatus::Cancelled.as_str().to_string()),
            burnout_score_at_end: None,
        };
        self.end_session(user, &params).await
    }

    /// The caller's currently running session, if any.
    ///
    /// Resolved through the pointer and validated against the session table;
    /// a pointer naming a terminal or foreign session reads as `None`.
    pub async fn current_session(&self, user: &str) -> Result<Option<Session>> {
        let db_path = self.db_path.clone();
        let user = user.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let Some(pointer) = db.get_pointer(&user)? else {
                return Ok(None);
            };
            let Some(session_id) = pointer.active_session_id else {
                return Ok(None);
            };
            match db.get_session(session_id)? {
                Some(session)
                    if session.user_id == user && session.status == SessionStatus::Running =>
                {
                    Ok(Some(session))
                }
                _ => Ok(None),
            }
        })
        .await
        .map_err(super::join_error)?
    }
}
