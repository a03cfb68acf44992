//! Session model definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::status::{SessionMode, SessionStatus};

/// A focus session belonging to one user and one plan.
///
/// A session is created in the running state and moves to exactly one
/// terminal state (completed or cancelled). Terminal sessions are immutable
/// apart from last-write-wins end updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Unique identifier for the session
    pub id: i64,

    /// ID of the owning user
    pub user_id: String,

    /// ID of the plan the session was started against
    pub plan_id: i64,

    /// Optional task the session focuses on
    pub task_id: Option<i64>,

    /// Timer mode the session runs in
    pub mode: SessionMode,

    /// Lifecycle status
    pub status: SessionStatus,

    /// Timestamp when the session started (UTC)
    pub started_at: Timestamp,

    /// Set when the session reaches a terminal state
    pub ended_at: Option<Timestamp>,

    /// Actual focus minutes, reported at end
    pub duration_minutes: u32,

    /// Minutes the caller planned to focus
    pub planned_minutes: Option<u32>,

    /// Planned minutes after external scaling, if any
    pub scaled_minutes: Option<u32>,

    /// Optional subject tag inherited from the task
    pub subject: Option<String>,

    /// Burnout score sampled when the session started
    pub burnout_score_at_start: Option<u8>,

    /// Burnout score sampled when the session ended
    pub burnout_score_at_end: Option<u8>,

    /// True iff the session ended with completed status
    pub completed: bool,
}

impl Session {
    /// Returns true when the session has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Outcome of a start request.
///
/// `reused` is true when a running session already existed for the user and
/// its identifier was returned instead of creating a new row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StartedSession {
    /// Identifier of the running session
    pub id: i64,

    /// True when an existing running session was returned
    pub reused: bool,
}
