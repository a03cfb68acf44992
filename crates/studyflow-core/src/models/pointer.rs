//! Per-user pointer record.

use serde::{Deserialize, Serialize};

use crate::models::status::SessionMode;

/// Singleton pointer document for one user.
///
/// The pointer caches the active plan and the running session so lookups
/// avoid scanning. Pointer fields are hints: readers validate them against
/// the entity tables before trusting them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPointer {
    /// ID of the owning user
    pub user_id: String,

    /// Plan the user currently considers active, if any
    pub active_plan_id: Option<i64>,

    /// Running session, if any
    pub active_session_id: Option<i64>,

    /// Epoch milliseconds when the running session started
    pub active_session_started_at_ms: Option<i64>,

    /// Mode of the running session
    pub active_session_mode: Option<SessionMode>,
}

impl UserPointer {
    /// Creates an empty pointer for a user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }
}
