//! Task model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A single task owned by exactly one plan.
///
/// Tasks are never deleted by the core; they are mutated only by completion
/// toggles and optimization batches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: i64,

    /// ID of the owning plan
    pub plan_id: i64,

    /// Title of the task
    pub title: String,

    /// Optional subject tag (used by the per-subject analytics)
    pub subject: Option<String>,

    /// Planned focus minutes for the task
    pub planned_minutes: u32,

    /// Whether the task has been completed
    pub done: bool,

    /// Sort key within the plan
    pub order: i64,

    /// Optional priority label set by optimization
    pub priority: Option<String>,

    /// Optional free-form note set by optimization
    pub note: Option<String>,

    /// Set when an optimization batch last touched this task
    pub optimized_at: Option<Timestamp>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Set iff the task is done
    pub completed_at: Option<Timestamp>,
}
