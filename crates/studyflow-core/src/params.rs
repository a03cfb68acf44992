//! Parameter structures for studyflow operations
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI, MCP, etc.) without framework-specific derives or
//! dependencies. These structures provide a clean interface for passing data
//! between different layers of the application.
//!
//! ## Architecture: Parameter Wrapper Pattern
//!
//! This module implements a parameter wrapper pattern that enables clean
//! separation of concerns between the core domain logic and interface-specific
//! frameworks:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ### Benefits
//!
//! 1. **Separation of Concerns**: Core parameter structures remain independent
//!    of UI framework dependencies (clap, schemars).
//!
//! 2. **Interface Flexibility**: Each interface (CLI, MCP, future REST API) can
//!    add its own framework-specific derives without polluting core logic.
//!
//! 3. **Conditional Compilation**: Features like JSON schema generation can be
//!    enabled only where needed, keeping core lightweight.
//!
//! 4. **Type Safety**: Wrapper pattern ensures compile-time verification of
//!    parameter conversion between layers.
//!
//! ### Usage Pattern
//!
//! Interface layers create wrapper structs that:
//! - Add framework-specific derives (clap::Args, schemars::JsonSchema, etc.)
//! - Use transparent serialization (`#[serde(transparent)]`)
//! - Convert to core parameters via `.into()` or accessor methods
//!
//! ```ignore
//! // In CLI module
//! #[derive(Args)]
//! pub struct StartSessionArgs {
//!     pub plan_id: i64,
//!     // ... clap-specific attributes
//! }
//!
//! impl From<StartSessionArgs> for StartSession {
//!     fn from(args: StartSessionArgs) -> Self {
//!         StartSession {
//!             plan_id: args.plan_id,
//!             ..StartSession::default()
//!         }
//!     }
//! }
//!
//! // In MCP module
//! #[derive(Deserialize, JsonSchema)]
//! #[serde(transparent)]
//! struct StartSessionRequest(studyflow_core::params::StartSession);
//! ```
//!
//! Enumerated fields (session mode, end status) travel as plain strings and
//! are parsed by the `validate()` methods, so callers get one consistent
//! `InvalidInput` error regardless of which interface they came through.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{SessionMode, SessionStatus};

/// Default page size for plan listings.
pub const DEFAULT_PLAN_LIMIT: u32 = 10;

/// Planned minutes assigned to a task draft that does not carry any.
pub const DEFAULT_TASK_MINUTES: u32 = 25;

/// Default trailing window for insights.
pub const INSIGHTS_DEFAULT_DAYS: u32 = 7;

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like get_plan, set_plan_active, get_plan_tasks,
/// cancel_session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: i64,
}

/// A draft task inside a plan creation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskDraft {
    /// Title of the task; drafts whose title is empty after trimming are
    /// skipped
    pub title: String,
    /// Optional subject tag
    pub subject: Option<String>,
    /// Planned focus minutes, defaults to 25 when omitted
    pub planned_minutes: Option<u32>,
    /// Sort key within the plan, defaults to the draft's input position
    pub order: Option<i64>,
}

/// Parameters for creating a new plan.
///
/// The created plan becomes the caller's only active plan. When `ai_plan`
/// is present the plan is recorded as AI-generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Title of the plan (required)
    pub title: String,
    /// Tasks to create with the plan
    #[serde(default)]
    pub tasks: Vec<TaskDraft>,
    /// Raw generation input (energy level, subjects, available time)
    pub input: Option<Value>,
    /// Raw AI plan payload the tasks were derived from
    pub ai_plan: Option<Value>,
}

impl CreatePlan {
    /// Validate plan creation parameters.
    ///
    /// # Errors
    ///
    /// * `StudyError::InvalidInput` - When the title is empty after trimming
    pub fn validate(&self) -> crate::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::StudyError::InvalidInput {
                field: "title".to_string(),
                reason: "Plan title must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Maximum number of plans to return
    #[serde(default = "default_plan_limit")]
    pub limit: u32,
}

impl Default for ListPlans {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PLAN_LIMIT,
        }
    }
}

fn default_plan_limit() -> u32 {
    DEFAULT_PLAN_LIMIT
}

/// A single task update inside an optimization batch.
///
/// Updates without a `task_id`, or naming a task outside the target plan,
/// are skipped rather than failing the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskUpdate {
    /// ID of the task to update
    pub task_id: Option<i64>,
    /// New planned focus minutes
    pub planned_minutes: Option<u32>,
    /// New priority label
    pub priority: Option<String>,
    /// New sort key within the plan
    pub order: Option<i64>,
    /// New free-form note
    pub note: Option<String>,
}

impl TaskUpdate {
    /// True when the update carries at least one field to apply.
    pub fn has_changes(&self) -> bool {
        self.planned_minutes.is_some()
            || self.priority.is_some()
            || self.order.is_some()
            || self.note.is_some()
    }
}

/// Parameters for applying an optimization batch to a plan's tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OptimizeTasks {
    /// ID of the plan whose tasks are updated
    pub plan_id: i64,
    /// Per-task updates to apply
    #[serde(default)]
    pub updates: Vec<TaskUpdate>,
}

/// Parameters for toggling a task's completion state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTaskDone {
    /// ID of the task to update
    pub task_id: i64,
    /// Completion state to set
    #[serde(default = "default_done")]
    pub done: bool,
}

impl Default for SetTaskDone {
    fn default() -> Self {
        Self {
            task_id: 0,
            done: true,
        }
    }
}

fn default_done() -> bool {
    true
}

/// Parameters for starting a focus session.
///
/// Starting is idempotent per user: when a running session already exists
/// its ID is returned instead of creating a second one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StartSession {
    /// ID of the plan the session runs against (required)
    pub plan_id: i64,
    /// Optional task the session focuses on
    pub task_id: Option<i64>,
    /// Timer mode ('pomodoro', 'short', or 'long'), defaults to 'pomodoro'
    pub mode: Option<String>,
    /// Minutes the caller plans to focus
    pub planned_minutes: Option<u32>,
    /// Planned minutes after external scaling
    pub scaled_minutes: Option<u32>,
    /// Optional subject tag for per-subject analytics
    pub subject: Option<String>,
    /// Burnout score sampled just before starting
    pub burnout_score_at_start: Option<u8>,
}

impl StartSession {
    /// Validate session start parameters and return the parsed mode and
    /// clamped burnout score.
    ///
    /// # Errors
    ///
    /// * `StudyError::InvalidInput` - When the mode string is invalid
    pub fn validate(&self) -> crate::Result<(SessionMode, Option<u8>)> {
        use std::str::FromStr;

        let mode = match &self.mode {
            Some(mode_str) => {
                SessionMode::from_str(mode_str).map_err(|_| crate::StudyError::InvalidInput {
                    field: "mode".to_string(),
                    reason: format!(
                        "Invalid mode: {mode_str}. Must be 'pomodoro', 'short', or 'long'"
                    ),
                })?
            }
            None => SessionMode::default(),
        };

        Ok((mode, self.burnout_score_at_start.map(|s| s.min(100))))
    }
}

/// Parameters for ending the running focus session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EndSession {
    /// ID of the session to end (required)
    pub session_id: i64,
    /// Actual focus minutes; negative values are floored to zero
    #[serde(default)]
    pub duration_minutes: i64,
    /// Terminal status ('completed' or 'cancelled'), defaults to 'completed'
    pub status: Option<String>,
    /// Burnout score sampled at the end of the session
    pub burnout_score_at_end: Option<u8>,
}

impl EndSession {
    /// Validate session end parameters and return the parsed terminal status
    /// and clamped burnout score.
    ///
    /// # Errors
    ///
    /// * `StudyError::InvalidInput` - When the status string is invalid or
    ///   names the running state
    ///
    /// # Examples
    ///
    /// ```rust
    /// use studyflow_core::params::EndSession;
    ///
    /// let mut params = EndSession::default();
    /// params.session_id = 1;
    /// params.status = Some("running".to_string());
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> crate::Result<(SessionStatus, Option<u8>)> {
        use std::str::FromStr;

        let status = match &self.status {
            Some(status_str) => {
                SessionStatus::from_str(status_str).map_err(|_| {
                    crate::StudyError::InvalidInput {
                        field: "status".to_string(),
                        reason: format!(
                            "Invalid status: {status_str}. Must be 'completed' or 'cancelled'"
                        ),
                    }
                })?
            }
            None => SessionStatus::Completed,
        };

        if status == SessionStatus::Running {
            return Err(crate::StudyError::InvalidInput {
                field: "status".to_string(),
                reason: "A session cannot be ended with status 'running'. Use 'completed' or 'cancelled'".to_string(),
            });
        }

        Ok((status, self.burnout_score_at_end.map(|s| s.min(100))))
    }

    /// Duration with negative values floored to zero.
    pub fn clamped_duration_minutes(&self) -> u32 {
        self.duration_minutes.clamp(0, i64::from(u32::MAX)) as u32
    }
}

/// Parameters for the insights window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct InsightsRange {
    /// Trailing window length in days
    #[serde(default = "default_insights_days")]
    pub days: u32,
}

impl Default for InsightsRange {
    fn default() -> Self {
        Self {
            days: INSIGHTS_DEFAULT_DAYS,
        }
    }
}

fn default_insights_days() -> u32 {
    INSIGHTS_DEFAULT_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StudyError;

    #[test]
    fn test_create_plan_validate_empty_title() {
        let mut params = CreatePlan::default();
        params.title = "   ".to_string();

        let result = params.validate();
        assert!(result.is_err());

        match result.unwrap_err() {
            StudyError::InvalidInput { field, reason } => {
                assert_eq!(field, "title");
                assert!(reason.contains("must not be empty"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_create_plan_validate_valid_title() {
        let mut params = CreatePlan::default();
        params.title = "Exam Prep".to_string();
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_start_session_validate_default_mode() {
        let mut params = StartSession::default();
        params.plan_id = 1;

        let (mode, score) = params.validate().unwrap();
        assert_eq!(mode, SessionMode::Pomodoro);
        assert_eq!(score, None);
    }

    #[test]
    fn test_start_session_validate_explicit_mode() {
        let mut params = StartSession::default();
        params.plan_id = 1;
        params.mode = Some("short".to_string());

        let (mode, _) = params.validate().unwrap();
        assert_eq!(mode, SessionMode::Short);
    }

    #[test]
    fn test_start_session_validate_invalid_mode() {
        let mut params = StartSession::default();
        params.plan_id = 1;
        params.mode = Some("siesta".to_string());

        match params.validate().unwrap_err() {
            StudyError::InvalidInput { field, reason } => {
                assert_eq!(field, "mode");
                assert!(reason.contains("Invalid mode: siesta"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_start_session_clamps_burnout_score() {
        let mut params = StartSession::default();
        params.plan_id = 1;
        params.burnout_score_at_start = Some(255);

        let (_, score) = params.validate().unwrap();
        assert_eq!(score, Some(100));
    }

    #[test]
    fn test_end_session_validate_default_status() {
        let mut params = EndSession::default();
        params.session_id = 1;
        params.duration_minutes = 25;

        let (status, score) = params.validate().unwrap();
        assert_eq!(status, SessionStatus::Completed);
        assert_eq!(score, None);
    }

    #[test]
    fn test_end_session_validate_cancelled() {
        let mut params = EndSession::default();
        params.session_id = 1;
        params.status = Some("cancelled".to_string());

        let (status, _) = params.validate().unwrap();
        assert_eq!(status, SessionStatus::Cancelled);
    }

    #[test]
    fn test_end_session_validate_rejects_running() {
        let mut params = EndSession::default();
        params.session_id = 1;
        params.status = Some("running".to_string());

        match params.validate().unwrap_err() {
            StudyError::InvalidInput { field, reason } => {
                assert_eq!(field, "status");
                assert!(reason.contains("cannot be ended"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_end_session_validate_invalid_status() {
        let mut params = EndSession::default();
        params.session_id = 1;
        params.status = Some("paused".to_string());

        match params.validate().unwrap_err() {
            StudyError::InvalidInput { field, reason } => {
                assert_eq!(field, "status");
                assert!(reason.contains("Invalid status: paused"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_end_session_floors_negative_duration() {
        let mut params = EndSession::default();
        params.session_id = 1;
        params.duration_minutes = -10;
        assert_eq!(params.clamped_duration_minutes(), 0);

        params.duration_minutes = 42;
        assert_eq!(params.clamped_duration_minutes(), 42);
    }

    #[test]
    fn test_end_session_clamps_burnout_score() {
        let mut params = EndSession::default();
        params.session_id = 1;
        params.burnout_score_at_end = Some(180);

        let (_, score) = params.validate().unwrap();
        assert_eq!(score, Some(100));
    }

    #[test]
    fn test_task_update_has_changes() {
        let mut update = TaskUpdate::default();
        update.task_id = Some(1);
        assert!(!update.has_changes());

        update.priority = Some("high".to_string());
        assert!(update.has_changes());
    }

    #[test]
    fn test_list_plans_default_limit() {
        assert_eq!(ListPlans::default().limit, DEFAULT_PLAN_LIMIT);
    }

    #[test]
    fn test_insights_range_default_days() {
        assert_eq!(InsightsRange::default().days, INSIGHTS_DEFAULT_DAYS);
    }
}
