//! Result wrapper types for displaying operation outcomes.
//!
//! These wrappers pair a confirmation line with the affected resource so
//! create, update, and session lifecycle operations report consistently.

use std::fmt;

use crate::models::{Plan, Session, Task};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use studyflow_core::{
///     display::CreateResult,
///     models::{Plan, PlanSource},
/// };
/// use jiff::Timestamp;
///
/// let plan = Plan {
///     id: 1,
///     user_id: "local".to_string(),
///     title: "Exam Prep".to_string(),
///     active: true,
///     source: PlanSource::Ai,
///     version: 1,
///     input: None,
///     ai_plan: None,
///     optimized_at: None,
///     created_at: Timestamp::now(),
/// };
///
/// let result = CreateResult::new(plan);
/// assert!(format!("{}", result).contains("Created plan with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// Tracks the specific changes made so the caller gets clear feedback about
/// what was modified.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the outcome of a session start.
///
/// Distinguishes a freshly created session from a reused one so callers see
/// when their start request resolved to an already running session.
pub struct StartResult {
    pub session: Session,
    pub reused: bool,
}

impl StartResult {
    /// Create a new StartResult wrapper.
    pub fn new(session: Session, reused: bool) -> Self {
        Self { session, reused }
    }
}

impl fmt::Display for StartResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reused {
            writeln!(f, "Resumed running session with ID: {}", self.session.id)?;
        } else {
            writeln!(f, "Started session with ID: {}", self.session.id)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.session)
    }
}

/// Wrapper type for displaying the outcome of a session end.
pub struct EndResult {
    pub session: Session,
}

impl EndResult {
    /// Create a new EndResult wrapper.
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl fmt::Display for EndResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ended session {} ({})",
            self.session.id,
            self.session.status.as_str()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.session)
    }
}

/// Wrapper type for displaying the outcome of a task optimization batch.
pub struct OptimizeResult {
    pub plan_id: i64,
    pub applied: u32,
}

impl OptimizeResult {
    /// Create a new OptimizeResult wrapper.
    pub fn new(plan_id: i64, applied: u32) -> Self {
        Self { plan_id, applied }
    }
}

impl fmt::Display for OptimizeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.applied == 1 {
            "update"
        } else {
            "updates"
        };
        writeln!(
            f,
            "Applied {} {unit} to plan {}",
            self.applied, self.plan_id
        )
    }
}
