//! Lightweight plan summaries for list views.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::plan::Plan;
use crate::models::status::PlanSource;

/// A condensed view of a plan used by list operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    /// Unique identifier for the plan
    pub id: i64,

    /// Title of the plan
    pub title: String,

    /// Whether this plan is the user's active plan
    pub active: bool,

    /// How the plan was created
    pub source: PlanSource,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Set when an optimization batch last touched the plan
    pub optimized_at: Option<Timestamp>,

    /// Number of tasks in the plan
    pub total_tasks: u32,

    /// Number of completed tasks in the plan
    pub done_tasks: u32,
}

impl PlanSummary {
    /// Builds a summary from a plan and its task counts.
    pub fn from_plan(plan: &Plan, total_tasks: u32, done_tasks: u32) -> Self {
        Self {
            id: plan.id,
            title: plan.title.clone(),
            active: plan.active,
            source: plan.source,
            created_at: plan.created_at,
            optimized_at: plan.optimized_at,
            total_tasks,
            done_tasks,
        }
    }
}
