//! Display-facing handler operations for the StudyPlanner.
//!
//! These wrap the core operations in the display layer's formatted types so
//! the CLI and MCP interfaces share one markdown rendering path.

use super::StudyPlanner;
use crate::{
    display::{EndResult, OptimizeResult, PlanSummaries, StartResult, Streak, Tasks, UpdateResult},
    error::Result,
    models::{Plan, Task},
    params::{EndSession, Id, ListPlans, OptimizeTasks, SetTaskDone, StartSession},
};

impl StudyPlanner {
    /// Handle listing plans as formatted summaries.
    pub async fn list_plans_display(
        &self,
        user: &str,
        params: &ListPlans,
    ) -> Result<PlanSummaries> {
        let summaries = self.list_plan_summaries(user, params).await?;
        Ok(PlanSummaries(summaries))
    }

    /// Handle showing the active plan together with its tasks.
    ///
    /// Returns `None` when the caller owns no plans at all.
    pub async fn active_plan_overview(&self, user: &str) -> Result<Option<(Plan, Tasks)>> {
        let Some(plan) = self.get_active_plan(user).await? else {
            return Ok(None);
        };
        let tasks = self.get_plan_tasks(user, &Id { id: plan.id }).await?;
        Ok(Some((plan, Tasks(tasks))))
    }

    /// Handle listing a plan's tasks as a formatted collection.
    pub async fn plan_tasks_display(&self, user: &str, params: &Id) -> Result<Tasks> {
        let tasks = self.get_plan_tasks(user, params).await?;
        Ok(Tasks(tasks))
    }

    /// Handle activating a plan with change feedback.
    pub async fn activate_plan_result(&self, user: &str, params: &Id) -> Result<UpdateResult<Plan>> {
        let plan = self.set_plan_active(user, params).await?;
        Ok(UpdateResult::with_changes(
            plan,
            vec!["Set as the active plan".to_string()],
        ))
    }

    /// Handle toggling a task with change feedback.
    pub async fn set_task_done_result(
        &self,
        user: &str,
        params: &SetTaskDone,
    ) -> Result<UpdateResult<Task>> {
        let task = self.set_task_done(user, params).await?;
        let change = if params.done {
            "Marked done".to_string()
        } else {
            "Marked not done".to_string()
        };
        Ok(UpdateResult::with_changes(task, vec![change]))
    }

    /// Handle starting a session with reuse feedback.
    pub async fn start_session_result(
        &self,
        user: &str,
        params: &StartSession,
    ) -> Result<StartResult> {
        let (session, reused) = self.start_session_full(user, params).await?;
        Ok(StartResult::new(session, reused))
    }

    /// Handle ending a session.
    pub async fn end_session_result(&self, user: &str, params: &EndSession) -> Result<EndResult> {
        let session = self.end_session(user, params).await?;
        Ok(EndResult::new(session))
    }

    /// Handle cancelling a session.
    pub async fn cancel_session_result(&self, user: &str, session_id: i64) -> Result<EndResult> {
        let session = self.cancel_session(user, session_id).await?;
        Ok(EndResult::new(session))
    }

    /// Handle applying an optimization batch with an applied count.
    pub async fn optimize_tasks_result(
        &self,
        user: &str,
        params: &OptimizeTasks,
    ) -> Result<OptimizeResult> {
        let applied = self.optimize_tasks(user, params).await?;
        Ok(OptimizeResult::new(params.plan_id, applied))
    }

    /// Handle the streak as a formatted confirmation line.
    pub async fn streak_display(&self, user: &str) -> Result<Streak> {
        let days = self.streak(user).await?;
        Ok(Streak(days))
    }
}
