//! Plan and task operations for the StudyPlanner.
//!
//! Every operation takes the caller's user id and rejects targets owned by
//! someone else before any data leaves the database layer.

use jiff::Timestamp;
use log::warn;
use tokio::task;

use super::StudyPlanner;
use crate::{
    db::Database,
    error::{Result, StudyError},
    models::{Plan, PlanSummary, Task},
    params::{CreatePlan, Id, ListPlans, OptimizeTasks, SetTaskDone},
};

impl StudyPlanner {
    /// Creates a new plan with its tasks and makes it the caller's only
    /// active plan.
    ///
    /// Deactivation of other plans, the plan insert, the task inserts, and
    /// the pointer update commit atomically; a half-written plan is never
    /// observable as active.
    pub async fn create_plan(&self, user: &str, params: &CreatePlan) -> Result<Plan> {
        params.validate()?;

        let db_path = self.db_path.clone();
        let user = user.to_string();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_plan(&user, &params)
        })
        .await
        .map_err(super::join_error)?
    }

    /// Retrieves a plan by its ID.
    ///
    /// Returns `None` when no such plan exists and `Forbidden` when it
    /// belongs to another user.
    pub async fn get_plan(&self, user: &str, params: &Id) -> Result<Option<Plan>> {
        let db_path = self.db_path.clone();
        let user = user.to_string();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            match db.get_plan(plan_id)? {
                Some(plan) if plan.user_id != user => Err(StudyError::forbidden_plan(plan_id)),
                other => Ok(other),
            }
        })
        .await
        .map_err(super::join_error)?
    }

    /// Lists the caller's plans, newest first with the active plan on top.
    pub async fn list_plans(&self, user: &str, params: &ListPlans) -> Result<Vec<Plan>> {
        let db_path = self.db_path.clone();
        let user = user.to_string();
        let limit = params.limit;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_plans(&user, limit)
        })
        .await
        .map_err(super::join_error)?
    }

    /// Lists the caller's plans as summaries with task counts.
    pub async fn list_plan_summaries(
        &self,
        user: &str,
        params: &ListPlans,
    ) -> Result<Vec<PlanSummary>> {
        let db_path = self.db_path.clone();
        let user = user.to_string();
        let limit = params.limit;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_plan_summaries(&user, limit)
        })
        .await
        .map_err(super::join_error)?
    }

    /// Resolves the caller's active plan, lazily repairing the pointer and
    /// the active flag when they have drifted apart.
    ///
    /// Returns `None` only when the caller owns no plans at all.
    pub async fn get_active_plan(&self, user: &str) -> Result<Option<Plan>> {
        let db_path = self.db_path.clone();
        let user = user.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.get_active_plan(&user)
        })
        .await
        .map_err(super::join_error)?
    }

    /// Makes the given plan the caller's only active plan.
    pub async fn set_plan_active(&self, user: &str, params: &Id) -> Result<Plan> {
        let db_path = self.db_path.clone();
        let user = user.to_string();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_only_plan_active(&user, plan_id)
        })
        .await
        .map_err(super::join_error)?
    }

    /// Lists a plan's tasks sorted by position.
    ///
    /// Fails with `Forbidden` before returning any task data when the plan
    /// belongs to another user.
    pub async fn get_plan_tasks(&self, user: &str, params: &Id) -> Result<Vec<Task>> {
        let db_path = self.db_path.clone();
        let user = user.to_string();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let plan = db
                .get_plan(plan_id)?
                .ok_or(StudyError::PlanNotFound { id: plan_id })?;
            if plan.user_id != user {
                return Err(StudyError::forbidden_plan(plan_id));
            }
            db.get_plan_tasks(plan_id)
        })
        .await
        .map_err(super::join_error)?
    }

    /// Applies an optimization batch to a plan's tasks.
    ///
    /// Entries naming no task, or a task outside the plan, are skipped.
    /// Stamping the plan's `optimized_at` afterwards is best-effort; a
    /// failure there is logged and does not fail the batch. Returns the
    /// number of tasks updated.
    pub async fn optimize_tasks(&self, user: &str, params: &OptimizeTasks) -> Result<u32> {
        let db_path = self.db_path.clone();
        let user = user.to_string();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let plan = db
                .get_plan(params.plan_id)?
                .ok_or(StudyError::PlanNotFound { id: params.plan_id })?;
            if plan.user_id != user {
                return Err(StudyError::forbidden_plan(params.plan_id));
            }

            let now = Timestamp::now();
            let applied = db.apply_task_updates(params.plan_id, &params.updates, now)?;

            if let Err(e) = db.mark_plan_optimized(params.plan_id, now) {
                warn!(
                    "Failed to stamp optimized_at on plan {}: {e}",
                    params.plan_id
                );
            }

            Ok(applied)
        })
        .await
        .map_err(super::join_error)?
    }

    /// Sets a task's completion state.
    ///
    /// Ownership is checked through the task's plan before any write.
    pub async fn set_task_done(&self, user: &str, params: &SetTaskDone) -> Result<Task> {
        let db_path = self.db_path.clone();
        let user = user.to_string();
        let task_id = params.task_id;
        let done = params.done;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let task = db
                .get_task(task_id)?
                .ok_or(StudyError::TaskNotFound { id: task_id })?;
            let plan = db
                .get_plan(task.plan_id)?
                .ok_or(StudyError::PlanNotFound { id: task.plan_id })?;
            if plan.user_id != user {
                return Err(StudyError::forbidden_task(task_id));
            }
            db.set_task_done(task_id, done, Timestamp::now())
        })
        .await
        .map_err(super::join_error)?
    }
}
