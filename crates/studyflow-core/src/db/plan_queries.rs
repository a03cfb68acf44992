//! Plan lifecycle operations and queries.
//!
//! Plan activation follows a single-active rule per user: every write path
//! that activates a plan first clears the flag on all of the user's other
//! plans inside the same transaction, then updates the pointer row.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, StudyError},
    models::{Plan, PlanSource, PlanSummary},
    params::CreatePlan,
};

/// Oversize factor for the raw page read by plan listings. The extra rows
/// leave room to merge the pointer-resolved active plan before truncation.
const PLAN_PAGE_OVERSCAN: u32 = 2;

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_PLAN_SQL: &str = "INSERT INTO plans (user_id, title, active, source, version, input, ai_plan, created_at) VALUES (?1, ?2, 1, ?3, 1, ?4, ?5, ?6)";
const SELECT_PLAN_SQL: &str = "SELECT id, user_id, title, active, source, version, input, ai_plan, optimized_at, created_at FROM plans WHERE id = ?1";
const SELECT_PLANS_PAGE_SQL: &str = "SELECT id, user_id, title, active, source, version, input, ai_plan, optimized_at, created_at FROM plans WHERE user_id = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2";
const SELECT_FLAGGED_ACTIVE_PLAN_SQL: &str = "SELECT id, user_id, title, active, source, version, input, ai_plan, optimized_at, created_at FROM plans WHERE user_id = ?1 AND active = 1 ORDER BY created_at DESC, id DESC LIMIT 1";
const SELECT_NEWEST_PLAN_SQL: &str = "SELECT id, user_id, title, active, source, version, input, ai_plan, optimized_at, created_at FROM plans WHERE user_id = ?1 ORDER BY created_at DESC, id DESC LIMIT 1";
const DEACTIVATE_PLANS_SQL: &str = "UPDATE plans SET active = 0 WHERE user_id = ?1 AND active = 1";
const ACTIVATE_PLAN_SQL: &str = "UPDATE plans SET active = 1 WHERE id = ?1";
const MARK_PLAN_OPTIMIZED_SQL: &str = "UPDATE plans SET optimized_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a Plan from a database row
    pub(super) fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            active: row.get(3)?,
            source: super::read_enum::<PlanSource>(row, 4)?,
            version: row.get(5)?,
            input: super::read_opt_json(row, 6)?,
            ai_plan: super::read_opt_json(row, 7)?,
            optimized_at: super::read_opt_timestamp(row, 8)?,
            created_at: super::read_timestamp(row, 9)?,
        })
    }

    /// Creates a new plan and makes it the user's only active plan.
    ///
    /// Deactivation of existing plans, the plan insert, the task inserts,
    /// and the pointer update all commit in one transaction. Task drafts
    /// whose title is empty after trimming are skipped; missing planned
    /// minutes and ordering fall back to their defaults.
    pub fn create_plan(&mut self, user_id: &str, params: &CreatePlan) -> Result<Plan> {
        let source = if params.ai_plan.is_some() {
            PlanSource::Ai
        } else {
            PlanSource::Manual
        };
        let now = Timestamp::now();
        let now_ms = now.as_millisecond();
        let input_json = params.input.as_ref().map(|v| v.to_string());
        let ai_plan_json = params.ai_plan.as_ref().map(|v| v.to_string());

        let tx = self.write_transaction()?;

        tx.execute(DEACTIVATE_PLANS_SQL, params![user_id])
            .map_err(|e| StudyError::database_error("Failed to deactivate existing plans", e))?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                user_id,
                &params.title,
                source.as_str(),
                input_json,
                ai_plan_json,
                now_ms
            ],
        )
        .map_err(|e| StudyError::database_error("Failed to insert plan", e))?;

        let plan_id = tx.last_insert_rowid();

        for (index, draft) in params.tasks.iter().enumerate() {
            if draft.title.trim().is_empty() {
                continue;
            }
            Self::insert_task_row(&tx, plan_id, draft, index as i64, now_ms)?;
        }

        Self::upsert_plan_pointer(&tx, user_id, Some(plan_id))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan {
            id: plan_id,
            user_id: user_id.into(),
            title: params.title.clone(),
            active: true,
            source,
            version: 1,
            input: params.input.clone(),
            ai_plan: params.ai_plan.clone(),
            optimized_at: None,
            created_at: now,
        })
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, plan_id: i64) -> Result<Option<Plan>> {
        self.connection
            .query_row(SELECT_PLAN_SQL, params![plan_id], |row| {
                Self::build_plan_from_row(row)
            })
            .optional()
            .map_err(|e| StudyError::database_error("Failed to query plan", e))
    }

    /// Lists the user's plans, newest first with the active plan on top.
    ///
    /// Reads an oversized page, merges the pointer-resolved active plan if
    /// the page missed it, then sorts and truncates to `limit`. This is a
    /// read-only view: a stale pointer or missing active flag is surfaced
    /// as-is, never repaired here.
    pub fn list_plans(&self, user_id: &str, limit: u32) -> Result<Vec<Plan>> {
        let page_size = i64::from(limit.saturating_mul(PLAN_PAGE_OVERSCAN));

        let mut stmt = self
            .connection
            .prepare(SELECT_PLANS_PAGE_SQL)
            .map_err(|e| StudyError::database_error("Failed to prepare query", e))?;
        let mut plans = stmt
            .query_map(params![user_id, page_size], |row| {
                Self::build_plan_from_row(row)
            })
            .map_err(|e| StudyError::database_error("Failed to query plans", e))?
            .collect::<rusqlite::Result<Vec<Plan>>>()
            .map_err(|e| StudyError::database_error("Failed to read plan rows", e))?;

        if let Some(pointer) = self.get_pointer(user_id)? {
            if let Some(active_id) = pointer.active_plan_id {
                if !plans.iter().any(|p| p.id == active_id) {
                    if let Some(active) = self.get_plan(active_id)? {
                        if active.user_id == user_id {
                            plans.push(active);
                        }
                    }
                }
            }
        }

        plans.sort_by(|a, b| {
            b.active
                .cmp(&a.active)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        plans.truncate(limit as usize);

        Ok(plans)
    }

    /// Lists the user's plans as summaries with task counts.
    pub fn list_plan_summaries(&self, user_id: &str, limit: u32) -> Result<Vec<PlanSummary>> {
        let plans = self.list_plans(user_id, limit)?;
        let mut summaries = Vec::with_capacity(plans.len());
        for plan in &plans {
            let (total, done) = self.task_counts(plan.id)?;
            summaries.push(PlanSummary::from_plan(plan, total, done));
        }
        Ok(summaries)
    }

    /// Resolves the user's active plan, repairing bookkeeping as needed.
    ///
    /// Resolution runs in three tiers:
    /// 1. The pointer names an owned plan: return it, re-flagging the row
    ///    when it lost its active flag.
    /// 2. No usable pointer: fall back to the newest flagged row and point
    ///    the pointer back at it.
    /// 3. No flagged row: adopt the user's newest plan, flag it, and point
    ///    the pointer at it.
    ///
    /// Returns `None` only when the user has no plans at all.
    pub fn get_active_plan(&mut self, user_id: &str) -> Result<Option<Plan>> {
        if let Some(pointer) = self.get_pointer(user_id)? {
            if let Some(plan_id) = pointer.active_plan_id {
                if let Some(plan) = self.get_plan(plan_id)? {
                    if plan.user_id == user_id {
                        if plan.active {
                            return Ok(Some(plan));
                        }
                        return self.set_only_plan_active(user_id, plan_id).map(Some);
                    }
                }
            }
        }

        if let Some(plan) = self.find_flagged_active_plan(user_id)? {
            self.set_plan_pointer(user_id, Some(plan.id))?;
            return Ok(Some(plan));
        }

        if let Some(plan) = self.newest_plan(user_id)? {
            return self.set_only_plan_active(user_id, plan.id).map(Some);
        }

        Ok(None)
    }

    /// Makes the given plan the user's only active plan.
    ///
    /// Flag flip and pointer update commit in one transaction.
    pub fn set_only_plan_active(&mut self, user_id: &str, plan_id: i64) -> Result<Plan> {
        let tx = self.write_transaction()?;

        let plan = tx
            .query_row(SELECT_PLAN_SQL, params![plan_id], |row| {
                Self::build_plan_from_row(row)
            })
            .optional()
            .map_err(|e| StudyError::database_error("Failed to query plan", e))?
            .ok_or(StudyError::PlanNotFound { id: plan_id })?;

        if plan.user_id != user_id {
            return Err(StudyError::forbidden_plan(plan_id));
        }

        tx.execute(DEACTIVATE_PLANS_SQL, params![user_id])
            .map_err(|e| StudyError::database_error("Failed to deactivate existing plans", e))?;
        tx.execute(ACTIVATE_PLAN_SQL, params![plan_id])
            .map_err(|e| StudyError::database_error("Failed to activate plan", e))?;
        Self::upsert_plan_pointer(&tx, user_id, Some(plan_id))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan {
            active: true,
            ..plan
        })
    }

    /// Stamps the plan's optimization timestamp.
    pub fn mark_plan_optimized(&mut self, plan_id: i64, at: Timestamp) -> Result<()> {
        self.connection
            .execute(MARK_PLAN_OPTIMIZED_SQL, params![at.as_millisecond(), plan_id])
            .map_err(|e| StudyError::database_error("Failed to mark plan as optimized", e))?;
        Ok(())
    }

    /// Newest plan row carrying the active flag, if any.
    fn find_flagged_active_plan(&self, user_id: &str) -> Result<Option<Plan>> {
        self.connection
            .query_row(SELECT_FLAGGED_ACTIVE_PLAN_SQL, params![user_id], |row| {
                Self::build_plan_from_row(row)
            })
            .optional()
            .map_err(|e| StudyError::database_error("Failed to query active plan", e))
    }

    /// Newest plan row for the user, if any.
    fn newest_plan(&self, user_id: &str) -> Result<Option<Plan>> {
        self.connection
            .query_row(SELECT_NEWEST_PLAN_SQL, params![user_id], |row| {
                Self::build_plan_from_row(row)
            })
            .optional()
            .map_err(|e| StudyError::database_error("Failed to query newest plan", e))
    }
}
