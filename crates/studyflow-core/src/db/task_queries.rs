//! Task reads and the optimization batch.
//!
//! Tasks are owned by exactly one plan and are never deleted here. Mutation
//! happens through completion toggles and optimization batches; the batch is
//! one transaction that skips entries naming no task or a task outside the
//! target plan instead of failing.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, StudyError},
    models::Task,
    params::{TaskDraft, TaskUpdate, DEFAULT_TASK_MINUTES},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (plan_id, title, subject, planned_minutes, position, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_TASK_SQL: &str = "SELECT id, plan_id, title, subject, planned_minutes, done, position, priority, note, optimized_at, created_at, completed_at FROM tasks WHERE id = ?1";
const SELECT_PLAN_TASKS_SQL: &str = "SELECT id, plan_id, title, subject, planned_minutes, done, position, priority, note, optimized_at, created_at, completed_at FROM tasks WHERE plan_id = ?1 ORDER BY position ASC, id ASC";
const COUNT_TASKS_SQL: &str =
    "SELECT COUNT(*), COALESCE(SUM(done), 0) FROM tasks WHERE plan_id = ?1";
const SET_TASK_DONE_SQL: &str = "UPDATE tasks SET done = ?2, completed_at = ?3 WHERE id = ?1";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET planned_minutes = COALESCE(?3, planned_minutes), priority = COALESCE(?4, priority), position = COALESCE(?5, position), note = COALESCE(?6, note), optimized_at = ?7 WHERE id = ?1 AND plan_id = ?2";

impl super::Database {
    /// Helper function to construct a Task from a database row
    pub(super) fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            plan_id: row.get(1)?,
            title: row.get(2)?,
            subject: row.get(3)?,
            planned_minutes: row.get(4)?,
            done: row.get(5)?,
            order: row.get(6)?,
            priority: row.get(7)?,
            note: row.get(8)?,
            optimized_at: super::read_opt_timestamp(row, 9)?,
            created_at: super::read_timestamp(row, 10)?,
            completed_at: super::read_opt_timestamp(row, 11)?,
        })
    }

    /// Inserts one task row inside an existing transaction.
    ///
    /// Missing planned minutes fall back to the default, a missing sort key
    /// falls back to the draft's input position.
    pub(super) fn insert_task_row(
        conn: &Connection,
        plan_id: i64,
        draft: &TaskDraft,
        position: i64,
        now_ms: i64,
    ) -> Result<()> {
        let planned = draft.planned_minutes.unwrap_or(DEFAULT_TASK_MINUTES);
        let order = draft.order.unwrap_or(position);
        conn.execute(
            INSERT_TASK_SQL,
            params![
                plan_id,
                draft.title.trim(),
                draft.subject,
                planned,
                order,
                now_ms
            ],
        )
        .map_err(|e| StudyError::database_error("Failed to insert task", e))?;
        Ok(())
    }

    /// Retrieves a task by its ID.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.connection
            .query_row(SELECT_TASK_SQL, params![task_id], |row| {
                Self::build_task_from_row(row)
            })
            .optional()
            .map_err(|e| StudyError::database_error("Failed to query task", e))
    }

    /// Lists a plan's tasks sorted by position.
    pub fn get_plan_tasks(&self, plan_id: i64) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_TASKS_SQL)
            .map_err(|e| StudyError::database_error("Failed to prepare query", e))?;
        let tasks = stmt
            .query_map(params![plan_id], |row| Self::build_task_from_row(row))
            .map_err(|e| StudyError::database_error("Failed to query tasks", e))?
            .collect::<rusqlite::Result<Vec<Task>>>()
            .map_err(|e| StudyError::database_error("Failed to read task rows", e))?;
        Ok(tasks)
    }

    /// Returns `(total, done)` task counts for a plan.
    pub fn task_counts(&self, plan_id: i64) -> Result<(u32, u32)> {
        self.connection
            .query_row(COUNT_TASKS_SQL, params![plan_id], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(|e| StudyError::database_error("Failed to count tasks", e))
    }

    /// Sets a task's completion state.
    ///
    /// `completed_at` is stamped when marking done and cleared when marking
    /// undone, keeping the "set iff done" invariant.
    pub fn set_task_done(&mut self, task_id: i64, done: bool, now: Timestamp) -> Result<Task> {
        let completed_at = if done { Some(now.as_millisecond()) } else { None };
        let changed = self
            .connection
            .execute(SET_TASK_DONE_SQL, params![task_id, done, completed_at])
            .map_err(|e| StudyError::database_error("Failed to update task", e))?;
        if changed == 0 {
            return Err(StudyError::TaskNotFound { id: task_id });
        }
        self.get_task(task_id)?
            .ok_or(StudyError::TaskNotFound { id: task_id })
    }

    /// Applies an optimization batch to a plan's tasks.
    ///
    /// All updates commit in one transaction. Entries without a task id,
    /// entries carrying no fields, or entries naming a task that does not
    /// belong to `plan_id` are skipped rather than failing the batch.
    /// Returns the number of tasks updated.
    pub fn apply_task_updates(
        &mut self,
        plan_id: i64,
        updates: &[TaskUpdate],
        now: Timestamp,
    ) -> Result<u32> {
        let now_ms = now.as_millisecond();
        let tx = self.write_transaction()?;

        let mut applied = 0u32;
        for update in updates {
            let Some(task_id) = update.task_id else {
                continue;
            };
            if !update.has_changes() {
                continue;
            }
            let changed = tx
                .execute(
                    UPDATE_TASK_SQL,
                    params![
                        task_id,
                        plan_id,
                        update.planned_minutes,
                        update.priority,
                        update.order,
                        update.note,
                        now_ms
                    ],
                )
                .map_err(|e| StudyError::database_error("Failed to update task", e))?;
            applied += changed as u32;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(applied)
    }
}
