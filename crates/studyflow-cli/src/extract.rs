//! JSON extraction from free-form AI replies
//!
//! Upstream generators answer in prose that is expected to contain exactly
//! one JSON object, often wrapped in a fenced code block. This module slices
//! that object out of the surrounding text and parses it into core parameter
//! types. Extraction is deliberately a CLI concern; core only ever sees the
//! already-parsed object.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use studyflow_core::params::{CreatePlan, TaskDraft, TaskUpdate};

/// Study-plan schema as emitted by the generation collaborator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudyPlanDraft {
    title: String,
    #[serde(default)]
    tasks: Vec<StudyTaskDraft>,
    #[serde(default)]
    energy_level: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudyTaskDraft {
    title: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    planned_minutes: Option<u32>,
    #[serde(default)]
    order: Option<i64>,
}

/// Optimized-task-list schema as emitted by the generation collaborator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizedTaskList {
    #[serde(default, alias = "tasks")]
    updates: Vec<OptimizedTask>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizedTask {
    #[serde(default, alias = "id")]
    task_id: Option<i64>,
    #[serde(default)]
    planned_minutes: Option<u32>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    note: Option<String>,
}

/// Parses a study-plan reply into plan creation parameters.
///
/// The raw extracted object is carried along as `ai_plan`, so the stored
/// plan keeps the generator's full output even when the typed schema only
/// reads part of it.
pub fn study_plan_from_reply(reply: &str) -> Result<CreatePlan> {
    let raw = extract_json_object(reply)?;
    let draft: StudyPlanDraft =
        serde_json::from_value(raw.clone()).context("Reply does not match the study plan schema")?;
    Ok(CreatePlan {
        title: draft.title,
        tasks: draft
            .tasks
            .into_iter()
            .map(|task| TaskDraft {
                title: task.title,
                subject: task.subject,
                planned_minutes: task.planned_minutes,
                order: task.order,
            })
            .collect(),
        input: draft
            .energy_level
            .map(|level| serde_json::json!({ "energyLevel": level })),
        ai_plan: Some(raw),
    })
}

/// Parses an optimized-task-list reply into per-task updates.
pub fn task_updates_from_reply(reply: &str) -> Result<Vec<TaskUpdate>> {
    let raw = extract_json_object(reply)?;
    let list: OptimizedTaskList = serde_json::from_value(raw)
        .context("Reply does not match the optimized task list schema")?;
    Ok(list
        .updates
        .into_iter()
        .map(|task| TaskUpdate {
            task_id: task.task_id,
            planned_minutes: task.planned_minutes,
            priority: task.priority,
            order: task.order,
            note: task.note,
        })
        .collect())
}

/// Slices the single JSON object out of a free-form reply and parses it.
///
/// Fenced code block markers are dropped line-wise first, then the text
/// between the first `{` and the last `}` is taken as the object.
fn extract_json_object(reply: &str) -> Result<Value> {
    let without_fences: String = reply
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n");

    let start = without_fences
        .find('{')
        .ok_or_else(|| anyhow!("No JSON object found in the reply"))?;
    let end = without_fences
        .rfind('}')
        .ok_or_else(|| anyhow!("No JSON object found in the reply"))?;
    if end < start {
        return Err(anyhow!("No JSON object found in the reply"));
    }

    serde_json::from_str(&without_fences[start..=end])
        .context("Extracted text is not valid JSON")
}
