//! Collection wrapper types for displaying groups of domain objects.
//!
//! The wrappers format collections with consistent structure and handle
//! empty collections gracefully.

use std::{fmt, ops::Index};

use crate::models::{PlanSummary, Task};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// Formats each summary with its own Display implementation and prints a
/// friendly message when the collection is empty.
///
/// # Examples
///
/// ```rust
/// use studyflow_core::{
///     display::PlanSummaries,
///     models::{PlanSource, PlanSummary},
/// };
/// use jiff::Timestamp;
///
/// let plan = PlanSummary {
///     id: 1,
///     title: "Exam Prep".to_string(),
///     active: true,
///     source: PlanSource::Manual,
///     created_at: Timestamp::now(),
///     optimized_at: None,
///     total_tasks: 5,
///     done_tasks: 2,
/// };
///
/// let summaries = PlanSummaries(vec![plan]);
/// let output = format!("{}", summaries);
/// assert!(output.contains("Exam Prep"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan summary at the given index.
    pub fn get(&self, index: usize) -> Option<&PlanSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{}", plan)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of tasks.
///
/// Formats each task with the Task Display trait and handles empty
/// collections gracefully.
///
/// # Examples
///
/// ```rust
/// use studyflow_core::{display::Tasks, models::Task};
/// use jiff::Timestamp;
///
/// let task = Task {
///     id: 1,
///     plan_id: 42,
///     title: "Read chapter 3".to_string(),
///     subject: Some("math".to_string()),
///     planned_minutes: 25,
///     done: false,
///     order: 0,
///     priority: None,
///     note: None,
///     optimized_at: None,
///     created_at: Timestamp::now(),
///     completed_at: None,
/// };
///
/// let tasks = Tasks(vec![task]);
/// println!("{}", tasks);
/// ```
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of tasks in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the task at the given index.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.0.get(index)
    }

    /// Get an iterator over the tasks.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }
}

impl Index<usize> for Tasks {
    type Output = Task;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No tasks found.")
        } else {
            for task in &self.0 {
                write!(f, "{}", task)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::PlanSource;

    fn create_test_plan_summary() -> PlanSummary {
        PlanSummary {
            id: 1,
            title: "Test Plan".to_string(),
            active: false,
            source: PlanSource::Manual,
            created_at: Timestamp::from_second(1641038400).unwrap(), // 2022-01-01 12:00:00 UTC
            optimized_at: None,
            total_tasks: 3,
            done_tasks: 1,
        }
    }

    fn create_test_task() -> Task {
        Task {
            id: 1,
            plan_id: 1,
            title: "Test Task".to_string(),
            subject: Some("math".to_string()),
            planned_minutes: 25,
            done: false,
            order: 0,
            priority: None,
            note: None,
            optimized_at: None,
            created_at: Timestamp::from_second(1641038400).unwrap(),
            completed_at: None,
        }
    }

    #[test]
    fn test_plan_summaries_display() {
        let summaries = PlanSummaries(vec![create_test_plan_summary()]);
        let output = format!("{}", summaries);
        assert!(output.contains("Test Plan"));
        assert!(output.contains("ID: 1"));
        assert!(output.contains("(1/3)"));

        let empty = PlanSummaries(vec![]);
        assert_eq!(format!("{}", empty), "No plans found.\n");

        let plan1 = create_test_plan_summary();
        let mut plan2 = create_test_plan_summary();
        plan2.id = 2;
        plan2.title = "Second Plan".to_string();
        let summaries = PlanSummaries(vec![plan1, plan2]);
        let output = format!("{}", summaries);
        assert!(output.contains("## Test Plan"));
        assert!(output.contains("## Second Plan"));
        // List output never adds its own top-level header
        assert!(!output.starts_with("# "));
    }

    #[test]
    fn test_tasks_display_empty() {
        let tasks = Tasks(vec![]);
        assert_eq!(format!("{}", tasks), "No tasks found.\n");
    }

    #[test]
    fn test_tasks_display_single_task() {
        let tasks = Tasks(vec![create_test_task()]);
        let output = format!("{}", tasks);

        assert!(output.contains("Test Task"));
        assert!(output.contains("○ Todo"));
        assert!(output.contains("- Subject: math"));
        assert!(output.contains("- Planned: 25 min"));
    }

    #[test]
    fn test_tasks_display_multiple_tasks() {
        let task1 = create_test_task();
        let mut task2 = create_test_task();
        task2.id = 2;
        task2.title = "Second Task".to_string();
        task2.done = true;

        let tasks = Tasks(vec![task1, task2]);
        let output = format!("{}", tasks);

        assert!(output.contains("Test Task"));
        assert!(output.contains("Second Task"));
        assert!(output.contains("○ Todo"));
        assert!(output.contains("✓ Done"));
    }

    #[test]
    fn test_tasks_index_and_iter() {
        let tasks = Tasks(vec![create_test_task()]);
        assert_eq!(tasks.len(), 1);
        assert!(!tasks.is_empty());
        assert_eq!(tasks[0].title, "Test Task");
        assert_eq!(tasks.iter().count(), 1);
    }
}
