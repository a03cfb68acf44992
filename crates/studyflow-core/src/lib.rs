//! Core library for the studyflow study planning application.
//!
//! This crate provides the core business logic for managing study plans,
//! tasks, and focus sessions, including database operations, data models,
//! analytics aggregation, burnout scoring, and error handling. Every
//! operation takes an explicit user identifier; all state and invariants
//! (one active plan, one running session) are scoped to that user.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! This separation allows the same data to be formatted differently depending
//! on context (lists vs. individual items, creation results vs. updates, etc.)
//! while maintaining consistency across all output.
//!
//! # Quick Start
//!
//! ```rust
//! use studyflow_core::{StudyPlannerBuilder, params::{CreatePlan, TaskDraft}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a planner instance
//! let planner = StudyPlannerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! // Create a plan with one task; it becomes the user's active plan
//! let create_params = CreatePlan {
//!     title: "Exam Prep".to_string(),
//!     tasks: vec![TaskDraft {
//!         title: "Read chapter 4".to_string(),
//!         ..TaskDraft::default()
//!     }],
//!     ..CreatePlan::default()
//! };
//!
//! let plan = planner.create_plan("local", &create_params).await?;
//! println!("Created plan: {}", plan);
//!
//! // List plans as summaries
//! use studyflow_core::params::ListPlans;
//! let plans = planner.list_plan_summaries("local", &ListPlans::default()).await?;
//! for plan in &plans {
//!     println!("Plan: {}", plan.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod burnout;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;

// Re-export commonly used types
pub use burnout::{BurnoutAssessment, BurnoutInput, BurnoutStatus};
pub use db::Database;
pub use display::{
    CreateResult, EndResult, OperationStatus, OptimizeResult, PlanSummaries, StartResult, Streak,
    Tasks, UpdateResult,
};
pub use error::{Result, StudyError};
pub use models::{
    DailyFocus, Insights, Plan, PlanSource, PlanSummary, Session, SessionMode, SessionStatus,
    StartedSession, Task, TodayStats, UserPointer,
};
pub use params::{
    CreatePlan, EndSession, Id, InsightsRange, ListPlans, OptimizeTasks, SetTaskDone,
    StartSession, TaskDraft, TaskUpdate,
};
pub use planner::{StudyPlanner, StudyPlannerBuilder};
