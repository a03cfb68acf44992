//! Data models for plans, tasks, sessions, and derived statistics.
//!
//! This module contains the core domain models of the studyflow system.
//! Display implementations for these models live in [`crate::display::models`]
//! to keep data structures and presentation logic separate.
//!
//! All entities carry an owner: plans and sessions record their `user_id`
//! directly, tasks belong to exactly one plan, and the [`UserPointer`] is a
//! per-user singleton caching which plan and session are currently active.

pub mod plan;
pub mod pointer;
pub mod session;
pub mod stats;
pub mod status;
pub mod summary;
pub mod task;


pub use plan::Plan;
pub use pointer::UserPointer;
pub use session::{Session, StartedSession};
pub use stats::{DailyFocus, Insights, TodayStats};
pub use status::{PlanSource, SessionMode, SessionStatus};
pub use summary::PlanSummary;
pub use task::Task;
