//! High-level planner API for plans, sessions, and derived analytics.
//!
//! This module provides the main [`StudyPlanner`] interface. The planner is
//! the central coordinator between the application layers and the database,
//! implementing the plan/session lifecycle rules and composing the pure
//! analytics and burnout modules into caller-facing operations.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (display-facing │───▶│ (plan_ops,      │───▶│   (via db/)     │
//! │  wrappers)      │    │  session_ops,   │    │                 │
//! │                 │    │  stats_ops)     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     User Interface      Business Logic         Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`StudyPlanner`] instances
//! - [`plan_ops`]: Plan lifecycle and task operations
//! - [`session_ops`]: Focus session start/end/cancel operations
//! - [`stats_ops`]: Analytics aggregates and the burnout check
//! - [`handlers`]: Display-facing wrappers shared by the CLI and MCP layers
//!
//! ## Design Principles
//!
//! 1. **Explicit identity**: every operation takes the caller's user id as a
//!    parameter; there is no ambient "current user" anywhere in the core.
//!    Operations whose target belongs to another user fail with
//!    [`StudyError::Forbidden`] and return no data.
//! 2. **Blocking work off the runtime**: each operation clones its
//!    configuration and opens a fresh [`Database`](crate::db::Database)
//!    inside `spawn_blocking`.
//! 3. **Fixed timezone policy**: day bucketing uses the timezone configured
//!    at build time, never ambient locale mid-operation.
//! 4. **Lazy repair**: pointer inconsistencies are healed on demand inside
//!    `get_active_plan`; nothing polls in the background.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use studyflow_core::{params::CreatePlan, StudyPlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = StudyPlannerBuilder::new().build().await?;
//!
//! let plan = planner
//!     .create_plan(
//!         "alice",
//!         &CreatePlan {
//!             title: "Finals Week".to_string(),
//!             ..CreatePlan::default()
//!         },
//!     )
//!     .await?;
//! println!("Created plan {}", plan.id);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::tz::TimeZone;

use crate::error::StudyError;

// Module declarations
pub mod builder;
pub mod handlers;
pub mod plan_ops;
pub mod session_ops;
pub mod stats_ops;


// Re-export the main types
pub use builder::StudyPlannerBuilder;

/// Main planner interface for plans, sessions, and analytics.
pub struct StudyPlanner {
    pub(crate) db_path: PathBuf,
    pub(crate) tz: TimeZone,
}

impl StudyPlanner {
    /// Creates a new planner with the specified database path and timezone.
    pub(crate) fn new(db_path: PathBuf, tz: TimeZone) -> Self {
        Self { db_path, tz }
    }

    /// The timezone all day bucketing is anchored to.
    pub fn timezone(&self) -> &TimeZone {
        &self.tz
    }
}

/// Maps a `spawn_blocking` join failure into the planner error space.
pub(crate) fn join_error(e: tokio::task::JoinError) -> StudyError {
    StudyError::Configuration {
        message: format!("Task join error: {e}"),
    }
}
