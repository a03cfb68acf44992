//! Display formatting for models, collections, and operation results.
//!
//! All user-facing output is markdown so both the terminal renderer and the
//! MCP text content can share one formatting path. Domain models implement
//! `Display` directly; collections and operation outcomes get newtype
//! wrappers so empty lists and confirmation messages format consistently.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types   │    │   Formatted     │
//! │ (Plan, Session) │───▶│ (collections,   │───▶│    Output       │
//! │                 │    │  results)       │    │ (Terminal/MCP)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (PlanSummaries, Tasks)
//! - [`results`]: Operation result types (CreateResult, UpdateResult,
//!   StartResult, EndResult, OptimizeResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use studyflow_core::{
//!     display::CreateResult,
//!     models::{Plan, PlanSource},
//! };
//! use jiff::Timestamp;
//!
//! let plan = Plan {
//!     id: 1,
//!     user_id: "local".to_string(),
//!     title: "Exam Prep".to_string(),
//!     active: true,
//!     source: PlanSource::Manual,
//!     version: 1,
//!     input: None,
//!     ai_plan: None,
//!     optimized_at: None,
//!     created_at: Timestamp::now(),
//! };
//!
//! let result = CreateResult::new(plan);
//! let output = format!("{}", result);
//! assert!(output.contains("Created plan with ID: 1"));
//! ```
//!
//! ```rust
//! use studyflow_core::display::OperationStatus;
//!
//! let notice = OperationStatus::success("No running session.".to_string());
//! assert_eq!(format!("{notice}"), "No running session.\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::{PlanSummaries, Tasks};
pub use datetime::LocalDateTime;
pub use models::Streak;
pub use results::{CreateResult, EndResult, OptimizeResult, StartResult, UpdateResult};
pub use status::OperationStatus;
