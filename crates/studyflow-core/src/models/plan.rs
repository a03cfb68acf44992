//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PlanSource;

/// Default energy level assumed when a plan's input carries none.
pub const DEFAULT_ENERGY_LEVEL: i64 = 3;

/// Represents a study plan owned by one user.
///
/// At most one plan per user is active at any time; activation flips every
/// other plan of the same user off in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: i64,

    /// Opaque id of the owning user
    pub user_id: String,

    /// Title of the plan (never empty)
    pub title: String,

    /// Whether this is the user's active plan
    pub active: bool,

    /// Origin tag (manual or ai)
    #[serde(default)]
    pub source: PlanSource,

    /// Schema version of the plan record
    pub version: i64,

    /// Opaque input object the plan was generated from (e.g. energy level)
    pub input: Option<Value>,

    /// Opaque AI-generated plan object, absent for manual plans
    pub ai_plan: Option<Value>,

    /// Set when a task optimization batch last touched this plan
    pub optimized_at: Option<Timestamp>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,
}

impl Plan {
    /// The energy level recorded in the plan's input object, defaulting to
    /// [`DEFAULT_ENERGY_LEVEL`] when absent or not a number.
    pub fn energy_level(&self) -> i64 {
        self.input
            .as_ref()
            .and_then(|input| input.get("energyLevel"))
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_ENERGY_LEVEL)
    }
}
