//! Aggregate models produced by the analytics operations.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Totals for the caller's current local day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodayStats {
    /// Sum of focus minutes across qualifying sessions today
    pub total_minutes: i64,

    /// Number of qualifying sessions today
    pub session_count: u32,
}

/// Per-day focus minutes over a trailing window.
///
/// `days` lists ISO date keys oldest first; every key also appears in
/// `minutes`, zero-filled for days without qualifying sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyFocus {
    /// Ordered ISO date keys, oldest first
    pub days: Vec<String>,

    /// Focus minutes keyed by ISO date
    pub minutes: HashMap<String, i64>,
}

impl DailyFocus {
    /// Total focus minutes across the window.
    pub fn total_minutes(&self) -> i64 {
        self.minutes.values().sum()
    }
}

/// Derived productivity metrics over a trailing window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Insights {
    /// Length of the window in days
    pub days: u32,

    /// Sum of actual focus minutes
    pub total_actual_minutes: i64,

    /// Sum of planned minutes across sessions that carried one
    pub total_planned_minutes: i64,

    /// Sum of scaled minutes across sessions that carried one
    pub total_scaled_minutes: i64,

    /// Actual over planned, as a whole percentage
    pub productivity: i64,

    /// Actual over scaled, as a whole percentage
    pub focus_efficiency: i64,

    /// Mean of recorded start-of-session burnout scores
    pub avg_burnout: f64,

    /// Number of qualifying sessions in the window
    pub session_count: u32,

    /// Focus minutes grouped by subject; untagged sessions are omitted
    pub subject_minutes: BTreeMap<String, i64>,
}
