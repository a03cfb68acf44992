//! Status and tag enumerations for plans and sessions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of focus session modes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Standard timed focus block
    #[default]
    Pomodoro,

    /// Short break between focus blocks
    Short,

    /// Long break after a set of focus blocks
    Long,
}

impl FromStr for SessionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pomodoro" => Ok(SessionMode::Pomodoro),
            "short" => Ok(SessionMode::Short),
            "long" => Ok(SessionMode::Long),
            _ => Err(format!("Invalid session mode: {s}")),
        }
    }
}

impl SessionMode {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::Pomodoro => "pomodoro",
            SessionMode::Short => "short",
            SessionMode::Long => "long",
        }
    }
}

/// Type-safe enumeration of session statuses.
///
/// Sessions start as [`SessionStatus::Running`] and transition exactly once
/// to a terminal state. There are no outbound transitions from terminal
/// states in the intended design, though repeated terminal writes are
/// accepted with last-write-wins semantics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Session is in progress
    Running,

    /// Session finished normally
    Completed,

    /// Session was abandoned before finishing
    Cancelled,
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "running" => Ok(SessionStatus::Running),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            _ => Err(format!("Invalid session status: {s}")),
        }
    }
}

impl SessionStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Running => "running",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    /// Whether this status is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use studyflow_core::models::SessionStatus;
    ///
    /// assert_eq!(SessionStatus::Running.with_icon(), "▶ Running");
    /// assert_eq!(SessionStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(SessionStatus::Cancelled.with_icon(), "✗ Cancelled");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            SessionStatus::Running => "▶ Running",
            SessionStatus::Completed => "✓ Completed",
            SessionStatus::Cancelled => "✗ Cancelled",
        }
    }
}

/// Origin tag recorded on a plan at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    /// Created by hand
    #[default]
    Manual,

    /// Created from an AI-generated study plan object
    Ai,
}

impl FromStr for PlanSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(PlanSource::Manual),
            "ai" => Ok(PlanSource::Ai),
            _ => Err(format!("Invalid plan source: {s}")),
        }
    }
}

impl PlanSource {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanSource::Manual => "manual",
            PlanSource::Ai => "ai",
        }
    }
}
