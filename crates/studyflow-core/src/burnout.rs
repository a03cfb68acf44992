//! Burnout scoring.
//!
//! The score is a pure function of four signals: current energy level, task
//! completion ratio on the active plan, study streak length, and focus
//! minutes accumulated today. Gathering those signals is the planner's job;
//! this module only does the arithmetic, so the weights stay testable
//! without a database.
//!
//! Scores are additive penalties clamped to 0..=100. Higher is worse.

use serde::{Deserialize, Serialize};

/// Signals feeding one burnout evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BurnoutInput {
    /// Self-reported energy level from the active plan, 1 (drained) to 5
    pub energy_level: i64,

    /// Done tasks over total tasks on the active plan, 1.0 when the plan
    /// has no tasks
    pub completion: f64,

    /// Consecutive study days ending today
    pub streak_days: u32,

    /// Qualifying focus minutes accumulated today
    pub today_minutes: i64,
}

impl BurnoutInput {
    /// Computes the burnout score for these signals.
    pub fn score(&self) -> u8 {
        let mut score: i64 = 0;

        if self.energy_level <= 2 {
            score += 25;
        } else if self.energy_level == 3 {
            score += 10;
        }

        if self.completion < 0.4 {
            score += 25;
        } else if self.completion < 0.7 {
            score += 10;
        }

        if self.streak_days == 0 {
            score += 20;
        }

        if self.today_minutes > 180 {
            score += 20;
        } else if self.today_minutes > 120 {
            score += 10;
        }

        score.clamp(0, 100) as u8
    }
}

/// Completion ratio for a task list.
///
/// A plan with no tasks counts as fully complete so an empty plan never
/// inflates the score.
pub fn completion_ratio(done_tasks: usize, total_tasks: usize) -> f64 {
    if total_tasks == 0 {
        1.0
    } else {
        done_tasks as f64 / total_tasks as f64
    }
}

/// Qualitative label for a burnout score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BurnoutStatus {
    Healthy,
    Fatigued,
    Risk,
}

impl BurnoutStatus {
    /// Maps a score to its label band.
    pub fn from_score(score: u8) -> Self {
        if score > 60 {
            Self::Risk
        } else if score > 30 {
            Self::Fatigued
        } else {
            Self::Healthy
        }
    }

    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Fatigued => "Fatigued",
            Self::Risk => "Burnout Risk",
        }
    }
}

/// A scored burnout evaluation together with the signals that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BurnoutAssessment {
    /// Score in 0..=100, higher is worse
    pub score: u8,

    /// Label band for the score
    pub status: BurnoutStatus,

    /// Signals the score was computed from
    pub input: BurnoutInput,
}

impl BurnoutAssessment {
    /// Scores the given signals and labels the result.
    pub fn from_input(input: BurnoutInput) -> Self {
        let score = input.score();
        Self {
            score,
            status: BurnoutStatus::from_score(score),
            input,
        }
    }
}
