//! Display implementations for domain models.
//!
//! All Display trait implementations for the core domain models live here,
//! separated from the model definitions so the models stay serialization
//! focused while presentation concerns stay in one place.
//!
//! Every implementation emits markdown suitable for rich terminal display.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    burnout::BurnoutAssessment,
    models::{
        DailyFocus, Insights, Plan, PlanSource, PlanSummary, Session, SessionMode, SessionStatus,
        Task, TodayStats,
    },
};

impl fmt::Display for PlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Active: {}", if self.active { "yes" } else { "no" })?;
        writeln!(f, "- Source: {}", self.source.as_str())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if let Some(optimized) = &self.optimized_at {
            writeln!(f, "- Optimized: {}", LocalDateTime(optimized))?;
        }

        Ok(())
    }
}

impl Task {
    /// Completion marker used by every task display context.
    pub fn with_icon(&self) -> &'static str {
        if self.done { "✓ Done" } else { "○ Todo" }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} ({})", self.id, self.title, self.with_icon())?;
        writeln!(f)?;

        if let Some(subject) = &self.subject {
            writeln!(f, "- Subject: {subject}")?;
        }
        writeln!(f, "- Planned: {} min", self.planned_minutes)?;
        if let Some(priority) = &self.priority {
            writeln!(f, "- Priority: {priority}")?;
        }
        if let Some(note) = &self.note {
            writeln!(f, "- Note: {note}")?;
        }
        if let Some(completed) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed))?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Session {} ({})", self.id, self.status.with_icon())?;
        writeln!(f)?;

        writeln!(f, "- Mode: {}", self.mode.as_str())?;
        writeln!(f, "- Plan: {}", self.plan_id)?;
        if let Some(task_id) = self.task_id {
            writeln!(f, "- Task: {task_id}")?;
        }
        if let Some(subject) = &self.subject {
            writeln!(f, "- Subject: {subject}")?;
        }
        writeln!(f, "- Started: {}", LocalDateTime(&self.started_at))?;
        if let Some(ended) = &self.ended_at {
            writeln!(f, "- Ended: {}", LocalDateTime(ended))?;
            writeln!(f, "- Duration: {} min", self.duration_minutes)?;
        }
        if let Some(score) = self.burnout_score_at_end {
            writeln!(f, "- Burnout at end: {score}")?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_tasks > 0 {
            format!(" ({}/{})", self.done_tasks, self.total_tasks)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.title, self.id)?;
        writeln!(f)?;

        if self.active {
            writeln!(f, "- **Active**: yes")?;
        }
        writeln!(f, "- **Source**: {}", self.source.as_str())?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?; // Blank line after each plan

        Ok(())
    }
}

impl fmt::Display for TodayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Today")?;
        writeln!(f)?;
        writeln!(f, "- Focus minutes: {}", self.total_minutes)?;
        writeln!(f, "- Sessions: {}", self.session_count)?;
        Ok(())
    }
}

impl fmt::Display for DailyFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Last {} Days", self.days.len())?;
        writeln!(f)?;
        for day in &self.days {
            let minutes = self.minutes.get(day).copied().unwrap_or(0);
            writeln!(f, "- {day}: {minutes} min")?;
        }
        writeln!(f)?;
        writeln!(f, "Total: {} min", self.total_minutes())?;
        Ok(())
    }
}

impl fmt::Display for Insights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Insights (last {} days)", self.days)?;
        writeln!(f)?;
        writeln!(f, "- Sessions: {}", self.session_count)?;
        writeln!(f, "- Focus minutes: {}", self.total_actual_minutes)?;
        writeln!(f, "- Productivity: {}%", self.productivity)?;
        writeln!(f, "- Focus efficiency: {}%", self.focus_efficiency)?;
        writeln!(f, "- Average burnout: {:.1}", self.avg_burnout)?;

        if !self.subject_minutes.is_empty() {
            writeln!(f)?;
            writeln!(f, "### By Subject")?;
            writeln!(f)?;
            for (subject, minutes) in &self.subject_minutes {
                writeln!(f, "- {subject}: {minutes} min")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for BurnoutAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Burnout Check")?;
        writeln!(f)?;
        writeln!(f, "- Score: {} / 100", self.score)?;
        writeln!(f, "- Status: {}", self.status.as_str())?;
        writeln!(f, "- Energy level: {}", self.input.energy_level)?;
        writeln!(
            f,
            "- Task completion: {:.0}%",
            self.input.completion * 100.0
        )?;
        writeln!(f, "- Streak: {} days", self.input.streak_days)?;
        writeln!(f, "- Focus today: {} min", self.input.today_minutes)?;
        Ok(())
    }
}

/// Wrapper for displaying a study streak as a confirmation line.
pub struct Streak(pub u32);

impl fmt::Display for Streak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.0 == 1 { "day" } else { "days" };
        writeln!(f, "Current streak: {} {unit}", self.0)
    }
}
