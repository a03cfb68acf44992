//! Analytics and burnout operations for the StudyPlanner.
//!
//! These operations fetch bounded slices of the session log and feed them to
//! the pure functions in [`crate::analytics`] and [`crate::burnout`]. They
//! never mutate anything. Day boundaries come from the planner's configured
//! timezone.

use jiff::{civil::Date, Timestamp};
use tokio::task;

use super::StudyPlanner;
use crate::{
    analytics,
    burnout::{completion_ratio, BurnoutAssessment, BurnoutInput},
    db::Database,
    error::Result,
    models::{plan::DEFAULT_ENERGY_LEVEL, DailyFocus, Insights, Session, TodayStats},
    params::{Id, InsightsRange},
};

/// How many days back the streak count walks at most.
pub const STREAK_LOOKBACK_DAYS: u32 = 45;

/// Window length for the weekly series.
const WEEKLY_DAYS: u32 = 7;

impl StudyPlanner {
    /// The caller's current local date under the configured timezone.
    fn today(&self) -> Date {
        Timestamp::now().to_zoned(self.tz.clone()).date()
    }

    /// Fetches the caller's sessions whose start falls in the trailing
    /// `days`-day window ending today.
    async fn sessions_in_window(&self, user: &str, days: u32) -> Result<Vec<Session>> {
        let (start, end) = analytics::trailing_window_bounds(self.today(), days, &self.tz)?;
        self.sessions_between(user, start, end).await
    }

    async fn sessions_between(
        &self,
        user: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Session>> {
        let db_path = self.db_path.clone();
        let user = user.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_sessions_between(&user, start, end)
        })
        .await
        .map_err(super::join_error)?
    }

    /// Focus minutes and session count for the current local day.
    pub async fn today_stats(&self, user: &str) -> Result<TodayStats> {
        let (start, end) = analytics::local_day_bounds(self.today(), &self.tz)?;
        let sessions = self.sessions_between(user, start, end).await?;
        Ok(analytics::today_totals(&sessions))
    }

    /// Consecutive study days ending today, capped at the lookback window.
    pub async fn streak(&self, user: &str) -> Result<u32> {
        let today = self.today();
        let sessions = self.sessions_in_window(user, STREAK_LOOKBACK_DAYS).await?;
        Ok(analytics::streak_days(
            &sessions,
            today,
            &self.tz,
            STREAK_LOOKBACK_DAYS,
        ))
    }

    /// Per-day focus minutes for the trailing seven days.
    pub async fn weekly_stats(&self, user: &str) -> Result<DailyFocus> {
        self.daily_focus(user, WEEKLY_DAYS).await
    }

    /// Per-day focus minutes for an arbitrary trailing window.
    pub async fn daily_focus(&self, user: &str, days: u32) -> Result<DailyFocus> {
        let window = analytics::day_window(self.today(), days)?;
        let sessions = self.sessions_in_window(user, days).await?;
        Ok(analytics::group_focus_minutes_by_day(
            &sessions, &window, &self.tz,
        ))
    }

    /// Productivity metrics over the requested trailing window.
    pub async fn insights(&self, user: &str, params: &InsightsRange) -> Result<Insights> {
        let sessions = self.sessions_in_window(user, params.days).await?;
        Ok(analytics::compute_insights(&sessions, params.days))
    }

    /// Scores the caller's current burnout risk.
    ///
    /// Today's totals, the streak, and the active plan are read
    /// concurrently; the plan's tasks follow once its id is known. A caller
    /// without any plans scores with default energy and full completion.
    pub async fn burnout(&self, user: &str) -> Result<BurnoutAssessment> {
        let (today, streak, plan) = tokio::join!(
            self.today_stats(user),
            self.streak(user),
            self.get_active_plan(user),
        );
        let today = today?;
        let streak = streak?;

        let (energy_level, completion) = match plan? {
            Some(plan) => {
                let tasks = self.get_plan_tasks(user, &Id { id: plan.id }).await?;
                let done = tasks.iter().filter(|t| t.done).count();
                (plan.energy_level(), completion_ratio(done, tasks.len()))
            }
            None => (DEFAULT_ENERGY_LEVEL, 1.0),
        };

        Ok(BurnoutAssessment::from_input(BurnoutInput {
            energy_level,
            completion,
            streak_days: streak,
            today_minutes: today.total_minutes,
        }))
    }
}
