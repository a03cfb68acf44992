//! Pure aggregation over focus sessions.
//!
//! Every aggregate in this module funnels through [`is_qualifying`]: only
//! completed pomodoro sessions count toward stats, streaks, and insights.
//! That predicate exists exactly once so the definition of "counts" cannot
//! drift between operations.
//!
//! Day bucketing happens in the caller's timezone. The database stores UTC
//! timestamps; functions here take a `TimeZone` and convert before keying
//! by civil date. Callers bound their fetches with the `*_bounds` helpers
//! so range scans and bucketing agree on window edges.

use std::collections::HashSet;

use jiff::{civil::Date, tz::TimeZone, Span, Timestamp};

use crate::{
    error::Result,
    models::{DailyFocus, Insights, Session, SessionMode, SessionStatus, TodayStats},
};

/// Whether a session counts toward analytics.
///
/// Running, cancelled, and non-pomodoro sessions are excluded everywhere.
pub fn is_qualifying(session: &Session) -> bool {
    session.status == SessionStatus::Completed && session.mode == SessionMode::Pomodoro
}

/// Builds the ordered day window ending at `today`, oldest first.
pub fn day_window(today: Date, days: u32) -> Result<Vec<Date>> {
    let mut window = Vec::with_capacity(days as usize);
    for offset in (0..days).rev() {
        let day = today.checked_sub(Span::new().days(i64::from(offset)))?;
        window.push(day);
    }
    Ok(window)
}

/// Half-open instant range `[00:00 of date, 00:00 of the next day)` in `tz`.
pub fn local_day_bounds(date: Date, tz: &TimeZone) -> Result<(Timestamp, Timestamp)> {
    let start = date.to_zoned(tz.clone())?.timestamp();
    let end = date.tomorrow()?.to_zoned(tz.clone())?.timestamp();
    Ok((start, end))
}

/// Half-open instant range covering the trailing `days`-day window that ends
/// with `today`, in `tz`.
pub fn trailing_window_bounds(
    today: Date,
    days: u32,
    tz: &TimeZone,
) -> Result<(Timestamp, Timestamp)> {
    let oldest = today.checked_sub(Span::new().days(i64::from(days.saturating_sub(1))))?;
    let start = oldest.to_zoned(tz.clone())?.timestamp();
    let end = today.tomorrow()?.to_zoned(tz.clone())?.timestamp();
    Ok((start, end))
}

/// Groups qualifying focus minutes by local day.
///
/// Every date in `days` appears in the result, zero-filled when no session
/// landed on it. Sessions outside the window are ignored.
pub fn group_focus_minutes_by_day(
    sessions: &[Session],
    days: &[Date],
    tz: &TimeZone,
) -> DailyFocus {
    let keys: Vec<String> = days.iter().map(Date::to_string).collect();
    let mut minutes = keys
        .iter()
        .map(|key| (key.clone(), 0i64))
        .collect::<std::collections::HashMap<_, _>>();

    for session in sessions.iter().filter(|s| is_qualifying(s)) {
        let day = session.started_at.to_zoned(tz.clone()).date().to_string();
        if let Some(total) = minutes.get_mut(&day) {
            *total += i64::from(session.duration_minutes);
        }
    }

    DailyFocus {
        days: keys,
        minutes,
    }
}

/// Counts consecutive study days ending at `today`.
///
/// A day counts when at least one qualifying session started on it. The
/// streak is zero unless today itself counts. `lookback` caps how far back
/// the count walks.
pub fn streak_days(sessions: &[Session], today: Date, tz: &TimeZone, lookback: u32) -> u32 {
    let study_days: HashSet<Date> = sessions
        .iter()
        .filter(|s| is_qualifying(s))
        .map(|s| s.started_at.to_zoned(tz.clone()).date())
        .collect();

    let mut streak = 0;
    let mut day = today;
    while streak < lookback && study_days.contains(&day) {
        streak += 1;
        match day.yesterday() {
            Ok(previous) => day = previous,
            Err(_) => break,
        }
    }
    streak
}

/// Sums qualifying minutes and counts qualifying sessions.
///
/// The caller bounds the input to today's range; this only applies the
/// qualifying filter and totals.
pub fn today_totals(sessions: &[Session]) -> TodayStats {
    let mut stats = TodayStats::default();
    for session in sessions.iter().filter(|s| is_qualifying(s)) {
        stats.total_minutes += i64::from(session.duration_minutes);
        stats.session_count += 1;
    }
    stats
}

/// Derives productivity metrics from the sessions in a trailing window.
pub fn compute_insights(sessions: &[Session], days: u32) -> Insights {
    let mut insights = Insights {
        days,
        ..Insights::default()
    };
    let mut burnout_sum = 0i64;
    let mut burnout_count = 0u32;

    for session in sessions.iter().filter(|s| is_qualifying(s)) {
        insights.session_count += 1;
        insights.total_actual_minutes += i64::from(session.duration_minutes);
        if let Some(planned) = session.planned_minutes {
            insights.total_planned_minutes += i64::from(planned);
        }
        if let Some(scaled) = session.scaled_minutes {
            insights.total_scaled_minutes += i64::from(scaled);
        }
        if let Some(score) = session.burnout_score_at_start {
            burnout_sum += i64::from(score);
            burnout_count += 1;
        }
        if let Some(subject) = &session.subject {
            *insights.subject_minutes.entry(subject.clone()).or_insert(0) +=
                i64::from(session.duration_minutes);
        }
    }

    insights.productivity =
        whole_percentage(insights.total_actual_minutes, insights.total_planned_minutes);
    insights.focus_efficiency =
        whole_percentage(insights.total_actual_minutes, insights.total_scaled_minutes);
    insights.avg_burnout = if burnout_count == 0 {
        0.0
    } else {
        burnout_sum as f64 / f64::from(burnout_count)
    };

    insights
}

/// Ratio as a rounded whole percentage, zero when the reference is empty.
fn whole_percentage(actual: i64, reference: i64) -> i64 {
    if reference <= 0 {
        0
    } else {
        ((actual as f64 / reference as f64) * 100.0).round() as i64
    }
}
