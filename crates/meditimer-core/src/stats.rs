//! Session statistics engine.
//!
//! Pure date-bucketing and streak computation over the persisted session
//! log. Every function takes `today` explicitly so the results are
//! deterministic and testable without mocking global time; one refresh
//! cycle computes every view from the same date.
//!
//! Weeks are Monday-start 7-day windows. A week "counts" when it contains
//! at least one session; insertion order of the log is irrelevant.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::storage::Session;

/// Backward scan limit for [`current_streak`], in weeks (one year).
/// Streaks longer than this stop growing rather than scanning unbounded.
pub const STREAK_SCAN_WEEKS: u32 = 52;

/// The Monday on/before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_has_session(ws: NaiveDate, sessions: &[Session]) -> bool {
    let we = ws + Duration::days(6);
    sessions.iter().any(|s| s.date >= ws && s.date <= we)
}

/// Completion mask for Monday..Sunday of the current week.
/// Entry `i` is true iff any session is dated `week_start(today) + i`.
pub fn weekly_mask(today: NaiveDate, sessions: &[Session]) -> [bool; 7] {
    let ws = week_start(today);
    std::array::from_fn(|i| {
        let day = ws + Duration::days(i as i64);
        sessions.iter().any(|s| s.date == day)
    })
}

/// Per-day minute totals for Monday..Sunday of the current week.
pub fn weekly_minutes(today: NaiveDate, sessions: &[Session]) -> [u32; 7] {
    let ws = week_start(today);
    std::array::from_fn(|i| {
        let day = ws + Duration::days(i as i64);
        sessions
            .iter()
            .filter(|s| s.date == day)
            .map(|s| s.duration_minutes)
            .sum()
    })
}

/// Consecutive weeks with at least one session, walking backward from
/// the current week. Capped at [`STREAK_SCAN_WEEKS`] iterations.
pub fn current_streak(today: NaiveDate, sessions: &[Session]) -> u32 {
    let mut streak = 0;
    let mut ws = week_start(today);
    for _ in 0..STREAK_SCAN_WEEKS {
        if !week_has_session(ws, sessions) {
            break;
        }
        streak += 1;
        ws = ws - Duration::days(7);
    }
    streak
}

/// Longest run of consecutive weeks with at least one session, scanning
/// forward from the earliest session's week to `week_start(today)`
/// inclusive. Uncapped; bounded by the log's own date range.
pub fn best_streak(today: NaiveDate, sessions: &[Session]) -> u32 {
    let earliest = match sessions.iter().map(|s| s.date).min() {
        Some(d) => d,
        None => return 0,
    };
    let end = week_start(today);
    let mut ws = week_start(earliest);
    let mut best = 0;
    let mut run = 0;
    while ws <= end {
        if week_has_session(ws, sessions) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
        ws = ws + Duration::days(7);
    }
    best
}

/// Total minutes for sessions in `today`'s calendar month.
pub fn month_minutes(today: NaiveDate, sessions: &[Session]) -> u32 {
    sessions
        .iter()
        .filter(|s| s.date.year() == today.year() && s.date.month() == today.month())
        .map(|s| s.duration_minutes)
        .sum()
}

/// Number of sessions in `today`'s calendar month.
pub fn month_session_count(today: NaiveDate, sessions: &[Session]) -> usize {
    sessions
        .iter()
        .filter(|s| s.date.year() == today.year() && s.date.month() == today.month())
        .count()
}

/// All derived views for one refresh cycle, computed from a single
/// `today` so they stay mutually consistent. Ephemeral - recomputed
/// from the log on demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Monday..Sunday completion mask for the current week.
    pub weekly_mask: [bool; 7],
    /// Monday..Sunday minute totals for the current week.
    pub weekly_minutes: [u32; 7],
    pub current_streak: u32,
    pub best_streak: u32,
    pub month_minutes: u32,
    pub month_sessions: usize,
}

impl StatsSnapshot {
    pub fn compute(today: NaiveDate, sessions: &[Session]) -> Self {
        Self {
            weekly_mask: weekly_mask(today, sessions),
            weekly_minutes: weekly_minutes(today, sessions),
            current_streak: current_streak(today, sessions),
            best_streak: best_streak(today, sessions),
            month_minutes: month_minutes(today, sessions),
            month_sessions: month_session_count(today, sessions),
        }
    }
}
