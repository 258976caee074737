//! Countdown engine.
//!
//! The countdown is a caller-driven state machine. It does not use
//! internal threads or read the wall clock - the caller is responsible
//! for calling `tick()` once per second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Finished -> Idle
//!           |
//!           +-> Idle (cancel)
//! ```
//!
//! Cancellation never records a session; only a natural run to zero
//! produces a `CountdownCompleted` event, and it is emitted exactly once.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Minimum selectable session length in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Maximum selectable session length in minutes.
pub const MAX_MINUTES: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Idle,
    Running,
    Finished,
}

/// Caller-driven countdown state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    state: CountdownState,
    /// Selected session length in minutes, clamped to 1..=120.
    selected_min: u32,
    seconds_remaining: u32,
}

impl Countdown {
    pub fn new(selected_min: u32) -> Self {
        Self {
            state: CountdownState::Idle,
            selected_min: selected_min.clamp(MIN_MINUTES, MAX_MINUTES),
            seconds_remaining: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn selected_minutes(&self) -> u32 {
        self.selected_min
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn total_secs(&self) -> u32 {
        self.selected_min * 60
    }

    /// 0.0 .. 1.0 progress within the current run.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.seconds_remaining as f64 / total as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            selected_min: self.selected_min,
            seconds_remaining: self.seconds_remaining,
            total_secs: self.total_secs(),
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the selected duration. Ignored while a countdown is running.
    pub fn set_minutes(&mut self, min: u32) {
        if self.state != CountdownState::Running {
            self.selected_min = min.clamp(MIN_MINUTES, MAX_MINUTES);
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Idle | CountdownState::Finished => {
                self.seconds_remaining = self.total_secs();
                self.state = CountdownState::Running;
                Some(Event::CountdownStarted {
                    duration_min: self.selected_min,
                    total_secs: self.seconds_remaining,
                    at: Utc::now(),
                })
            }
            CountdownState::Running => None, // Already running.
        }
    }

    /// Cooperative cancellation. Leaves the session log untouched.
    pub fn cancel(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Running => {
                let remaining = self.seconds_remaining;
                self.state = CountdownState::Idle;
                self.seconds_remaining = 0;
                Some(Event::CountdownCancelled {
                    seconds_remaining: remaining,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn reset_to_idle(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Finished => {
                self.state = CountdownState::Idle;
                self.seconds_remaining = 0;
                Some(Event::CountdownReset { at: Utc::now() })
            }
            _ => None,
        }
    }

    /// Call once per second. Returns `Some(Event::CountdownCompleted)`
    /// on the tick that reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != CountdownState::Running {
            return None;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.state = CountdownState::Finished;
            return Some(Event::CountdownCompleted {
                duration_min: self.selected_min,
                at: Utc::now(),
            });
        }
        None
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_then_cancel() {
        let mut cd = Countdown::new(10);
        assert_eq!(cd.state(), CountdownState::Idle);

        assert!(cd.start().is_some());
        assert_eq!(cd.state(), CountdownState::Running);
        assert_eq!(cd.seconds_remaining(), 600);

        assert!(cd.cancel().is_some());
        assert_eq!(cd.state(), CountdownState::Idle);
        assert_eq!(cd.seconds_remaining(), 0);
    }

    #[test]
    fn runs_to_completion_exactly_once() {
        let mut cd = Countdown::new(1);
        cd.start();
        for _ in 0..59 {
            assert!(cd.tick().is_none());
        }
        let last = cd.tick();
        assert!(matches!(
            last,
            Some(Event::CountdownCompleted { duration_min: 1, .. })
        ));
        assert_eq!(cd.state(), CountdownState::Finished);
        // Further ticks are no-ops.
        assert!(cd.tick().is_none());
        assert_eq!(cd.state(), CountdownState::Finished);
    }

    #[test]
    fn set_minutes_clamps_and_ignores_while_running() {
        let mut cd = Countdown::new(10);
        cd.set_minutes(0);
        assert_eq!(cd.selected_minutes(), 1);
        cd.set_minutes(500);
        assert_eq!(cd.selected_minutes(), 120);

        cd.set_minutes(10);
        cd.start();
        cd.set_minutes(20);
        assert_eq!(cd.selected_minutes(), 10);
    }

    #[test]
    fn reset_only_from_finished() {
        let mut cd = Countdown::new(1);
        assert!(cd.reset_to_idle().is_none());
        cd.start();
        for _ in 0..60 {
            cd.tick();
        }
        assert_eq!(cd.state(), CountdownState::Finished);
        assert!(cd.reset_to_idle().is_some());
        assert_eq!(cd.state(), CountdownState::Idle);
    }

    #[test]
    fn snapshot_reports_state_and_progress() {
        let mut cd = Countdown::new(2);
        cd.start();
        for _ in 0..30 {
            cd.tick();
        }
        match cd.snapshot() {
            Event::StateSnapshot {
                state,
                selected_min,
                seconds_remaining,
                total_secs,
                progress,
                ..
            } => {
                assert_eq!(state, CountdownState::Running);
                assert_eq!(selected_min, 2);
                assert_eq!(seconds_remaining, 90);
                assert_eq!(total_secs, 120);
                assert!((progress - 0.25).abs() < 1e-9);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn snapshot_wire_shape_is_tagged() {
        // The GUI polls this serde form; its shape is a contract.
        let cd = Countdown::new(10);
        let json = serde_json::to_value(cd.snapshot()).unwrap();
        assert_eq!(json["type"], "StateSnapshot");
        assert_eq!(json["state"], "idle");
        assert_eq!(json["selected_min"], 10);
        assert_eq!(json["seconds_remaining"], 0);
        assert_eq!(json["total_secs"], 600);
    }

    #[test]
    fn progress_runs_zero_to_one() {
        let mut cd = Countdown::new(1);
        cd.start();
        assert_eq!(cd.progress(), 0.0);
        for _ in 0..30 {
            cd.tick();
        }
        assert!((cd.progress() - 0.5).abs() < 1e-9);
        for _ in 0..30 {
            cd.tick();
        }
        assert_eq!(cd.progress(), 1.0);
    }
}
