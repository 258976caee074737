use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::CountdownState;

/// Every state change in the countdown produces an Event.
/// The GUI polls for events; it never reaches into the engine directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        duration_min: u32,
        total_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown was cancelled by the user. No session is recorded.
    CountdownCancelled {
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    /// Countdown ran to zero naturally. Emitted exactly once per run.
    CountdownCompleted {
        duration_min: u32,
        at: DateTime<Utc>,
    },
    CountdownReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: CountdownState,
        selected_min: u32,
        seconds_remaining: u32,
        total_secs: u32,
        progress: f64,
        at: DateTime<Utc>,
    },
}
