//! # MediTimer Core Library
//!
//! This library provides the core business logic for the MediTimer
//! meditation timer: a caller-driven countdown engine, an append-only
//! session log persisted as a single JSON blob, and a pure statistics
//! engine deriving streaks and weekly/monthly totals from the log.
//! The GUI shell is a thin layer over this crate: it polls events and
//! snapshots and supplies the platform alert backend.
//!
//! ## Key Components
//!
//! - [`Countdown`]: Caller-driven countdown state machine
//! - [`SessionStore`]: Whole-blob session log persistence
//! - [`StatsSnapshot`]: Derived statistics for one refresh cycle
//! - [`MediTimer`]: Coordinator tying countdown, store, and alerts together

pub mod alert;
pub mod app;
pub mod clock;
pub mod error;
pub mod events;
pub mod stats;
pub mod storage;
pub mod timer;

pub use alert::{Alerter, NoopAlerter};
pub use app::{CancelHandle, CountdownOutcome, MediTimer};
pub use clock::{Clock, SystemClock};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use stats::StatsSnapshot;
pub use storage::{AppConfig, Session, SessionStore};
pub use timer::{Countdown, CountdownState};
