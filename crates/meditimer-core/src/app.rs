//! Application coordinator.
//!
//! Ties the countdown engine, the session store, the clock, and the alert
//! backend together. A single instance is constructed and owned by the
//! top-level application object - there is no process-wide singleton.
//!
//! Control flow on natural completion: fire the alert (failures are logged,
//! never propagated), append the session dated `clock.today()`, then
//! recompute every derived view from that same date. Cancellation leaves
//! the session log untouched.
//!
//! Everything runs as sequential steps on one logical task queue; the
//! async driver suspends between one-second ticks and checks a
//! cancellation flag at each tick boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::alert::Alerter;
use crate::clock::Clock;
use crate::error::{CoreError, StoreError};
use crate::events::Event;
use crate::stats::StatsSnapshot;
use crate::storage::{AppConfig, SessionStore};
use crate::timer::{Countdown, CountdownState};

/// How a driven countdown run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// Ran to zero naturally; a session was recorded.
    Completed,
    /// Cancelled cooperatively; no session was recorded.
    Cancelled,
}

/// Requests cooperative cancellation of a running countdown.
///
/// The flag is checked at each tick boundary, so cancellation takes
/// effect within one second.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Top-level application object.
pub struct MediTimer {
    store: SessionStore,
    countdown: Countdown,
    clock: Box<dyn Clock>,
    alerter: Box<dyn Alerter>,
    config: AppConfig,
    stats: StatsSnapshot,
    cancel_flag: Arc<AtomicBool>,
}

impl MediTimer {
    pub fn new(
        store: SessionStore,
        clock: Box<dyn Clock>,
        alerter: Box<dyn Alerter>,
        config: AppConfig,
    ) -> Self {
        let countdown = Countdown::new(config.timer.default_minutes);
        let mut app = Self {
            store,
            countdown,
            clock,
            alerter,
            config,
            stats: StatsSnapshot::default(),
            cancel_flag: Arc::new(AtomicBool::new(false)),
        };
        if let Err(e) = app.refresh_stats() {
            tracing::warn!(error = %e, "initial statistics refresh failed");
        }
        app
    }

    /// Construct with the on-disk store and config, the system clock,
    /// and no alert backend.
    pub fn with_defaults() -> Result<Self, CoreError> {
        let store = SessionStore::open()?;
        let config = AppConfig::load()?;
        Ok(Self::new(
            store,
            Box::new(crate::clock::SystemClock),
            Box::new(crate::alert::NoopAlerter),
            config,
        ))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn stats(&self) -> &StatsSnapshot {
        &self.stats
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle for cancelling the current (or next) countdown run.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.cancel_flag.clone())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_minutes(&mut self, min: u32) {
        self.countdown.set_minutes(min);
    }

    pub fn start(&mut self) -> Option<Event> {
        self.cancel_flag.store(false, Ordering::SeqCst);
        self.countdown.start()
    }

    pub fn cancel(&mut self) -> Option<Event> {
        self.countdown.cancel()
    }

    pub fn reset_to_idle(&mut self) -> Option<Event> {
        self.countdown.reset_to_idle()
    }

    /// Advance the countdown by one second. On natural completion this
    /// fires the alert, records the session, and refreshes statistics.
    pub fn tick(&mut self) -> Result<Option<Event>, CoreError> {
        let event = self.countdown.tick();
        if let Some(Event::CountdownCompleted { .. }) = &event {
            self.on_completed()?;
        }
        Ok(event)
    }

    /// Drive the countdown to its end on a one-second interval.
    ///
    /// Starts the countdown if it is not already running. The cancellation
    /// flag is checked at each tick boundary; a cancelled run records
    /// nothing.
    pub async fn run(&mut self) -> Result<CountdownOutcome, CoreError> {
        if self.countdown.state() != CountdownState::Running {
            self.start();
        }
        let cancel = self.cancel_flag.clone();
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await; // First tick resolves immediately.
        loop {
            interval.tick().await;
            if cancel.load(Ordering::SeqCst) {
                self.countdown.cancel();
                return Ok(CountdownOutcome::Cancelled);
            }
            if self.tick()?.is_some() {
                return Ok(CountdownOutcome::Completed);
            }
        }
    }

    /// Recompute all derived views from the store with one shared "today".
    ///
    /// A corrupt log degrades to an empty history (session history is
    /// non-critical data); a persistence failure is surfaced and the
    /// previous snapshot stays in place.
    pub fn refresh_stats(&mut self) -> Result<&StatsSnapshot, CoreError> {
        let sessions = match self.store.load_all() {
            Ok(sessions) => sessions,
            Err(StoreError::CorruptData { path, source }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "session log is corrupt; showing empty history"
                );
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        self.stats = StatsSnapshot::compute(self.clock.today(), &sessions);
        Ok(&self.stats)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn on_completed(&mut self) -> Result<(), CoreError> {
        self.fire_alert();
        let today = self.clock.today();
        self.store.append(today, self.countdown.selected_minutes())?;
        self.refresh_stats()?;
        Ok(())
    }

    /// Alert failures never block or roll back the append/refresh sequence.
    fn fire_alert(&self) {
        if self.config.alerts.sound {
            if let Err(e) = self.alerter.chime() {
                tracing::warn!(error = %e, "completion chime failed");
            }
        }
        if self.config.alerts.vibration {
            if let Err(e) = self.alerter.vibrate() {
                tracing::warn!(error = %e, "completion vibration failed");
            }
        }
    }
}
