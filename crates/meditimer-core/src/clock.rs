//! Calendar-date clock seam.
//!
//! "Today" is injected rather than read inside business logic so that
//! the store and the statistics engine stay deterministic under test.
//! Every derived view within one refresh cycle must use the same date.

use chrono::{Local, NaiveDate};

/// Supplies the caller's current local calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Test clock pinned to a fixed date.
#[cfg(test)]
pub(crate) struct FixedClock(pub NaiveDate);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
