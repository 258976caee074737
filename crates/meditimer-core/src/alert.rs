//! Completion alert seam.
//!
//! Sound and vibration are platform glue supplied by the embedding shell.
//! Alert failures are caught and logged by the coordinator; they must never
//! prevent the session from being recorded.

/// Result type for alert backends. Failures carry whatever the platform
/// layer reports; the coordinator only logs them.
pub type AlertResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Platform alert backend, invoked once per natural completion.
pub trait Alerter: Send + Sync {
    fn chime(&self) -> AlertResult;
    fn vibrate(&self) -> AlertResult;
}

/// No-op backend for headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAlerter;

impl Alerter for NoopAlerter {
    fn chime(&self) -> AlertResult {
        Ok(())
    }

    fn vibrate(&self) -> AlertResult {
        Ok(())
    }
}
