use std::fmt;
use thiserror::Error;

use crate::delivery::{FailureReason, OutcomeSender, Resolution};

/// Terminal errors a ceremony can report. All of them end the request with
/// `false`; they are kept apart for logging only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CeremonyError {
    #[error("user cancelled")]
    UserCancelled,
    #[error("negative button pressed")]
    NegativeButton,
    #[error("cancelled by the system")]
    SystemCancelled,
    #[error("too many attempts, temporarily locked out")]
    Lockout,
    #[error("too many attempts, biometrics disabled until device credential is used")]
    LockoutPermanent,
    #[error("biometric hardware unavailable")]
    HardwareUnavailable,
    #[error("no biometric enrolled")]
    NoBiometrics,
    #[error("timed out")]
    Timeout,
    #[error("authentication failed")]
    AuthenticationFailed,
    #[error("user chose fallback")]
    UserFallback,
    #[error("vendor error {0}")]
    Vendor(i64),
    #[error("{0}")]
    Other(String),
}

impl CeremonyError {
    pub fn is_lockout(&self) -> bool {
        matches!(self, Self::Lockout | Self::LockoutPermanent)
    }
}

/// Everything a platform may report while a ceremony is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CeremonyEvent {
    Succeeded,
    /// A single read was not recognized; the platform keeps the prompt up
    Failed,
    /// Advisory text from the sensor (e.g. "finger moved too fast")
    Help(String),
    Error(CeremonyError),
}

impl CeremonyEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Error(_))
    }
}

/// Handle given to the platform for reporting a ceremony's progress.
///
/// Only the first terminal event resolves the request. Later ones (a
/// `Canceled` error caused by our own cancellation, a duplicate success) are
/// ignored.
#[derive(Clone, Debug)]
pub struct CeremonyCallback {
    sender: OutcomeSender,
}

impl CeremonyCallback {
    pub(crate) fn new(sender: OutcomeSender) -> Self {
        Self { sender }
    }

    /// Returns false when the request was already resolved.
    pub fn succeeded(&self) -> bool {
        let delivered = self.sender.deliver(Resolution::Success);
        if !delivered {
            tracing::debug!("Late success callback ignored");
        }
        delivered
    }

    /// Not terminal.
    pub fn failed(&self) {
        tracing::debug!("Biometric not recognized, ceremony continues");
    }

    /// Not terminal.
    pub fn help(&self, message: &str) {
        tracing::debug!("Ceremony help: {}", message);
    }

    /// Returns false when the request was already resolved.
    pub fn error(&self, error: CeremonyError) -> bool {
        if error.is_lockout() {
            tracing::warn!("Biometric ceremony locked out: {}", error);
        } else {
            tracing::debug!("Biometric ceremony error: {}", error);
        }
        self.sender.deliver(Resolution::failure(FailureReason::Ceremony(error)))
    }

    /// True when `event` resolved the request.
    pub fn dispatch(&self, event: CeremonyEvent) -> bool {
        match event {
            CeremonyEvent::Succeeded => self.succeeded(),
            CeremonyEvent::Failed => {
                self.failed();
                false
            }
            CeremonyEvent::Help(message) => {
                self.help(&message);
                false
            }
            CeremonyEvent::Error(error) => self.error(error),
        }
    }

    /// True once any terminal event (from any source) resolved the request.
    pub fn is_resolved(&self) -> bool {
        self.sender.is_resolved()
    }
}

/// Stops the platform's sensor polling.
///
/// Runs its closure at most once: on [`CancellationHandle::cancel`], or on
/// drop while still armed. [`CancellationHandle::disarm`] discards it.
pub struct CancellationHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl CancellationHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// For platforms whose ceremony cannot be cancelled from outside.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn disarm(mut self) {
        self.cancel = None;
    }
}

impl Drop for CancellationHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            tracing::debug!("Cancelling ceremony abandoned by its request");
            cancel();
        }
    }
}

impl fmt::Debug for CancellationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}
