//! Single delivery of a request's outcome.
//!
//! Several sources can try to finish the same request: the ceremony's success
//! or error callback, a dismissed surface, a cancellation that makes the
//! platform report a late error. The first one wins; the rest are ignored.

use std::sync::{
    Arc, Mutex, Weak,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::oneshot;

use crate::platform::CeremonyError;

/// How a request ended. Only [`Resolution::is_success`] crosses the public
/// boundary; the reason is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    Success,
    Failure(FailureReason),
}

impl Resolution {
    pub(crate) fn failure(reason: FailureReason) -> Self {
        Self::Failure(reason)
    }

    pub(crate) fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FailureReason {
    /// Terminal error reported by the platform ceremony
    Ceremony(CeremonyError),
    /// The custom surface was closed by the user
    Dismissed,
    /// Another custom surface is already visible
    SurfaceBusy,
    /// The platform refused to start the ceremony
    CeremonyNotStarted(String),
    /// Every sender was dropped without delivering
    Abandoned,
}

struct Shared {
    resolved: AtomicBool,
    tx: Mutex<Option<oneshot::Sender<Resolution>>>,
}

/// Cloneable sending half. All clones share one "already resolved" flag.
#[derive(Clone)]
pub(crate) struct OutcomeSender {
    shared: Arc<Shared>,
}

impl OutcomeSender {
    /// Delivers `resolution` if nothing was delivered before.
    /// Returns true when this call was the one that resolved the request.
    pub(crate) fn deliver(&self, resolution: Resolution) -> bool {
        if self.shared.resolved.swap(true, Ordering::AcqRel) {
            tracing::debug!(?resolution, "Outcome already delivered, ignoring");
            return false;
        }

        let tx = match self.shared.tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match tx {
            Some(tx) => {
                if tx.send(resolution).is_err() {
                    tracing::debug!("Outcome receiver already dropped");
                }
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.shared.resolved.load(Ordering::Acquire)
    }

    /// A handle that can deliver without keeping the channel open. Once every
    /// `OutcomeSender` is gone the receiver resolves to `Abandoned`, whether
    /// or not weak handles remain.
    pub(crate) fn downgrade(&self) -> WeakOutcomeSender {
        WeakOutcomeSender {
            shared: Arc::downgrade(&self.shared),
        }
    }
}

pub(crate) struct WeakOutcomeSender {
    shared: Weak<Shared>,
}

impl WeakOutcomeSender {
    /// Same as [`OutcomeSender::deliver`]; false when no sender is left.
    pub(crate) fn deliver(&self, resolution: Resolution) -> bool {
        match self.shared.upgrade() {
            Some(shared) => OutcomeSender { shared }.deliver(resolution),
            None => {
                tracing::debug!(?resolution, "Every sender dropped, nothing to deliver to");
                false
            }
        }
    }
}

impl std::fmt::Debug for OutcomeSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutcomeSender")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

pub(crate) struct OutcomeReceiver {
    rx: oneshot::Receiver<Resolution>,
}

impl OutcomeReceiver {
    /// Waits for the outcome. Must not be polled again once it returned.
    pub(crate) async fn recv(&mut self) -> Resolution {
        match (&mut self.rx).await {
            Ok(resolution) => resolution,
            Err(_) => {
                tracing::warn!("Ceremony ended without reporting an outcome");
                Resolution::failure(FailureReason::Abandoned)
            }
        }
    }
}

pub(crate) fn channel() -> (OutcomeSender, OutcomeReceiver) {
    let (tx, rx) = oneshot::channel();
    let sender = OutcomeSender {
        shared: Arc::new(Shared {
            resolved: AtomicBool::new(false),
            tx: Mutex::new(Some(tx)),
        }),
    };
    (sender, OutcomeReceiver { rx })
}
