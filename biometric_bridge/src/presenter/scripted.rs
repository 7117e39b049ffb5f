use async_trait::async_trait;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use super::types::{CustomSurface, CustomUiPresenter, PresenterDecision};

struct ScriptedState {
    decision: Option<PresenterDecision>,
    presented: AtomicUsize,
    closed: AtomicUsize,
    last_surface: Mutex<Option<CustomSurface>>,
}

/// Presenter that answers with a fixed decision, optionally after a delay.
/// A presenter built with [`ScriptedPresenter::pending`] never answers, like a
/// user who leaves the surface open.
///
/// Clones share their counters. The delay belongs to each clone.
#[derive(Clone)]
pub struct ScriptedPresenter {
    state: Arc<ScriptedState>,
    delay: Duration,
}

impl ScriptedPresenter {
    fn with_decision(decision: Option<PresenterDecision>) -> Self {
        Self {
            state: Arc::new(ScriptedState {
                decision,
                presented: AtomicUsize::new(0),
                closed: AtomicUsize::new(0),
                last_surface: Mutex::new(None),
            }),
            delay: Duration::ZERO,
        }
    }

    pub fn confirming() -> Self {
        Self::with_decision(Some(PresenterDecision::Confirmed))
    }

    pub fn dismissing() -> Self {
        Self::with_decision(Some(PresenterDecision::Dismissed))
    }

    pub fn pending() -> Self {
        Self::with_decision(None)
    }

    /// Waits `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn presented(&self) -> usize {
        self.state.presented.load(Ordering::SeqCst)
    }

    /// Surfaces closed by the caller (future dropped) rather than by a decision.
    pub fn closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }

    pub fn last_surface(&self) -> Option<CustomSurface> {
        self.state
            .last_surface
            .lock()
            .ok()
            .and_then(|surface| surface.clone())
    }
}

/// Counts a close when dropped before a decision was returned.
struct OpenSurface<'a> {
    state: &'a ScriptedState,
    decided: bool,
}

impl Drop for OpenSurface<'_> {
    fn drop(&mut self) {
        if !self.decided {
            self.state.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl CustomUiPresenter for ScriptedPresenter {
    async fn present(&self, surface: &CustomSurface) -> PresenterDecision {
        self.state.presented.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.state.last_surface.lock() {
            *last = Some(surface.clone());
        }

        let mut open = OpenSurface {
            state: &self.state,
            decided: false,
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let decision = match self.state.decision {
            Some(decision) => decision,
            None => std::future::pending().await,
        };
        open.decided = true;
        decision
    }
}
