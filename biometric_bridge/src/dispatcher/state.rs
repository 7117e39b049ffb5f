use std::fmt;

use super::errors::DispatchError;

/// Lifecycle of one authentication request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Dispatched,
    CustomUiPending,
    SystemPromptPending,
    Resolved(bool),
}

impl DispatchState {
    pub fn can_transition_to(self, next: DispatchState) -> bool {
        use DispatchState::*;
        matches!(
            (self, next),
            (Idle, Dispatched)
                | (Dispatched, CustomUiPending)
                | (Dispatched, SystemPromptPending)
                // precondition and setup failures
                | (Dispatched, Resolved(false))
                | (CustomUiPending, SystemPromptPending)
                // dismissal, or the legacy sensor resolving under the surface
                | (CustomUiPending, Resolved(_))
                | (SystemPromptPending, Resolved(_))
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Dispatched => f.write_str("dispatched"),
            Self::CustomUiPending => f.write_str("custom_ui_pending"),
            Self::SystemPromptPending => f.write_str("system_prompt_pending"),
            Self::Resolved(outcome) => write!(f, "resolved({outcome})"),
        }
    }
}

/// Walks one request through [`DispatchState`], rejecting undefined edges.
#[derive(Debug)]
pub(crate) struct StateTracker {
    state: DispatchState,
    history: Vec<DispatchState>,
}

impl StateTracker {
    pub(crate) fn new() -> Self {
        Self {
            state: DispatchState::Idle,
            history: vec![DispatchState::Idle],
        }
    }

    pub(crate) fn advance(&mut self, next: DispatchState) -> Result<(), DispatchError> {
        if !self.state.can_transition_to(next) {
            return Err(DispatchError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!(from = %self.state, to = %next, "Dispatch transition");
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Moves to `Resolved(false)` unless already terminal.
    pub(crate) fn fail(&mut self) {
        if !self.state.is_terminal() {
            if let Err(e) = self.advance(DispatchState::Resolved(false)) {
                tracing::error!("Could not record failed resolution: {}", e);
            }
        }
    }

    pub(crate) fn state(&self) -> DispatchState {
        self.state
    }

    pub(crate) fn history(&self) -> &[DispatchState] {
        &self.history
    }
}
