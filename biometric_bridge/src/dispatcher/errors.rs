//! Error types for the authentication dispatcher

use thiserror::Error;

use super::state::DispatchState;
use crate::capability::{CapabilityError, CapabilityStatus};
use crate::keystore::KeyStoreError;
use crate::platform::PlatformError;

/// Named failures of `authenticate`.
///
/// Only problems found before the ceremony starts, plus setup failures on the
/// legacy path, are reported here. Anything that happens once the ceremony is
/// running (cancellation, lockout, hardware errors) resolves to `Ok(false)`.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No usable biometric hardware
    #[error("Biometric authentication unavailable ({0})")]
    Unavailable(CapabilityStatus),

    /// Hardware is usable but nothing is enrolled
    #[error("No biometric credential enrolled")]
    NotEnrolled,

    /// The legacy path could not obtain its crypto token
    #[error("Key setup failed: {0}")]
    KeySetup(#[from] KeyStoreError),

    /// The legacy path could not start the sensor
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// The request itself is malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The state machine was driven along an edge it does not have
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: DispatchState,
        to: DispatchState,
    },
}

impl From<CapabilityError> for DispatchError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::Unavailable(status) => Self::Unavailable(status),
            CapabilityError::NotEnrolled => Self::NotEnrolled,
        }
    }
}

impl DispatchError {
    /// Log the error and return self
    ///
    /// Capability failures are expected on many devices and are logged as
    /// warnings; everything else is an error.
    pub fn log(self) -> Self {
        match &self {
            Self::Unavailable(status) => {
                tracing::warn!("Biometric authentication unavailable: {}", status)
            }
            Self::NotEnrolled => tracing::warn!("No biometric credential enrolled"),
            Self::KeySetup(err) => tracing::error!("Key setup failed: {}", err),
            Self::Platform(err) => tracing::error!("Platform error: {}", err),
            Self::InvalidRequest(msg) => tracing::error!("Invalid request: {}", msg),
            Self::InvalidTransition { from, to } => {
                tracing::error!("Invalid state transition: {} -> {}", from, to)
            }
        }
        self
    }
}
