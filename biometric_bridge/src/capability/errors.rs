use thiserror::Error;

use super::types::CapabilityStatus;

/// Capability problems detected before a ceremony is started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// No usable biometric hardware (absent, unhealthy, or disabled by policy)
    #[error("Biometric authentication unavailable ({0})")]
    Unavailable(CapabilityStatus),

    /// Hardware is usable but no biometric credential is registered
    #[error("No biometric credential enrolled")]
    NotEnrolled,
}
