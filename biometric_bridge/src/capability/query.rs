//! Capability queries. None of these suspend and none of them cache: every
//! call reads the platform's live status.

use super::errors::CapabilityError;
use super::types::{BiometricKind, CapabilitySnapshot, CapabilityStatus};
use crate::platform::BiometricPlatform;

pub(crate) fn is_available(platform: &dyn BiometricPlatform) -> bool {
    platform.capability_status().is_hardware_ready()
}

pub(crate) fn is_enrolled(platform: &dyn BiometricPlatform) -> bool {
    platform.capability_status().is_enrolled()
}

pub(crate) fn available_kinds(platform: &dyn BiometricPlatform) -> Vec<BiometricKind> {
    kinds_for_status(platform, platform.capability_status())
}

pub(crate) fn capability_snapshot(platform: &dyn BiometricPlatform) -> CapabilitySnapshot {
    let status = platform.capability_status();
    CapabilitySnapshot {
        available: status.is_hardware_ready(),
        enrolled: status.is_enrolled(),
        kinds: kinds_for_status(platform, status),
    }
}

/// Precondition for starting a ceremony.
pub(crate) fn require_ready(platform: &dyn BiometricPlatform) -> Result<(), CapabilityError> {
    let status = platform.capability_status();
    if !status.is_hardware_ready() {
        return Err(CapabilityError::Unavailable(status));
    }
    if !status.is_enrolled() {
        return Err(CapabilityError::NotEnrolled);
    }
    Ok(())
}

/// Hardware modalities in platform-detection order, or `[None]` when the
/// hardware is unusable or reports no modality. Never empty.
fn kinds_for_status(
    platform: &dyn BiometricPlatform,
    status: CapabilityStatus,
) -> Vec<BiometricKind> {
    if !status.is_hardware_ready() {
        return vec![BiometricKind::None];
    }

    let mut kinds: Vec<BiometricKind> = Vec::new();
    for kind in platform.hardware_kinds() {
        if kind.is_modality() && !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    if kinds.is_empty() {
        tracing::debug!("Biometric hardware reports no supported modality");
        kinds.push(BiometricKind::None);
    }
    kinds
}
