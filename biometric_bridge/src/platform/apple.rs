//! LocalAuthentication code tables (iOS and macOS).
//!
//! `canEvaluatePolicy(.deviceOwnerAuthenticationWithBiometrics)` reports
//! readiness as an optional `LAError`; `evaluatePolicy` completes with a
//! success flag and an optional `LAError`.

use crate::capability::{BiometricKind, CapabilityStatus};

use super::ceremony::CeremonyError;

pub const LA_ERROR_AUTHENTICATION_FAILED: i64 = -1;
pub const LA_ERROR_USER_CANCEL: i64 = -2;
pub const LA_ERROR_USER_FALLBACK: i64 = -3;
pub const LA_ERROR_SYSTEM_CANCEL: i64 = -4;
pub const LA_ERROR_PASSCODE_NOT_SET: i64 = -5;
pub const LA_ERROR_BIOMETRY_NOT_AVAILABLE: i64 = -6;
pub const LA_ERROR_BIOMETRY_NOT_ENROLLED: i64 = -7;
pub const LA_ERROR_BIOMETRY_LOCKOUT: i64 = -8;
pub const LA_ERROR_APP_CANCEL: i64 = -9;
pub const LA_ERROR_INVALID_CONTEXT: i64 = -10;
pub const LA_ERROR_BIOMETRY_NOT_PAIRED: i64 = -12;
pub const LA_ERROR_BIOMETRY_DISCONNECTED: i64 = -13;
pub const LA_ERROR_NOT_INTERACTIVE: i64 = -1004;

// LABiometryType raw values
pub const LA_BIOMETRY_TYPE_NONE: i64 = 0;
pub const LA_BIOMETRY_TYPE_TOUCH_ID: i64 = 1;
pub const LA_BIOMETRY_TYPE_FACE_ID: i64 = 2;

/// Readiness from the `canEvaluatePolicy` error (`None` when it succeeded).
///
/// A locked-out sensor cannot evaluate the policy right now, so it counts as
/// unavailable rather than unenrolled.
pub fn capability_status(error: Option<i64>) -> CapabilityStatus {
    match error {
        None => CapabilityStatus::Available,
        Some(LA_ERROR_BIOMETRY_NOT_ENROLLED) => CapabilityStatus::NotEnrolled,
        Some(LA_ERROR_BIOMETRY_NOT_AVAILABLE) | Some(LA_ERROR_BIOMETRY_LOCKOUT) => {
            CapabilityStatus::HardwareUnavailable
        }
        Some(LA_ERROR_BIOMETRY_NOT_PAIRED) => CapabilityStatus::NoHardware,
        Some(LA_ERROR_BIOMETRY_DISCONNECTED) => CapabilityStatus::HardwareUnavailable,
        Some(LA_ERROR_PASSCODE_NOT_SET) => CapabilityStatus::Unsupported,
        Some(other) => {
            tracing::warn!("Unexpected LAError from canEvaluatePolicy: {}", other);
            CapabilityStatus::Unknown
        }
    }
}

pub fn ceremony_error(code: i64) -> CeremonyError {
    match code {
        LA_ERROR_AUTHENTICATION_FAILED => CeremonyError::AuthenticationFailed,
        LA_ERROR_USER_CANCEL => CeremonyError::UserCancelled,
        LA_ERROR_USER_FALLBACK => CeremonyError::UserFallback,
        LA_ERROR_SYSTEM_CANCEL | LA_ERROR_APP_CANCEL => CeremonyError::SystemCancelled,
        LA_ERROR_BIOMETRY_LOCKOUT => CeremonyError::Lockout,
        LA_ERROR_BIOMETRY_NOT_AVAILABLE
        | LA_ERROR_BIOMETRY_NOT_PAIRED
        | LA_ERROR_BIOMETRY_DISCONNECTED => CeremonyError::HardwareUnavailable,
        LA_ERROR_BIOMETRY_NOT_ENROLLED => CeremonyError::NoBiometrics,
        LA_ERROR_PASSCODE_NOT_SET => CeremonyError::Other("passcode not set".to_string()),
        LA_ERROR_INVALID_CONTEXT => CeremonyError::Other("invalid context".to_string()),
        LA_ERROR_NOT_INTERACTIVE => CeremonyError::Other("not interactive".to_string()),
        other => CeremonyError::Other(format!("LAError {other}")),
    }
}

/// `LABiometryType` to modality. Types without a counterpart map to `None`.
pub fn biometry_kind(biometry_type: i64) -> BiometricKind {
    match biometry_type {
        LA_BIOMETRY_TYPE_TOUCH_ID => BiometricKind::Fingerprint,
        LA_BIOMETRY_TYPE_FACE_ID => BiometricKind::Face,
        LA_BIOMETRY_TYPE_NONE => BiometricKind::None,
        other => {
            tracing::debug!("Unmapped LABiometryType {}", other);
            BiometricKind::None
        }
    }
}

/// Apple devices expose a single biometry type.
pub fn kinds_from_biometry_type(biometry_type: i64) -> Vec<BiometricKind> {
    let kind = biometry_kind(biometry_type);
    if kind.is_modality() {
        vec![kind]
    } else {
        Vec::new()
    }
}
