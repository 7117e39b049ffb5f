//! Android code tables.
//!
//! Host glue passes the raw integers from `BiometricManager.canAuthenticate`,
//! `BiometricPrompt.AuthenticationCallback.onAuthenticationError` and
//! `FingerprintManager.AuthenticationCallback` through these functions.

use crate::capability::{BiometricKind, CapabilityStatus};

use super::ceremony::CeremonyError;

// BiometricManager.canAuthenticate(BIOMETRIC_STRONG)
pub const BIOMETRIC_SUCCESS: i32 = 0;
pub const BIOMETRIC_STATUS_UNKNOWN: i32 = -1;
pub const BIOMETRIC_ERROR_UNSUPPORTED: i32 = -2;
pub const BIOMETRIC_ERROR_HW_UNAVAILABLE: i32 = 1;
pub const BIOMETRIC_ERROR_NONE_ENROLLED: i32 = 11;
pub const BIOMETRIC_ERROR_NO_HARDWARE: i32 = 12;
pub const BIOMETRIC_ERROR_SECURITY_UPDATE_REQUIRED: i32 = 15;

// BiometricPrompt / FingerprintManager error codes
pub const ERROR_HW_UNAVAILABLE: i32 = 1;
pub const ERROR_UNABLE_TO_PROCESS: i32 = 2;
pub const ERROR_TIMEOUT: i32 = 3;
pub const ERROR_NO_SPACE: i32 = 4;
pub const ERROR_CANCELED: i32 = 5;
pub const ERROR_LOCKOUT: i32 = 7;
pub const ERROR_VENDOR: i32 = 8;
pub const ERROR_LOCKOUT_PERMANENT: i32 = 9;
pub const ERROR_USER_CANCELED: i32 = 10;
pub const ERROR_NO_BIOMETRICS: i32 = 11;
pub const ERROR_HW_NOT_PRESENT: i32 = 12;
pub const ERROR_NEGATIVE_BUTTON: i32 = 13;
pub const ERROR_NO_DEVICE_CREDENTIAL: i32 = 14;
pub const ERROR_SECURITY_UPDATE_REQUIRED: i32 = 15;

// PackageManager system features
pub const FEATURE_FINGERPRINT: &str = "android.hardware.fingerprint";
pub const FEATURE_FACE: &str = "android.hardware.biometrics.face";
pub const FEATURE_IRIS: &str = "android.hardware.biometrics.iris";

pub fn capability_status(code: i32) -> CapabilityStatus {
    match code {
        BIOMETRIC_SUCCESS => CapabilityStatus::Available,
        BIOMETRIC_ERROR_NONE_ENROLLED => CapabilityStatus::NotEnrolled,
        BIOMETRIC_ERROR_NO_HARDWARE => CapabilityStatus::NoHardware,
        BIOMETRIC_ERROR_HW_UNAVAILABLE => CapabilityStatus::HardwareUnavailable,
        BIOMETRIC_ERROR_SECURITY_UPDATE_REQUIRED => CapabilityStatus::SecurityUpdateRequired,
        BIOMETRIC_ERROR_UNSUPPORTED => CapabilityStatus::Unsupported,
        BIOMETRIC_STATUS_UNKNOWN => CapabilityStatus::Unknown,
        other => {
            tracing::warn!("Unknown BiometricManager status code: {}", other);
            CapabilityStatus::Unknown
        }
    }
}

/// Maps an `onAuthenticationError` code. The vendor-specific code that comes
/// with `ERROR_VENDOR` is passed as `vendor_code` when the host has it.
pub fn ceremony_error(code: i32, vendor_code: Option<i32>) -> CeremonyError {
    match code {
        ERROR_USER_CANCELED => CeremonyError::UserCancelled,
        ERROR_NEGATIVE_BUTTON => CeremonyError::NegativeButton,
        ERROR_CANCELED => CeremonyError::SystemCancelled,
        ERROR_LOCKOUT => CeremonyError::Lockout,
        ERROR_LOCKOUT_PERMANENT => CeremonyError::LockoutPermanent,
        ERROR_HW_UNAVAILABLE | ERROR_HW_NOT_PRESENT => CeremonyError::HardwareUnavailable,
        ERROR_NO_BIOMETRICS => CeremonyError::NoBiometrics,
        ERROR_TIMEOUT => CeremonyError::Timeout,
        ERROR_VENDOR => CeremonyError::Vendor(i64::from(vendor_code.unwrap_or(ERROR_VENDOR))),
        ERROR_UNABLE_TO_PROCESS => CeremonyError::Other("unable to process".to_string()),
        ERROR_NO_SPACE => CeremonyError::Other("no space".to_string()),
        ERROR_NO_DEVICE_CREDENTIAL => CeremonyError::Other("no device credential".to_string()),
        ERROR_SECURITY_UPDATE_REQUIRED => {
            CeremonyError::Other("security update required".to_string())
        }
        other => CeremonyError::Other(format!("unknown error code {other}")),
    }
}

/// Maps system features to modalities, keeping the order they were detected
/// in. Iris and unknown features have no counterpart and are skipped.
pub fn kinds_from_features<'a>(features: impl IntoIterator<Item = &'a str>) -> Vec<BiometricKind> {
    let mut kinds = Vec::new();
    for feature in features {
        let kind = match feature {
            FEATURE_FINGERPRINT => BiometricKind::Fingerprint,
            FEATURE_FACE => BiometricKind::Face,
            _ => continue,
        };
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}
