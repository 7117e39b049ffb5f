use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic biometric modality.
///
/// `None` stands both for "no hardware" and for "unspecified or unsupported";
/// the two cases are not distinguished.
///
/// The external string form is a fixed table (`"face"`, `"fingerprint"`,
/// `"none"`). Any other string maps to [`BiometricKind::None`] instead of
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BiometricKind {
    Face,
    Fingerprint,
    #[default]
    None,
}

impl BiometricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::Fingerprint => "fingerprint",
            Self::None => "none",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "face" => Self::Face,
            "fingerprint" => Self::Fingerprint,
            "none" => Self::None,
            other => {
                tracing::debug!("Unknown biometric type '{}', mapping to none", other);
                Self::None
            }
        }
    }

    /// True for an actual modality (face or fingerprint).
    pub fn is_modality(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<String> for BiometricKind {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<&str> for BiometricKind {
    fn from(value: &str) -> Self {
        Self::from_wire(value)
    }
}

impl fmt::Display for BiometricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness reported by the platform's biometric manager, mapped from
/// Android `BiometricManager` codes or Apple `LAError` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityStatus {
    Available,
    NotEnrolled,
    NoHardware,
    HardwareUnavailable,
    SecurityUpdateRequired,
    Unsupported,
    Unknown,
}

impl CapabilityStatus {
    /// Hardware is present, healthy and not disabled by policy. Enrollment is
    /// reported separately.
    pub fn is_hardware_ready(&self) -> bool {
        matches!(self, Self::Available | Self::NotEnrolled)
    }

    /// Only an explicit "not enrolled" status means nothing is enrolled; any
    /// other status counts as enrolled.
    pub fn is_enrolled(&self) -> bool {
        !matches!(self, Self::NotEnrolled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::NotEnrolled => "not_enrolled",
            Self::NoHardware => "no_hardware",
            Self::HardwareUnavailable => "hardware_unavailable",
            Self::SecurityUpdateRequired => "security_update_required",
            Self::Unsupported => "unsupported",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live answer to the three capability questions. Built on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySnapshot {
    pub available: bool,
    pub enrolled: bool,
    pub kinds: Vec<BiometricKind>,
}
