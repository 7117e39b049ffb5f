use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::ceremony::{CancellationHandle, CeremonyCallback};
use super::errors::PlatformError;
use crate::capability::{BiometricKind, CapabilityStatus};
use crate::keystore::CryptoToken;

/// Operating system family a backend runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Android,
    Ios,
    MacOs,
}

impl PlatformFamily {
    /// Apple platforms need to know which modality to describe up front.
    pub fn requires_kind(self) -> bool {
        !matches!(self, Self::Android)
    }

    /// Only Android lets the caller label the prompt's cancel button.
    pub fn honors_cancel_text(self) -> bool {
        matches!(self, Self::Android)
    }

    /// Only Android has the deprecated fingerprint primitive behind the
    /// legacy dialog.
    pub fn supports_legacy_dialog(self) -> bool {
        matches!(self, Self::Android)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::MacOs => "macos",
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformFamily {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "macos" => Ok(Self::MacOs),
            other => Err(PlatformError::Config(format!(
                "Unknown platform family: {other}"
            ))),
        }
    }
}

/// Copy handed to the OS prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt {
    pub kind: BiometricKind,
    pub title: String,
    pub reason: String,
    pub confirm_text: Option<String>,
    /// Present only on platforms that honor a custom cancel label
    pub cancel_text: Option<String>,
}

/// Operating system biometric subsystem.
///
/// Capability methods are synchronous and must not block on user
/// interaction. Ceremonies are callback based: `start_*` returns as soon as
/// the OS prompt is up and the outcome arrives later through the callback.
pub trait BiometricPlatform: Send + Sync + 'static {
    fn family(&self) -> PlatformFamily;

    /// Live readiness of the strong biometric policy.
    fn capability_status(&self) -> CapabilityStatus;

    /// Modalities the hardware supports, in detection order. Says nothing
    /// about enrollment.
    fn hardware_kinds(&self) -> Vec<BiometricKind>;

    /// Shows the OS prompt. The platform reports through `callback` until it
    /// delivers a terminal success or error.
    fn start_ceremony(
        &self,
        prompt: SystemPrompt,
        callback: CeremonyCallback,
    ) -> Result<CancellationHandle, PlatformError>;

    /// Starts the deprecated fingerprint primitive used by the legacy dialog.
    /// The sensor keeps listening until a terminal callback or cancellation.
    fn start_legacy_ceremony(
        &self,
        token: CryptoToken,
        callback: CeremonyCallback,
    ) -> Result<CancellationHandle, PlatformError> {
        let _ = (token, callback);
        Err(PlatformError::Unsupported(format!(
            "legacy fingerprint ceremony on {}",
            self.family()
        )))
    }
}
