use async_trait::async_trait;
use serde::Serialize;

use crate::capability::BiometricKind;
use crate::config::{
    BIOMETRIC_DEFAULT_CANCEL_TEXT, BIOMETRIC_DEFAULT_CONFIRM_TEXT, BIOMETRIC_DEFAULT_TITLE,
};
use crate::dispatcher::AuthenticationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceIcon {
    Face,
    Fingerprint,
}

impl SurfaceIcon {
    pub fn for_kind(kind: BiometricKind) -> Option<Self> {
        match kind {
            BiometricKind::Face => Some(Self::Face),
            BiometricKind::Fingerprint => Some(Self::Fingerprint),
            BiometricKind::None => None,
        }
    }
}

/// What the custom confirmation surface shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSurface {
    pub title: String,
    pub reason: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub icon: SurfaceIcon,
    /// The sensor is already listening and there is no confirm action
    pub legacy: bool,
}

impl CustomSurface {
    /// `None` when the request names no modality to draw.
    pub(crate) fn for_request(request: &AuthenticationRequest, legacy: bool) -> Option<Self> {
        let icon = SurfaceIcon::for_kind(request.kind())?;
        Some(Self {
            title: request
                .title()
                .map(str::to_string)
                .unwrap_or_else(|| BIOMETRIC_DEFAULT_TITLE.clone()),
            reason: request.reason().to_string(),
            confirm_text: request
                .confirm_text()
                .map(str::to_string)
                .unwrap_or_else(|| BIOMETRIC_DEFAULT_CONFIRM_TEXT.clone()),
            cancel_text: request
                .cancel_text()
                .map(str::to_string)
                .unwrap_or_else(|| BIOMETRIC_DEFAULT_CANCEL_TEXT.clone()),
            icon,
            legacy,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterDecision {
    Confirmed,
    Dismissed,
}

/// Application-styled surface shown before the OS prompt.
///
/// It does not authenticate anybody; it only gates entry to the ceremony.
#[async_trait]
pub trait CustomUiPresenter: Send + Sync + 'static {
    /// Shows `surface` and waits for the user to confirm or dismiss it (back
    /// button, tap outside and explicit cancel all count as dismissal).
    ///
    /// Dropping the returned future must close the surface.
    async fn present(&self, surface: &CustomSurface) -> PresenterDecision;
}

/// Presenter for hosts without a custom surface: the gate opens at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughPresenter;

#[async_trait]
impl CustomUiPresenter for PassthroughPresenter {
    async fn present(&self, _surface: &CustomSurface) -> PresenterDecision {
        PresenterDecision::Confirmed
    }
}
