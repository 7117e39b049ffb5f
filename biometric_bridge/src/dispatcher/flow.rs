//! The three ways a request reaches the ceremony: straight to the OS prompt,
//! through the custom surface, or through the legacy dialog that runs the
//! sensor underneath the surface.

use super::core::BiometricAuth;
use super::errors::DispatchError;
use super::request::AuthenticationRequest;
use super::state::{DispatchState, StateTracker};
use crate::capability::{self, BiometricKind};
use crate::config::{
    BIOMETRIC_DEFAULT_CANCEL_TEXT, BIOMETRIC_DEFAULT_TITLE, BIOMETRIC_LEGACY_DIALOG,
    BIOMETRIC_LEGACY_KEY_ALIAS,
};
use crate::delivery::{self, FailureReason, Resolution};
use crate::platform::{CeremonyCallback, PlatformFamily, SystemPrompt};
use crate::presenter::{CustomSurface, PresenterDecision};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    SystemPrompt,
    CustomUi(CustomSurface),
    LegacyDialog(CustomSurface),
}

impl Route {
    pub(crate) fn select(
        request: &AuthenticationRequest,
        family: PlatformFamily,
        legacy_enabled: bool,
    ) -> Self {
        if !request.use_custom_ui() {
            return Self::SystemPrompt;
        }

        // The legacy primitive only reads fingerprints
        let legacy = request.use_legacy_dialog()
            && legacy_enabled
            && family.supports_legacy_dialog()
            && request.kind() == BiometricKind::Fingerprint;
        if request.use_legacy_dialog() && !legacy {
            tracing::debug!("Legacy dialog not applicable, using the regular surface");
        }

        match CustomSurface::for_request(request, legacy) {
            Some(surface) if legacy => Self::LegacyDialog(surface),
            Some(surface) => Self::CustomUi(surface),
            None => {
                tracing::debug!("No modality requested, skipping the custom surface");
                Self::SystemPrompt
            }
        }
    }
}

impl SystemPrompt {
    pub(crate) fn for_request(request: &AuthenticationRequest, family: PlatformFamily) -> Self {
        let cancel_text = if family.honors_cancel_text() {
            // Android's prompt always needs a negative button label
            Some(
                request
                    .cancel_text()
                    .map(str::to_string)
                    .unwrap_or_else(|| BIOMETRIC_DEFAULT_CANCEL_TEXT.clone()),
            )
        } else {
            if request.cancel_text().is_some() {
                tracing::debug!("Cancel text is not supported on {}, dropping it", family);
            }
            None
        };

        Self {
            kind: request.kind(),
            title: request
                .title()
                .map(str::to_string)
                .unwrap_or_else(|| BIOMETRIC_DEFAULT_TITLE.clone()),
            reason: request.reason().to_string(),
            confirm_text: request.confirm_text().map(str::to_string),
            cancel_text,
        }
    }
}

impl BiometricAuth {
    /// Drives `tracker` from `Idle` to `Resolved`.
    pub(crate) async fn dispatch(
        &self,
        request: &AuthenticationRequest,
        tracker: &mut StateTracker,
    ) -> Result<bool, DispatchError> {
        tracker.advance(DispatchState::Dispatched)?;

        let resolution = match self.run_route(request, tracker).await {
            Ok(resolution) => resolution,
            Err(e) => {
                tracker.fail();
                return Err(e);
            }
        };

        if let Resolution::Failure(reason) = &resolution {
            tracing::debug!(?reason, "Request failed");
        }
        let outcome = resolution.is_success();
        tracker.advance(DispatchState::Resolved(outcome))?;
        Ok(outcome)
    }

    async fn run_route(
        &self,
        request: &AuthenticationRequest,
        tracker: &mut StateTracker,
    ) -> Result<Resolution, DispatchError> {
        capability::require_ready(self.platform.as_ref())?;

        let family = self.platform.family();
        match Route::select(request, family, *BIOMETRIC_LEGACY_DIALOG) {
            Route::SystemPrompt => {
                tracker.advance(DispatchState::SystemPromptPending)?;
                Ok(self.run_system_prompt(request, family).await)
            }
            Route::CustomUi(surface) => self.run_custom_ui(request, surface, tracker).await,
            Route::LegacyDialog(surface) => self.run_legacy_dialog(surface, tracker).await,
        }
    }

    async fn run_system_prompt(
        &self,
        request: &AuthenticationRequest,
        family: PlatformFamily,
    ) -> Resolution {
        let prompt = SystemPrompt::for_request(request, family);
        let (sender, mut receiver) = delivery::channel();

        let handle = match self
            .platform
            .start_ceremony(prompt, CeremonyCallback::new(sender))
        {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!("Failed to start biometric ceremony: {}", e);
                return Resolution::failure(FailureReason::CeremonyNotStarted(e.to_string()));
            }
        };

        let resolution = receiver.recv().await;
        handle.disarm();
        resolution
    }

    async fn run_custom_ui(
        &self,
        request: &AuthenticationRequest,
        surface: CustomSurface,
        tracker: &mut StateTracker,
    ) -> Result<Resolution, DispatchError> {
        let Some(lease) = self.surface_slot.try_acquire() else {
            tracing::warn!("Another authentication surface is already visible");
            return Ok(Resolution::failure(FailureReason::SurfaceBusy));
        };

        tracker.advance(DispatchState::CustomUiPending)?;
        let decision = self.presenter.present(&surface).await;
        drop(lease);

        match decision {
            PresenterDecision::Dismissed => {
                tracing::info!("Custom surface dismissed");
                Ok(Resolution::failure(FailureReason::Dismissed))
            }
            PresenterDecision::Confirmed => {
                tracker.advance(DispatchState::SystemPromptPending)?;
                Ok(self.run_system_prompt(request, self.platform.family()).await)
            }
        }
    }

    /// The sensor listens while the surface is up. Whichever ends first, the
    /// ceremony or the surface, decides the outcome; the other side is closed.
    async fn run_legacy_dialog(
        &self,
        surface: CustomSurface,
        tracker: &mut StateTracker,
    ) -> Result<Resolution, DispatchError> {
        let Some(lease) = self.surface_slot.try_acquire() else {
            tracing::warn!("Another authentication surface is already visible");
            return Ok(Resolution::failure(FailureReason::SurfaceBusy));
        };

        let token = self
            .key_store
            .crypto_token(BIOMETRIC_LEGACY_KEY_ALIAS.as_str())?;

        // Only the platform's callback owns the channel, so a platform that
        // drops it unresolved ends the request as abandoned.
        let (sender, mut receiver) = delivery::channel();
        let dismissal = sender.downgrade();
        let handle = self
            .platform
            .start_legacy_ceremony(token, CeremonyCallback::new(sender))?;
        tracker.advance(DispatchState::CustomUiPending)?;

        let resolution = tokio::select! {
            biased;
            resolution = receiver.recv() => {
                handle.disarm();
                resolution
            }
            decision = self.presenter.present(&surface) => {
                if decision == PresenterDecision::Confirmed {
                    tracing::warn!("Legacy surface has no confirm action, treating as dismissal");
                }
                dismissal.deliver(Resolution::failure(FailureReason::Dismissed));
                // The platform answers the cancellation with its own error
                // callback, which the delivery guard drops.
                handle.cancel();
                receiver.recv().await
            }
        };
        drop(lease);

        Ok(resolution)
    }
}
