use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::errors::DispatchError;
use super::request::AuthenticationRequest;
use super::state::StateTracker;
use crate::capability::{self, BiometricKind, CapabilitySnapshot};
use crate::keystore::{KeyStore, SoftwareKeyStore};
use crate::platform::{BiometricPlatform, PlatformFamily};
use crate::presenter::{CustomUiPresenter, PassthroughPresenter, SurfaceSlot};

/// Entry point of the bridge: capability queries and `authenticate`.
///
/// Each call is independent; nothing is cached between requests. The only
/// state shared across requests is the slot that keeps a second custom
/// surface from opening while one is visible.
pub struct BiometricAuth {
    pub(super) platform: Arc<dyn BiometricPlatform>,
    pub(super) presenter: Arc<dyn CustomUiPresenter>,
    pub(super) key_store: Arc<dyn KeyStore>,
    pub(super) surface_slot: SurfaceSlot,
}

impl BiometricAuth {
    /// Uses [`PassthroughPresenter`] and [`SoftwareKeyStore`] until replaced.
    pub fn new(platform: impl BiometricPlatform) -> Self {
        Self {
            platform: Arc::new(platform),
            presenter: Arc::new(PassthroughPresenter),
            key_store: Arc::new(SoftwareKeyStore::new()),
            surface_slot: SurfaceSlot::default(),
        }
    }

    pub fn with_presenter(mut self, presenter: impl CustomUiPresenter) -> Self {
        self.presenter = Arc::new(presenter);
        self
    }

    pub fn with_key_store(mut self, key_store: impl KeyStore) -> Self {
        self.key_store = Arc::new(key_store);
        self
    }

    pub fn family(&self) -> PlatformFamily {
        self.platform.family()
    }

    pub fn is_available(&self) -> bool {
        capability::is_available(self.platform.as_ref())
    }

    pub fn is_enrolled(&self) -> bool {
        capability::is_enrolled(self.platform.as_ref())
    }

    pub fn available_kinds(&self) -> Vec<BiometricKind> {
        capability::available_kinds(self.platform.as_ref())
    }

    pub fn capability_snapshot(&self) -> CapabilitySnapshot {
        capability::capability_snapshot(self.platform.as_ref())
    }

    /// True while a request of this instance shows its custom surface.
    pub fn is_surface_visible(&self) -> bool {
        self.surface_slot.is_occupied()
    }

    /// Runs one authentication request to completion.
    ///
    /// Returns `Err` only for the named failures of [`DispatchError`]. Every
    /// outcome of a started ceremony (success, cancellation, lockout, errors)
    /// is `Ok(bool)`, and exactly one is produced.
    pub async fn authenticate(
        &self,
        request: AuthenticationRequest,
    ) -> Result<bool, DispatchError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "biometric_authenticate",
            %request_id,
            kind = %request.kind(),
            family = %self.platform.family()
        );

        async move {
            tracing::info!(
                custom_ui = request.use_custom_ui(),
                legacy_dialog = request.use_legacy_dialog(),
                "Authentication requested"
            );

            let mut tracker = StateTracker::new();
            let result = self.dispatch(&request, &mut tracker).await;
            tracing::debug!(
                state = %tracker.state(),
                path = ?tracker.history(),
                "Dispatch finished"
            );

            match result {
                Ok(outcome) => {
                    tracing::info!(outcome, "Authentication resolved");
                    Ok(outcome)
                }
                Err(e) => Err(e.log()),
            }
        }
        .instrument(span)
        .await
    }
}
