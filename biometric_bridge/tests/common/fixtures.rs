use std::sync::Once;

use biometric_bridge::{
    AuthenticationRequest, BiometricAuth, BiometricKind, PlatformFamily, ScriptedPresenter,
    SimulatedPlatform,
};

/// Loads `.env_test` once, before any configuration is read.
pub fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });
}

/// A bridge wired to a simulated device and a scripted presenter. The
/// platform and presenter handles share state with the ones inside `auth`.
pub struct TestSetup {
    pub platform: SimulatedPlatform,
    pub presenter: ScriptedPresenter,
    pub auth: BiometricAuth,
}

impl TestSetup {
    pub fn new(platform: SimulatedPlatform, presenter: ScriptedPresenter) -> Self {
        init_test_environment();
        let auth = BiometricAuth::new(platform.clone()).with_presenter(presenter.clone());
        Self {
            platform,
            presenter,
            auth,
        }
    }

    /// Android device with enrolled fingerprint hardware, confirming presenter.
    #[allow(dead_code)]
    pub fn android() -> Self {
        Self::new(
            SimulatedPlatform::new(PlatformFamily::Android),
            ScriptedPresenter::confirming(),
        )
    }

    /// iPhone with enrolled Face ID, confirming presenter.
    #[allow(dead_code)]
    pub fn iphone() -> Self {
        Self::new(
            SimulatedPlatform::new(PlatformFamily::Ios).with_kinds(vec![BiometricKind::Face]),
            ScriptedPresenter::confirming(),
        )
    }

    pub async fn authenticate(
        &self,
        request: AuthenticationRequest,
    ) -> Result<bool, biometric_bridge::DispatchError> {
        self.auth.authenticate(request).await
    }
}

/// System-prompt request for `kind`.
#[allow(dead_code)]
pub fn system_request(kind: BiometricKind) -> AuthenticationRequest {
    AuthenticationRequest::builder("Confirm payment of 20 EUR")
        .kind(kind)
        .build()
        .expect("valid request")
}

/// Request going through the custom surface first.
#[allow(dead_code)]
pub fn custom_request(kind: BiometricKind) -> AuthenticationRequest {
    AuthenticationRequest::builder("Confirm payment of 20 EUR")
        .kind(kind)
        .title("Payment")
        .use_custom_ui(true)
        .build()
        .expect("valid request")
}

/// Request asking for the Android legacy dialog.
#[allow(dead_code)]
pub fn legacy_request(kind: BiometricKind) -> AuthenticationRequest {
    AuthenticationRequest::builder("Unlock your notes")
        .kind(kind)
        .use_custom_ui(true)
        .use_legacy_dialog(true)
        .build()
        .expect("valid request")
}
