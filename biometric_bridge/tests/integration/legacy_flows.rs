use std::time::Duration;

use biometric_bridge::{
    BiometricAuth, BiometricKind, CeremonyError, CeremonyEvent, DispatchError, PlatformFamily,
    ScriptedPresenter, SimulatedPlatform, SoftwareKeyStore,
};

use crate::common::{
    FailingKeyStore, SilentPlatform, TestSetup, init_test_environment, legacy_request,
};

#[tokio::test]
async fn test_dismiss_and_cancel_error_deliver_once() {
    // Given a legacy sensor that keeps listening until cancelled, and a user
    // who dismisses the surface
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Android).with_script(vec![]),
        ScriptedPresenter::dismissing(),
    );

    // When the legacy dialog is requested
    let result = setup
        .authenticate(legacy_request(BiometricKind::Fingerprint))
        .await;

    // Then the dismissal resolves the request, the sensor is cancelled once,
    // and the platform's resulting cancel error is dropped
    assert!(!result.unwrap());
    assert_eq!(setup.platform.legacy_starts(), 1);
    assert_eq!(setup.platform.cancellations(), 1);
    assert_eq!(setup.platform.ceremony_starts(), 0);

    // And the late cancel error arrives, and is refused
    tokio::time::timeout(Duration::from_secs(1), async {
        while setup.platform.rejected_events() == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .unwrap();
    assert_eq!(setup.platform.rejected_events(), 1);
    assert!(!setup.auth.is_surface_visible());
}

#[tokio::test]
async fn test_sensor_losing_callback_abandons_request() {
    init_test_environment();
    // Given a sensor that drops its callback without reporting, and a user
    // who leaves the surface open
    let platform = SilentPlatform::new();
    let presenter = ScriptedPresenter::pending();
    let auth = BiometricAuth::new(platform.clone()).with_presenter(presenter.clone());

    // When the legacy dialog is requested
    let result = tokio::time::timeout(
        Duration::from_secs(1),
        auth.authenticate(legacy_request(BiometricKind::Fingerprint)),
    )
    .await;

    // Then the request resolves false instead of waiting on the surface
    assert!(!result.unwrap().unwrap());
    assert_eq!(platform.legacy_starts(), 1);
    assert_eq!(presenter.presented(), 1);
    assert_eq!(presenter.closed(), 1);
    assert!(!auth.is_surface_visible());
}

#[tokio::test]
async fn test_sensor_success_closes_surface() {
    // Given a surface left open and a sensor that matches after a misread
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Android)
            .with_script(vec![CeremonyEvent::Failed, CeremonyEvent::Succeeded])
            .with_event_delay(Duration::from_millis(5)),
        ScriptedPresenter::pending(),
    );

    // When the legacy dialog is requested
    let result = setup
        .authenticate(legacy_request(BiometricKind::Fingerprint))
        .await;

    // Then the sensor decides, and the surface was closed without a decision
    assert!(result.unwrap());
    assert_eq!(setup.presenter.presented(), 1);
    assert_eq!(setup.presenter.closed(), 1);
    assert_eq!(setup.platform.cancellations(), 0);

    let surface = setup.presenter.last_surface().unwrap();
    assert!(surface.legacy);
}

#[tokio::test]
async fn test_sensor_lockout_closes_surface() {
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Android).with_script(vec![
            CeremonyEvent::Failed,
            CeremonyEvent::Error(CeremonyError::Lockout),
        ]),
        ScriptedPresenter::pending(),
    );

    let result = setup
        .authenticate(legacy_request(BiometricKind::Fingerprint))
        .await;

    assert!(!result.unwrap());
    assert_eq!(setup.presenter.closed(), 1);
    assert!(!setup.auth.is_surface_visible());
}

#[tokio::test]
async fn test_legacy_ceremony_receives_configured_key() {
    let setup = TestSetup::android();
    let key_store = SoftwareKeyStore::new();
    let auth = BiometricAuth::new(setup.platform.clone())
        .with_presenter(ScriptedPresenter::pending())
        .with_key_store(key_store.clone());

    let result = auth
        .authenticate(legacy_request(BiometricKind::Fingerprint))
        .await;

    assert!(result.unwrap());
    let token = setup.platform.last_token().unwrap();
    assert_eq!(token.alias(), "biometric_bridge_test_key");
    assert!(!token.nonce().is_empty());
    assert!(key_store.has_key("biometric_bridge_test_key"));
}

#[tokio::test]
async fn test_key_setup_failure_is_named() {
    init_test_environment();
    // Given a key invalidated by a new enrollment
    let platform = SimulatedPlatform::new(PlatformFamily::Android);
    let presenter = ScriptedPresenter::confirming();
    let auth = BiometricAuth::new(platform.clone())
        .with_presenter(presenter.clone())
        .with_key_store(FailingKeyStore);

    // When the legacy dialog is requested
    let result = auth
        .authenticate(legacy_request(BiometricKind::Fingerprint))
        .await;

    // Then the failure is reported, and neither the sensor nor the surface ran
    assert!(matches!(result, Err(DispatchError::KeySetup(_))));
    assert_eq!(platform.legacy_starts(), 0);
    assert_eq!(presenter.presented(), 0);
}

#[tokio::test]
async fn test_sensor_start_failure_is_named() {
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Android).with_start_failure("sensor busy"),
        ScriptedPresenter::pending(),
    );

    let result = setup
        .authenticate(legacy_request(BiometricKind::Fingerprint))
        .await;

    assert!(matches!(result, Err(DispatchError::Platform(_))));
    assert_eq!(setup.presenter.presented(), 0);
    assert!(!setup.auth.is_surface_visible());
}

#[tokio::test]
async fn test_legacy_ignored_outside_android() {
    // Given an iPhone, where the legacy primitive does not exist
    let setup = TestSetup::iphone();

    // When the legacy dialog is requested
    let result = setup
        .authenticate(legacy_request(BiometricKind::Face))
        .await;

    // Then the regular custom surface and system prompt are used
    assert!(result.unwrap());
    assert_eq!(setup.platform.legacy_starts(), 0);
    assert_eq!(setup.platform.ceremony_starts(), 1);
    assert!(!setup.presenter.last_surface().unwrap().legacy);
}

#[tokio::test]
async fn test_legacy_face_uses_regular_surface() {
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Android)
            .with_kinds(vec![BiometricKind::Face, BiometricKind::Fingerprint]),
        ScriptedPresenter::confirming(),
    );

    let result = setup
        .authenticate(legacy_request(BiometricKind::Face))
        .await;

    assert!(result.unwrap());
    assert_eq!(setup.platform.legacy_starts(), 0);
    assert_eq!(setup.platform.ceremony_starts(), 1);
}

#[tokio::test]
async fn test_legacy_confirm_counts_as_dismissal() {
    // Given a presenter that (incorrectly) offers a confirm action on the
    // legacy surface, and a sensor still waiting for a finger
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Android).with_script(vec![]),
        ScriptedPresenter::confirming(),
    );

    let result = setup
        .authenticate(legacy_request(BiometricKind::Fingerprint))
        .await;

    assert!(!result.unwrap());
    assert_eq!(setup.platform.cancellations(), 1);
}
