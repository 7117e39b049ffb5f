use serde_json::{Value, json};

use biometric_bridge::{
    BiometricKind, CapabilityStatus, ChannelErrorCode, MethodCall, PlatformFamily,
    ScriptedPresenter, SimulatedPlatform, handle_method_call,
};

use crate::common::TestSetup;

fn call(method: &str, arguments: Value) -> MethodCall {
    MethodCall::new(method, arguments)
}

#[tokio::test]
async fn test_host_session() {
    // Given a face-capable iPhone with nothing enrolled yet
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Ios)
            .with_kinds(vec![BiometricKind::Face])
            .with_status(CapabilityStatus::NotEnrolled),
        ScriptedPresenter::confirming(),
    );
    let auth = &setup.auth;

    // When the host probes the device
    let available = handle_method_call(auth, call("isAvailable", Value::Null)).await;
    let enrolled = handle_method_call(auth, call("isEnrolled", Value::Null)).await;
    let kinds = handle_method_call(auth, call("getAvailableBiometricTypes", Value::Null)).await;

    // Then hardware is reported present but unenrolled
    assert_eq!(available, Ok(json!(true)));
    assert_eq!(enrolled, Ok(json!(false)));
    assert_eq!(kinds, Ok(json!(["face"])));

    // And authenticating names the missing enrollment
    let args = json!({"biometricType": "face", "reason": "Open the app"});
    let err = handle_method_call(auth, call("authenticate", args.clone()))
        .await
        .unwrap_err();
    assert_eq!(err.code, ChannelErrorCode::BiometricNotEnrolled);

    // Once the user enrolls, the same call succeeds
    setup.platform.set_status(CapabilityStatus::Available);
    let result = handle_method_call(auth, call("authenticate", args)).await;
    assert_eq!(result, Ok(json!(true)));
}

#[tokio::test]
async fn test_custom_ui_dismiss_over_channel() {
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Android),
        ScriptedPresenter::dismissing(),
    );

    let result = handle_method_call(
        &setup.auth,
        call(
            "authenticate",
            json!({
                "biometricType": "fingerprint",
                "reason": "Delete account",
                "title": "Danger zone",
                "confirmText": "Delete",
                "cancelText": "Keep",
                "useCustomUI": true
            }),
        ),
    )
    .await;

    assert_eq!(result, Ok(json!(false)));
    assert_eq!(setup.platform.ceremony_starts(), 0);

    let surface = setup.presenter.last_surface().unwrap();
    assert_eq!(surface.title, "Danger zone");
    assert_eq!(surface.confirm_text, "Delete");
    assert_eq!(surface.cancel_text, "Keep");
}

#[tokio::test]
async fn test_legacy_dialog_over_channel() {
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Android).with_script(vec![]),
        ScriptedPresenter::dismissing(),
    );

    let result = handle_method_call(
        &setup.auth,
        call(
            "authenticate",
            json!({
                "biometricType": "fingerprint",
                "reason": "Unlock",
                "useCustomUI": true,
                "useLegacyDialog": true
            }),
        ),
    )
    .await;

    assert_eq!(result, Ok(json!(false)));
    assert_eq!(setup.platform.legacy_starts(), 1);
    assert_eq!(setup.platform.cancellations(), 1);
}

#[tokio::test]
async fn test_unknown_kind_string_is_none() {
    // Given a host that sends a modality this bridge does not know
    let setup = TestSetup::android();

    // When it asks for the custom surface with it
    let result = handle_method_call(
        &setup.auth,
        call(
            "authenticate",
            json!({"biometricType": "iris", "reason": "Sign in", "useCustomUI": true}),
        ),
    )
    .await;

    // Then the kind maps to none and the system prompt is used directly
    assert_eq!(result, Ok(json!(true)));
    assert_eq!(setup.presenter.presented(), 0);
    assert_eq!(
        setup.platform.last_prompt().unwrap().kind,
        BiometricKind::None
    );
}

#[tokio::test]
async fn test_unavailable_error_serializes_for_host() {
    let setup = TestSetup::new(
        SimulatedPlatform::new(PlatformFamily::Android)
            .with_status(CapabilityStatus::SecurityUpdateRequired),
        ScriptedPresenter::confirming(),
    );

    let err = handle_method_call(
        &setup.auth,
        call("authenticate", json!({"reason": "Sign in"})),
    )
    .await
    .unwrap_err();

    let wire = serde_json::to_value(&err).unwrap();
    assert_eq!(wire["code"], json!("BIOMETRIC_UNAVAILABLE"));
    assert!(
        wire["message"]
            .as_str()
            .unwrap()
            .contains("security_update_required")
    );
}
