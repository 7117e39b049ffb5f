use serde_json::Value;

use super::errors::{ChannelError, ChannelErrorCode, IntoChannelError};
use super::types::{AuthenticateArgs, MethodCall};
use crate::capability::BiometricKind;
use crate::dispatcher::{AuthenticationRequest, BiometricAuth};

/// Routes one method call to `auth` and encodes the answer.
///
/// Capability methods never fail. `authenticate` answers `true`/`false` for
/// every ceremony outcome and a [`ChannelError`] for the named failures.
pub async fn handle_method_call(
    auth: &BiometricAuth,
    call: MethodCall,
) -> Result<Value, ChannelError> {
    tracing::debug!(method = %call.method, "Method call received");

    match call.method.as_str() {
        "isAvailable" => Ok(Value::Bool(auth.is_available())),
        "isEnrolled" => Ok(Value::Bool(auth.is_enrolled())),
        "getAvailableBiometricTypes" => Ok(Value::from(
            auth.available_kinds()
                .iter()
                .map(BiometricKind::as_str)
                .collect::<Vec<_>>(),
        )),
        "getCapability" => serde_json::to_value(auth.capability_snapshot())
            .map_err(|e| ChannelError::new(ChannelErrorCode::Internal, e.to_string())),
        "authenticate" => {
            let request = parse_authenticate(auth, call.arguments)?;
            let outcome = auth.authenticate(request).await.into_channel_error()?;
            Ok(Value::Bool(outcome))
        }
        other => {
            tracing::warn!("Unknown method: {}", other);
            Err(ChannelError::new(
                ChannelErrorCode::NotImplemented,
                format!("Method '{other}' is not implemented"),
            ))
        }
    }
}

fn parse_authenticate(
    auth: &BiometricAuth,
    arguments: Value,
) -> Result<AuthenticationRequest, ChannelError> {
    let args: AuthenticateArgs = if arguments.is_null() {
        AuthenticateArgs::default()
    } else {
        serde_json::from_value(arguments).into_channel_error()?
    };

    let family = auth.family();
    let kind = match args.biometric_type {
        Some(kind) => kind,
        None if family.requires_kind() => {
            return Err(ChannelError::invalid_arguments(format!(
                "biometricType is required on {family}"
            )));
        }
        None => BiometricKind::None,
    };

    let Some(reason) = args.reason else {
        return Err(ChannelError::invalid_arguments("reason is required"));
    };

    let mut builder = AuthenticationRequest::builder(reason)
        .kind(kind)
        .use_custom_ui(args.use_custom_ui)
        .use_legacy_dialog(args.use_legacy_dialog);
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    if let Some(confirm_text) = args.confirm_text {
        builder = builder.confirm_text(confirm_text);
    }
    if let Some(cancel_text) = args.cancel_text {
        builder = builder.cancel_text(cancel_text);
    }

    builder.build().into_channel_error()
}
