use serde::Deserialize;
use serde_json::Value;

use crate::capability::BiometricKind;

/// A method name plus its JSON arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Arguments of `authenticate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AuthenticateArgs {
    #[serde(default)]
    pub biometric_type: Option<BiometricKind>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub confirm_text: Option<String>,
    #[serde(default)]
    pub cancel_text: Option<String>,
    #[serde(default, rename = "useCustomUI")]
    pub use_custom_ui: bool,
    #[serde(default)]
    pub use_legacy_dialog: bool,
}
