//! Central configuration for the biometric_bridge crate
//!
//! Every value is read once from the environment and falls back to a default
//! when unset or invalid.

use std::{env, sync::LazyLock};

/// Title shown on the system prompt and the custom surface when the request
/// does not carry one.
pub static BIOMETRIC_DEFAULT_TITLE: LazyLock<String> =
    LazyLock::new(|| text_or_default("BIOMETRIC_DEFAULT_TITLE", "Biometric authentication"));

/// Label of the confirm action on the custom surface.
pub static BIOMETRIC_DEFAULT_CONFIRM_TEXT: LazyLock<String> =
    LazyLock::new(|| text_or_default("BIOMETRIC_DEFAULT_CONFIRM_TEXT", "Authenticate"));

/// Label of the cancel action. Android requires a negative button on its
/// prompt, so this is also used there when the request carries no cancel text.
pub static BIOMETRIC_DEFAULT_CANCEL_TEXT: LazyLock<String> =
    LazyLock::new(|| text_or_default("BIOMETRIC_DEFAULT_CANCEL_TEXT", "Cancel"));

/// Key-store alias used to obtain the crypto token for the legacy dialog path.
pub(crate) static BIOMETRIC_LEGACY_KEY_ALIAS: LazyLock<String> = LazyLock::new(|| {
    text_or_default("BIOMETRIC_LEGACY_KEY_ALIAS", "biometric_bridge_legacy_key")
});

/// Whether requests asking for the legacy dialog may take that path.
/// When disabled they are served by the ordinary custom surface.
pub(crate) static BIOMETRIC_LEGACY_DIALOG: LazyLock<bool> = LazyLock::new(|| {
    parse_flag(
        "BIOMETRIC_LEGACY_DIALOG",
        env::var("BIOMETRIC_LEGACY_DIALOG").ok(),
        true,
    )
});

fn text_or_default(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        Ok(_) => {
            tracing::warn!("{} is empty. Using default '{}'", name, default);
            default.to_string()
        }
        Err(_) => default.to_string(),
    }
}

fn parse_flag(name: &str, value: Option<String>, default: bool) -> bool {
    match value {
        None => default,
        Some(v) => match v.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            invalid => {
                tracing::warn!("Invalid {}: {}. Using default '{}'", name, invalid, default);
                default
            }
        },
    }
}

/// Forces every setting to be read so invalid values are reported at startup.
pub(crate) fn log_effective_config() {
    tracing::info!(
        title = %*BIOMETRIC_DEFAULT_TITLE,
        confirm = %*BIOMETRIC_DEFAULT_CONFIRM_TEXT,
        cancel = %*BIOMETRIC_DEFAULT_CANCEL_TEXT,
        legacy_dialog = *BIOMETRIC_LEGACY_DIALOG,
        legacy_key_alias = %*BIOMETRIC_LEGACY_KEY_ALIAS,
        "Biometric bridge configuration"
    );
}
