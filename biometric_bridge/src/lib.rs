//! biometric-bridge - Uniform biometric authentication over native platforms
//!
//! This crate exposes one small surface (capability queries plus a single
//! `authenticate` call) over Android's biometric stack and Apple's
//! LocalAuthentication. The OS is reached through the [`BiometricPlatform`]
//! trait, implemented by host glue; an optional [`CustomUiPresenter`] gates
//! the OS prompt behind an application-styled surface.

mod capability;
mod channel;
mod config;
mod delivery;
mod dispatcher;
mod keystore;
mod platform;
mod presenter;
mod utils;

#[cfg(test)]
mod test_utils;

pub use capability::{BiometricKind, CapabilityError, CapabilitySnapshot, CapabilityStatus};

pub use channel::{ChannelError, ChannelErrorCode, MethodCall, handle_method_call};

pub use config::{
    BIOMETRIC_DEFAULT_CANCEL_TEXT, BIOMETRIC_DEFAULT_CONFIRM_TEXT, BIOMETRIC_DEFAULT_TITLE,
};

pub use dispatcher::{
    AuthenticationRequest, AuthenticationRequestBuilder, BiometricAuth, DispatchError,
    DispatchState,
};

pub use keystore::{CryptoToken, KeyStore, KeyStoreError, SoftwareKeyStore};

// Raw SDK code tables for host glue
pub use platform::{android, apple};
pub use platform::{
    BiometricPlatform, CancellationHandle, CeremonyCallback, CeremonyError, CeremonyEvent,
    PlatformError, PlatformFamily, SimulatedPlatform, SystemPrompt,
};

pub use presenter::{
    CustomSurface, CustomUiPresenter, PassthroughPresenter, PresenterDecision, ScriptedPresenter,
    SurfaceIcon,
};

/// Reads the configuration and reports invalid values. Optional: every
/// setting is otherwise read lazily on first use.
pub fn init() {
    config::log_effective_config();
}
