//! The seam between this crate and the operating system's biometric SDK.
//!
//! Host glue (JNI on Android, Swift/Objective-C on Apple platforms) implements
//! [`BiometricPlatform`] and forwards OS callbacks into [`CeremonyCallback`].
//! The `android` and `apple` modules translate the raw SDK codes.

pub mod android;
pub mod apple;
mod ceremony;
mod errors;
mod simulated;
mod types;

pub use ceremony::{CancellationHandle, CeremonyCallback, CeremonyError, CeremonyEvent};
pub use errors::PlatformError;
pub use simulated::SimulatedPlatform;
pub use types::{BiometricPlatform, PlatformFamily, SystemPrompt};
