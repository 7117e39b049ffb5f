use serde::Serialize;
use thiserror::Error;

use crate::dispatcher::DispatchError;

/// Error codes seen by the host. Their string form is part of the wire
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelErrorCode {
    BiometricUnavailable,
    BiometricNotEnrolled,
    KeySetupFailed,
    PlatformError,
    InvalidArguments,
    NotImplemented,
    Internal,
}

impl ChannelErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BiometricUnavailable => "BIOMETRIC_UNAVAILABLE",
            Self::BiometricNotEnrolled => "BIOMETRIC_NOT_ENROLLED",
            Self::KeySetupFailed => "KEY_SETUP_FAILED",
            Self::PlatformError => "PLATFORM_ERROR",
            Self::InvalidArguments => "INVALID_ARGUMENTS",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::Internal => "INTERNAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{}: {message}", .code.as_str())]
pub struct ChannelError {
    pub code: ChannelErrorCode,
    pub message: String,
}

impl ChannelError {
    pub fn new(code: ChannelErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(super) fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ChannelErrorCode::InvalidArguments, message)
    }
}

/// Helper trait for converting library errors into the channel's error form
pub(super) trait IntoChannelError<T> {
    fn into_channel_error(self) -> Result<T, ChannelError>;
}

impl<T> IntoChannelError<T> for Result<T, DispatchError> {
    fn into_channel_error(self) -> Result<T, ChannelError> {
        self.map_err(|e| {
            let code = match e {
                DispatchError::Unavailable(_) => ChannelErrorCode::BiometricUnavailable,
                DispatchError::NotEnrolled => ChannelErrorCode::BiometricNotEnrolled,
                DispatchError::KeySetup(_) => ChannelErrorCode::KeySetupFailed,
                DispatchError::Platform(_) => ChannelErrorCode::PlatformError,
                DispatchError::InvalidRequest(_) => ChannelErrorCode::InvalidArguments,
                DispatchError::InvalidTransition { .. } => ChannelErrorCode::Internal,
            };
            ChannelError::new(code, e.to_string())
        })
    }
}

/// Argument payloads that do not decode are the caller's fault
impl<T> IntoChannelError<T> for Result<T, serde_json::Error> {
    fn into_channel_error(self) -> Result<T, ChannelError> {
        self.map_err(|e| ChannelError::invalid_arguments(e.to_string()))
    }
}
