use thiserror::Error;

/// Errors raised by a platform backend while setting up a ceremony.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The backend does not offer the requested primitive
    #[error("Unsupported on this platform: {0}")]
    Unsupported(String),

    /// The backend could not start the ceremony (e.g., no foreground activity)
    #[error("Ceremony error: {0}")]
    Ceremony(String),

    /// Invalid backend configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}
