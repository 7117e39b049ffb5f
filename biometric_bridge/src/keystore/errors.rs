use thiserror::Error;

use crate::utils::UtilError;

/// Errors from obtaining the crypto token for the legacy ceremony.
#[derive(Debug, Clone, Error)]
pub enum KeyStoreError {
    /// The key could not be created in the store
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// The key exists but the cipher bound to it could not be initialized
    /// (e.g., the key was invalidated by a new enrollment)
    #[error("Cipher initialization failed: {0}")]
    CipherInit(String),

    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
