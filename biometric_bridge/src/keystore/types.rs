use super::errors::KeyStoreError;

/// Opaque handle to a user-authentication-gated cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoToken {
    alias: String,
    nonce: String,
}

impl CryptoToken {
    pub fn new(alias: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            nonce: nonce.into(),
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }
}

pub trait KeyStore: Send + Sync + 'static {
    /// Returns a token for the key under `alias`, creating the key first if
    /// it does not exist.
    fn crypto_token(&self, alias: &str) -> Result<CryptoToken, KeyStoreError>;
}
