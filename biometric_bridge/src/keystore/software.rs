use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::errors::KeyStoreError;
use super::types::{CryptoToken, KeyStore};
use crate::utils::{gen_random_bytes, gen_random_string};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 16;

/// Process-local key store with random key material.
///
/// Stands in for the OS key store in tests and on hosts without one. Keys
/// live only as long as the store. Clones share the same keys.
#[derive(Clone)]
pub struct SoftwareKeyStore {
    keys: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl SoftwareKeyStore {
    pub fn new() -> Self {
        Self {
            keys: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn has_key(&self, alias: &str) -> bool {
        self.keys
            .lock()
            .map(|keys| keys.contains_key(alias))
            .unwrap_or(false)
    }

    /// Drops the key, as the OS does when biometric enrollment changes.
    /// Returns whether a key existed.
    pub fn invalidate(&self, alias: &str) -> bool {
        match self.keys.lock() {
            Ok(mut keys) => keys.remove(alias).is_some(),
            Err(_) => false,
        }
    }
}

impl Default for SoftwareKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore for SoftwareKeyStore {
    fn crypto_token(&self, alias: &str) -> Result<CryptoToken, KeyStoreError> {
        let mut keys = self
            .keys
            .lock()
            .map_err(|_| KeyStoreError::CipherInit("key store lock poisoned".to_string()))?;

        if !keys.contains_key(alias) {
            let material = gen_random_bytes(KEY_LEN)
                .map_err(|e| KeyStoreError::KeyGeneration(e.to_string()))?;
            keys.insert(alias.to_string(), material);
            tracing::debug!("Generated key for alias {}", alias);
        }

        let nonce = gen_random_string(NONCE_LEN)?;
        Ok(CryptoToken::new(alias, nonce))
    }
}
