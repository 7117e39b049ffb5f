//! Key-store seam for the legacy fingerprint path.
//!
//! The legacy primitive only runs with a crypto object bound to a key that
//! requires user authentication. Which key and algorithm back it is up to the
//! OS key store; this crate only asks for a token and hands it on.

mod errors;
mod software;
mod types;

pub use errors::KeyStoreError;
pub use software::SoftwareKeyStore;
pub use types::{CryptoToken, KeyStore};
