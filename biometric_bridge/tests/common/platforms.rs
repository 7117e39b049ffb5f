use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use biometric_bridge::{
    BiometricKind, BiometricPlatform, CancellationHandle, CapabilityStatus, CeremonyCallback,
    CeremonyEvent, CryptoToken, KeyStore, KeyStoreError, PlatformError, PlatformFamily,
    SystemPrompt,
};

/// Platform that fires its whole script synchronously from inside
/// `start_ceremony`, before the caller gets the cancellation handle back.
/// Some SDKs do this when they fail fast.
#[derive(Clone)]
pub struct ReentrantPlatform {
    events: Vec<CeremonyEvent>,
    starts: Arc<AtomicUsize>,
}

impl ReentrantPlatform {
    pub fn new(events: Vec<CeremonyEvent>) -> Self {
        Self {
            events,
            starts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

impl BiometricPlatform for ReentrantPlatform {
    fn family(&self) -> PlatformFamily {
        PlatformFamily::Android
    }

    fn capability_status(&self) -> CapabilityStatus {
        CapabilityStatus::Available
    }

    fn hardware_kinds(&self) -> Vec<BiometricKind> {
        vec![BiometricKind::Fingerprint]
    }

    fn start_ceremony(
        &self,
        _prompt: SystemPrompt,
        callback: CeremonyCallback,
    ) -> Result<CancellationHandle, PlatformError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        for event in self.events.iter().cloned() {
            callback.dispatch(event);
        }
        Ok(CancellationHandle::noop())
    }
}

/// Platform that accepts every ceremony and then loses the callback without
/// ever reporting, like a sensor service that died mid-request.
#[derive(Clone, Default)]
pub struct SilentPlatform {
    legacy_starts: Arc<AtomicUsize>,
}

impl SilentPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn legacy_starts(&self) -> usize {
        self.legacy_starts.load(Ordering::SeqCst)
    }
}

impl BiometricPlatform for SilentPlatform {
    fn family(&self) -> PlatformFamily {
        PlatformFamily::Android
    }

    fn capability_status(&self) -> CapabilityStatus {
        CapabilityStatus::Available
    }

    fn hardware_kinds(&self) -> Vec<BiometricKind> {
        vec![BiometricKind::Fingerprint]
    }

    fn start_ceremony(
        &self,
        _prompt: SystemPrompt,
        callback: CeremonyCallback,
    ) -> Result<CancellationHandle, PlatformError> {
        drop(callback);
        Ok(CancellationHandle::noop())
    }

    fn start_legacy_ceremony(
        &self,
        _token: CryptoToken,
        callback: CeremonyCallback,
    ) -> Result<CancellationHandle, PlatformError> {
        self.legacy_starts.fetch_add(1, Ordering::SeqCst);
        drop(callback);
        Ok(CancellationHandle::noop())
    }
}

/// Key store whose key was invalidated by a new enrollment.
pub struct FailingKeyStore;

impl KeyStore for FailingKeyStore {
    fn crypto_token(&self, alias: &str) -> Result<CryptoToken, KeyStoreError> {
        Err(KeyStoreError::CipherInit(format!(
            "key '{alias}' permanently invalidated"
        )))
    }
}
