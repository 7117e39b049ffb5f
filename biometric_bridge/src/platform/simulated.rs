//! In-process biometric device driven by a script of ceremony events.
//!
//! Used by the test suites and by the demo host. Clones share one device, so a
//! test can keep a handle for inspecting counters after giving a clone to
//! [`crate::BiometricAuth`].

use std::env;
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use tokio::sync::oneshot;

use super::ceremony::{CancellationHandle, CeremonyCallback, CeremonyError, CeremonyEvent};
use super::errors::PlatformError;
use super::types::{BiometricPlatform, PlatformFamily, SystemPrompt};
use super::{android, apple};
use crate::capability::{BiometricKind, CapabilityStatus};
use crate::keystore::CryptoToken;

struct SimulatedDevice {
    family: PlatformFamily,
    status: Mutex<CapabilityStatus>,
    kinds: Mutex<Vec<BiometricKind>>,
    script: Mutex<Vec<CeremonyEvent>>,
    event_delay: Mutex<Duration>,
    start_failure: Mutex<Option<String>>,
    ceremony_starts: AtomicUsize,
    legacy_starts: AtomicUsize,
    cancellations: AtomicUsize,
    rejected_events: AtomicUsize,
    last_prompt: Mutex<Option<SystemPrompt>>,
    last_token: Mutex<Option<CryptoToken>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Scripted stand-in for the OS biometric subsystem.
///
/// Every ceremony replays the script from the start on a spawned task, one
/// event per `event_delay`. When the script holds no terminal event the
/// sensor keeps listening until the ceremony is cancelled. A cancelled
/// ceremony always reports `SystemCancelled`, the way Android reports
/// `ERROR_CANCELED`, even when the request was already resolved.
#[derive(Clone)]
pub struct SimulatedPlatform {
    device: Arc<SimulatedDevice>,
}

impl SimulatedPlatform {
    /// An available device with enrolled fingerprint hardware whose ceremonies
    /// succeed immediately.
    pub fn new(family: PlatformFamily) -> Self {
        Self {
            device: Arc::new(SimulatedDevice {
                family,
                status: Mutex::new(CapabilityStatus::Available),
                kinds: Mutex::new(vec![BiometricKind::Fingerprint]),
                script: Mutex::new(vec![CeremonyEvent::Succeeded]),
                event_delay: Mutex::new(Duration::ZERO),
                start_failure: Mutex::new(None),
                ceremony_starts: AtomicUsize::new(0),
                legacy_starts: AtomicUsize::new(0),
                cancellations: AtomicUsize::new(0),
                rejected_events: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                last_token: Mutex::new(None),
            }),
        }
    }

    /// Reads `BIOMETRIC_SIM_FAMILY`, `BIOMETRIC_SIM_STATUS`,
    /// `BIOMETRIC_SIM_KINDS`, `BIOMETRIC_SIM_SCRIPT` and
    /// `BIOMETRIC_SIM_DELAY_MS`. Invalid values are reported and replaced by
    /// the defaults of [`SimulatedPlatform::new`].
    pub fn from_env() -> Self {
        let family = parse_env("BIOMETRIC_SIM_FAMILY", PlatformFamily::Android, |v| v.parse());
        let platform = Self::new(family);

        if let Some(status) = parse_env_opt("BIOMETRIC_SIM_STATUS", parse_status) {
            platform.set_status(status);
        }
        if let Ok(kinds) = env::var("BIOMETRIC_SIM_KINDS") {
            *lock(&platform.device.kinds) = parse_kinds(&kinds);
        }
        if let Some(script) = parse_env_opt("BIOMETRIC_SIM_SCRIPT", parse_script) {
            *lock(&platform.device.script) = script;
        }
        if let Some(delay) = parse_env_opt("BIOMETRIC_SIM_DELAY_MS", |v| {
            v.parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| PlatformError::Config(e.to_string()))
        }) {
            *lock(&platform.device.event_delay) = delay;
        }

        tracing::info!(
            family = %platform.device.family,
            status = %platform.capability_status(),
            "Simulated biometric platform ready"
        );
        platform
    }

    pub fn with_status(self, status: CapabilityStatus) -> Self {
        self.set_status(status);
        self
    }

    pub fn with_kinds(self, kinds: Vec<BiometricKind>) -> Self {
        *lock(&self.device.kinds) = kinds;
        self
    }

    pub fn with_script(self, script: Vec<CeremonyEvent>) -> Self {
        *lock(&self.device.script) = script;
        self
    }

    pub fn with_event_delay(self, delay: Duration) -> Self {
        *lock(&self.device.event_delay) = delay;
        self
    }

    /// Makes every `start_*` call fail with [`PlatformError::Ceremony`].
    pub fn with_start_failure(self, message: impl Into<String>) -> Self {
        *lock(&self.device.start_failure) = Some(message.into());
        self
    }

    /// Changes the live hardware state seen by the next capability query.
    pub fn set_status(&self, status: CapabilityStatus) {
        *lock(&self.device.status) = status;
    }

    pub fn ceremony_starts(&self) -> usize {
        self.device.ceremony_starts.load(Ordering::SeqCst)
    }

    pub fn legacy_starts(&self) -> usize {
        self.device.legacy_starts.load(Ordering::SeqCst)
    }

    pub fn cancellations(&self) -> usize {
        self.device.cancellations.load(Ordering::SeqCst)
    }

    /// Terminal events reported after their request was already resolved.
    pub fn rejected_events(&self) -> usize {
        self.device.rejected_events.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<SystemPrompt> {
        lock(&self.device.last_prompt).clone()
    }

    pub fn last_token(&self) -> Option<CryptoToken> {
        lock(&self.device.last_token).clone()
    }

    fn check_start(&self) -> Result<(), PlatformError> {
        match lock(&self.device.start_failure).as_ref() {
            Some(message) => Err(PlatformError::Ceremony(message.clone())),
            None => Ok(()),
        }
    }

    fn replay(&self, callback: CeremonyCallback) -> CancellationHandle {
        let script = lock(&self.device.script).clone();
        let delay = *lock(&self.device.event_delay);
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let reporter = self.device.clone();

        tokio::spawn(async move {
            let report = |event: CeremonyEvent| {
                let terminal = event.is_terminal();
                if !callback.dispatch(event) && terminal {
                    reporter.rejected_events.fetch_add(1, Ordering::SeqCst);
                }
            };

            for event in script {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => {
                        report(CeremonyEvent::Error(CeremonyError::SystemCancelled));
                        return;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
                report(event);
            }

            // A disarmed handle drops the sender without cancelling
            if cancel_rx.await.is_ok() {
                report(CeremonyEvent::Error(CeremonyError::SystemCancelled));
            }
        });

        let device = self.device.clone();
        CancellationHandle::new(move || {
            device.cancellations.fetch_add(1, Ordering::SeqCst);
            let _ = cancel_tx.send(());
        })
    }
}

impl BiometricPlatform for SimulatedPlatform {
    fn family(&self) -> PlatformFamily {
        self.device.family
    }

    fn capability_status(&self) -> CapabilityStatus {
        *lock(&self.device.status)
    }

    fn hardware_kinds(&self) -> Vec<BiometricKind> {
        lock(&self.device.kinds).clone()
    }

    fn start_ceremony(
        &self,
        prompt: SystemPrompt,
        callback: CeremonyCallback,
    ) -> Result<CancellationHandle, PlatformError> {
        self.check_start()?;
        self.device.ceremony_starts.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            kind = %prompt.kind,
            title = %prompt.title,
            "Simulated system prompt shown"
        );
        *lock(&self.device.last_prompt) = Some(prompt);
        Ok(self.replay(callback))
    }

    fn start_legacy_ceremony(
        &self,
        token: CryptoToken,
        callback: CeremonyCallback,
    ) -> Result<CancellationHandle, PlatformError> {
        if !self.device.family.supports_legacy_dialog() {
            return Err(PlatformError::Unsupported(format!(
                "legacy fingerprint ceremony on {}",
                self.device.family
            )));
        }
        self.check_start()?;
        self.device.legacy_starts.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(alias = token.alias(), "Simulated legacy sensor listening");
        *lock(&self.device.last_token) = Some(token);
        Ok(self.replay(callback))
    }
}

fn parse_env<T>(name: &str, default: T, parse: impl Fn(&str) -> Result<T, PlatformError>) -> T {
    parse_env_opt(name, parse).unwrap_or(default)
}

fn parse_env_opt<T>(name: &str, parse: impl Fn(&str) -> Result<T, PlatformError>) -> Option<T> {
    let value = env::var(name).ok()?;
    match parse(&value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Invalid {}: {}. Using default", name, e);
            None
        }
    }
}

fn parse_status(value: &str) -> Result<CapabilityStatus, PlatformError> {
    let status = match value.trim().to_lowercase().as_str() {
        "available" => CapabilityStatus::Available,
        "not_enrolled" => CapabilityStatus::NotEnrolled,
        "no_hardware" => CapabilityStatus::NoHardware,
        "hardware_unavailable" => CapabilityStatus::HardwareUnavailable,
        "security_update_required" => CapabilityStatus::SecurityUpdateRequired,
        "unsupported" => CapabilityStatus::Unsupported,
        "unknown" => CapabilityStatus::Unknown,
        other => {
            return Err(PlatformError::Config(format!(
                "Unknown capability status: {other}"
            )));
        }
    };
    Ok(status)
}

fn parse_kinds(value: &str) -> Vec<BiometricKind> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(BiometricKind::from_wire)
        .collect()
}

/// Comma separated events: `succeeded`, `failed`, `help:<text>`,
/// `error:<name>`, `error:android:<code>` or `error:apple:<code>`.
fn parse_script(value: &str) -> Result<Vec<CeremonyEvent>, PlatformError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_event)
        .collect()
}

fn parse_event(token: &str) -> Result<CeremonyEvent, PlatformError> {
    if let Some(text) = token.strip_prefix("help:") {
        return Ok(CeremonyEvent::Help(text.to_string()));
    }
    if let Some(error) = token.strip_prefix("error:") {
        return parse_ceremony_error(error).map(CeremonyEvent::Error);
    }
    match token {
        "succeeded" | "success" => Ok(CeremonyEvent::Succeeded),
        "failed" | "mismatch" => Ok(CeremonyEvent::Failed),
        other => Err(PlatformError::Config(format!(
            "Unknown ceremony event: {other}"
        ))),
    }
}

fn parse_ceremony_error(value: &str) -> Result<CeremonyError, PlatformError> {
    let invalid_code = |code: &str| PlatformError::Config(format!("Invalid error code: {code}"));

    if let Some(code) = value.strip_prefix("android:") {
        let code = code.parse::<i32>().map_err(|_| invalid_code(code))?;
        return Ok(android::ceremony_error(code, None));
    }
    if let Some(code) = value.strip_prefix("apple:") {
        let code = code.parse::<i64>().map_err(|_| invalid_code(code))?;
        return Ok(apple::ceremony_error(code));
    }

    let error = match value {
        "user_cancelled" => CeremonyError::UserCancelled,
        "negative_button" => CeremonyError::NegativeButton,
        "system_cancelled" => CeremonyError::SystemCancelled,
        "lockout" => CeremonyError::Lockout,
        "lockout_permanent" => CeremonyError::LockoutPermanent,
        "hardware_unavailable" => CeremonyError::HardwareUnavailable,
        "no_biometrics" => CeremonyError::NoBiometrics,
        "timeout" => CeremonyError::Timeout,
        "authentication_failed" => CeremonyError::AuthenticationFailed,
        "user_fallback" => CeremonyError::UserFallback,
        other => {
            return Err(PlatformError::Config(format!(
                "Unknown ceremony error: {other}"
            )));
        }
    };
    Ok(error)
}
