use super::errors::DispatchError;
use crate::capability::BiometricKind;
use crate::utils::non_empty;

/// One call to `authenticate`. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRequest {
    kind: BiometricKind,
    reason: String,
    title: Option<String>,
    confirm_text: Option<String>,
    cancel_text: Option<String>,
    use_custom_ui: bool,
    use_legacy_dialog: bool,
}

impl AuthenticationRequest {
    /// `reason` is the text the OS prompt shows to explain the request.
    pub fn builder(reason: impl Into<String>) -> AuthenticationRequestBuilder {
        AuthenticationRequestBuilder {
            kind: BiometricKind::None,
            reason: reason.into(),
            title: None,
            confirm_text: None,
            cancel_text: None,
            use_custom_ui: false,
            use_legacy_dialog: false,
        }
    }

    pub fn kind(&self) -> BiometricKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn confirm_text(&self) -> Option<&str> {
        self.confirm_text.as_deref()
    }

    pub fn cancel_text(&self) -> Option<&str> {
        self.cancel_text.as_deref()
    }

    pub fn use_custom_ui(&self) -> bool {
        self.use_custom_ui
    }

    pub fn use_legacy_dialog(&self) -> bool {
        self.use_legacy_dialog
    }
}

#[derive(Debug, Clone)]
pub struct AuthenticationRequestBuilder {
    kind: BiometricKind,
    reason: String,
    title: Option<String>,
    confirm_text: Option<String>,
    cancel_text: Option<String>,
    use_custom_ui: bool,
    use_legacy_dialog: bool,
}

impl AuthenticationRequestBuilder {
    pub fn kind(mut self, kind: BiometricKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn confirm_text(mut self, confirm_text: impl Into<String>) -> Self {
        self.confirm_text = Some(confirm_text.into());
        self
    }

    pub fn cancel_text(mut self, cancel_text: impl Into<String>) -> Self {
        self.cancel_text = Some(cancel_text.into());
        self
    }

    pub fn use_custom_ui(mut self, use_custom_ui: bool) -> Self {
        self.use_custom_ui = use_custom_ui;
        self
    }

    /// Android only; ignored elsewhere.
    pub fn use_legacy_dialog(mut self, use_legacy_dialog: bool) -> Self {
        self.use_legacy_dialog = use_legacy_dialog;
        self
    }

    /// Blank optional texts count as absent so defaults apply. The reason is
    /// mandatory: LocalAuthentication rejects an empty one.
    pub fn build(self) -> Result<AuthenticationRequest, DispatchError> {
        if self.reason.trim().is_empty() {
            return Err(DispatchError::InvalidRequest(
                "reason must not be empty".to_string(),
            ));
        }

        Ok(AuthenticationRequest {
            kind: self.kind,
            reason: self.reason,
            title: non_empty(self.title),
            confirm_text: non_empty(self.confirm_text),
            cancel_text: non_empty(self.cancel_text),
            use_custom_ui: self.use_custom_ui,
            use_legacy_dialog: self.use_legacy_dialog,
        })
    }
}
