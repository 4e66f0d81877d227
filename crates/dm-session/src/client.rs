//! Session client
//!
//! Two states: token present or absent. Presence only decides whether the
//! Authorization header goes out; the server is the judge of validity.

use parking_lot::Mutex;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::sync::Arc;

use dm_storage::KeyValueStore;

use crate::credentials::Credentials;
use crate::error::SessionError;
use crate::options::SessionOptions;
use crate::profile::{DisplayIdentity, UserProfile};
use crate::scheduler::{schedule, ScheduledTask};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};
use crate::ui::{Navigator, Severity, Toast, UiBindings};
use crate::Result;

#[derive(Clone)]
pub struct SessionClient {
    credentials: Credentials,
    transport: Arc<dyn HttpTransport>,
    ui: Arc<dyn UiBindings>,
    navigator: Arc<dyn Navigator>,
    options: Arc<SessionOptions>,
    /// Most recent post-401 redirect, kept so the host can call it off
    pending_redirect: Arc<Mutex<Option<ScheduledTask>>>,
}

impl SessionClient {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn HttpTransport>,
        ui: Arc<dyn UiBindings>,
        navigator: Arc<dyn Navigator>,
        options: SessionOptions,
    ) -> Self {
        Self {
            credentials: Credentials::new(store),
            transport,
            ui,
            navigator,
            options: Arc::new(options),
            pending_redirect: Arc::new(Mutex::new(None)),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // === Credential slot ===

    pub fn get_token(&self) -> Option<String> {
        self.credentials.token()
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.credentials.set_token(token)
    }

    /// Remove the token and the cached user. Idempotent.
    pub fn clear_token(&self) -> Result<()> {
        self.credentials.clear()
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.bearer().is_some()
    }

    // === Navigation and notifications ===

    pub fn redirect_to_login(&self) {
        tracing::info!(path = %self.options.login_path, "Redirecting to login");
        self.navigator.navigate(&self.options.login_path);
    }

    /// Show a toast and schedule its fade. Without a toast surface this
    /// falls back to a blocking alert and nothing is scheduled.
    ///
    /// Must be called from within a tokio runtime when a surface exists.
    pub fn notify(&self, message: &str, severity: Severity) -> Option<ScheduledTask> {
        let Some(surface) = self.ui.toast_surface() else {
            self.ui.alert(message);
            return None;
        };

        surface.show(&Toast::new(message, severity));
        Some(schedule(self.options.toast_delay(), move || surface.fade()))
    }

    /// Cancel the most recently scheduled login redirect.
    /// Returns `false` when there was nothing left to cancel.
    pub fn cancel_pending_redirect(&self) -> bool {
        match self.pending_redirect.lock().take() {
            Some(task) if !task.is_finished() => {
                task.cancel();
                true
            }
            _ => false,
        }
    }

    /// Wait for the most recent login redirect to run.
    /// Returns `false` when none was pending or it was cancelled.
    pub async fn wait_for_pending_redirect(&self) -> bool {
        let task = self.pending_redirect.lock().take();
        match task {
            Some(task) => task.await,
            None => false,
        }
    }

    fn schedule_login_redirect(&self) {
        let navigator = Arc::clone(&self.navigator);
        let path = self.options.login_path.clone();
        let task = schedule(self.options.redirect_delay(), move || {
            tracing::info!(path = %path, "Redirecting to login");
            navigator.navigate(&path);
        });

        // An earlier redirect keeps running; navigation is idempotent.
        *self.pending_redirect.lock() = Some(task);
    }

    // === Requests ===

    /// Send `request` with the session headers attached.
    ///
    /// 401 and 403 never reach the caller as responses: 401 clears the
    /// session and schedules the login redirect, 403 shows the server's
    /// reason. Every other status is returned untouched.
    pub async fn authenticated_request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = self.with_session_headers(request, true)?;
        let method = request.method.clone();
        let url = request.url.clone();

        let response = self.transport.send(request).await?;

        match response.status {
            StatusCode::UNAUTHORIZED => {
                tracing::warn!(method = %method, url = %url, "Session expired");
                let message = self.options.messages.session_expired.clone();
                self.notify(&message, Severity::Warn);
                if let Err(e) = self.clear_token() {
                    tracing::error!(error = %e, "Failed to clear credentials");
                }
                self.schedule_login_redirect();
                Err(SessionError::Unauthorized)
            }
            StatusCode::FORBIDDEN => {
                let message = detail_message(&response.body)
                    .unwrap_or_else(|| self.options.messages.forbidden.clone());
                tracing::warn!(method = %method, url = %url, detail = %message, "Request forbidden");
                self.notify(&message, Severity::Danger);
                Err(SessionError::Forbidden(message))
            }
            status => {
                tracing::debug!(method = %method, url = %url, status = %status, "Request completed");
                Ok(response)
            }
        }
    }

    /// Send without the bearer token and without session-expiry handling.
    /// Used for login and registration, where a stale token must not leak.
    pub(crate) async fn send_anonymous(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = self.with_session_headers(request, false)?;
        self.transport.send(request).await
    }

    fn with_session_headers(&self, mut request: ApiRequest, bearer: bool) -> Result<ApiRequest> {
        let content_type_missing = request
            .headers
            .get(CONTENT_TYPE)
            .map_or(true, HeaderValue::is_empty);
        if content_type_missing {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if bearer {
            if let Some(token) = self.credentials.bearer() {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| SessionError::InvalidHeader(format!("Authorization: {e}")))?;
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
            }
        }

        Ok(request)
    }

    // === Current user ===

    pub async fn fetch_current_user_profile(&self) -> Result<UserProfile> {
        let request = ApiRequest::get(self.options.profile_endpoint.clone());
        let response = self.authenticated_request(request).await?;
        response.json()
    }

    /// Redirect straight away when there is no token. No server round trip.
    /// Returns whether a token was present.
    pub fn require_login(&self) -> bool {
        if self.is_logged_in() {
            return true;
        }
        self.redirect_to_login();
        false
    }

    pub fn apply_user_to_ui(&self, user: Option<&UserProfile>) -> DisplayIdentity {
        let identity = DisplayIdentity::from_user(user, &self.options.messages);

        self.ui.set_username(&identity.name);
        self.ui.set_role(&identity.role);
        self.ui.set_avatar(&identity.avatar);

        identity
    }
}

/// `detail` from a DRF-style error body, if the body is JSON and has one.
/// Empty strings, zero, `false` and `null` count as missing; a list of
/// messages is joined with commas.
pub(crate) fn detail_message(body: &[u8]) -> Option<String> {
    use serde_json::Value;

    let value: Value = serde_json::from_slice(body).ok()?;
    let message = match value.get("detail")? {
        Value::Null | Value::Bool(false) => return None,
        Value::Number(n) if n.as_f64() == Some(0.0) => return None,
        Value::Array(items) => join_messages(items),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(message).filter(|m| !m.is_empty())
}

fn join_messages(items: &[serde_json::Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            serde_json::Value::Array(nested) => join_messages(nested),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}
