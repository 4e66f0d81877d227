//! Account operations on top of the session client
//!
//! Login and registration both answer with `{access, user}`; the token goes
//! into the credential slot and the user record is cached under `dm_user`.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::client::{detail_message, SessionClient};
use crate::error::SessionError;
use crate::profile::UserProfile;
use crate::transport::{ApiRequest, ApiResponse};
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub user: UserProfile,
    /// Role-specific profile page to open after signing in
    pub landing_path: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access: String,
    #[serde(default)]
    user: Option<UserProfile>,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ChangePasswordBody<'a> {
    old_password: &'a str,
    new_password: &'a str,
    new_password_confirm: &'a str,
}

#[derive(Deserialize)]
struct DetailBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Profile page for a role, falling back to the generic router
pub fn profile_path_for_role(role: Option<&str>) -> &'static str {
    match role {
        Some("manager") => "/ui/profile/manager/",
        Some("expert") => "/ui/profile/expert/",
        Some("admin") => "/ui/profile/admin/",
        _ => "/ui/profile/",
    }
}

impl SessionClient {
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let request = ApiRequest::post(self.options().login_endpoint.clone()).json(&LoginBody {
            username: username.trim(),
            password,
        })?;

        let response = self.send_anonymous(request).await?;
        let outcome = self.accept_auth_response(response, StatusCode::OK)?;

        tracing::info!(
            username = ?outcome.user.username,
            role = ?outcome.user.role,
            "Signed in"
        );

        Ok(outcome)
    }

    pub async fn register(&self, registration: &RegisterRequest) -> Result<LoginOutcome> {
        let request =
            ApiRequest::post(self.options().register_endpoint.clone()).json(registration)?;

        let response = self.send_anonymous(request).await?;
        let outcome = self.accept_auth_response(response, StatusCode::CREATED)?;

        tracing::info!(username = %registration.username, "Registered account");

        Ok(outcome)
    }

    /// Returns the server's confirmation message
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<String> {
        if new_password != new_password_confirm {
            return Err(SessionError::PasswordMismatch);
        }

        let request = ApiRequest::post(self.options().password_endpoint.clone()).json(
            &ChangePasswordBody {
                old_password,
                new_password,
                new_password_confirm,
            },
        )?;

        let response = self.authenticated_request(request).await?;
        if !response.is_success() {
            return Err(rejection(&response));
        }

        let body: DetailBody = response.json().unwrap_or(DetailBody { detail: None });
        tracing::info!("Password updated");
        Ok(body
            .detail
            .unwrap_or_else(|| "Password updated successfully.".to_string()))
    }

    /// Drop the session and send the host to the login view
    pub fn logout(&self) -> Result<()> {
        self.clear_token()?;
        tracing::info!("Signed out");
        self.redirect_to_login();
        Ok(())
    }

    /// User record saved by the last login or registration
    pub fn cached_user(&self) -> Option<UserProfile> {
        self.credentials().cached_user()
    }

    fn accept_auth_response(
        &self,
        response: ApiResponse,
        expected: StatusCode,
    ) -> Result<LoginOutcome> {
        if response.status != expected {
            return Err(rejection(&response));
        }

        let auth: AuthResponse = response.json()?;
        let user = auth.user.unwrap_or_default();

        self.set_token(&auth.access)?;
        self.credentials().cache_user(&user)?;

        let landing_path = profile_path_for_role(user.role.as_deref());
        Ok(LoginOutcome { user, landing_path })
    }
}

/// Turn a non-success response into an error carrying the server's reason.
///
/// DRF reports validation failures as `{"detail": ...}`,
/// `{"non_field_errors": [...]}` or `{"<field>": [...]}`.
fn rejection(response: &ApiResponse) -> SessionError {
    let detail = detail_message(&response.body)
        .or_else(|| field_error(&response.body))
        .unwrap_or_else(|| {
            format!(
                "Request failed with status {}",
                response.status.as_u16()
            )
        });

    SessionError::Rejected {
        status: response.status.as_u16(),
        detail,
    }
}

fn field_error(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let object = value.as_object()?;

    if let Some(message) = object
        .get("non_field_errors")
        .and_then(first_message)
    {
        return Some(message);
    }

    object
        .iter()
        .find_map(|(field, errors)| first_message(errors).map(|m| format!("{field}: {m}")))
}

fn first_message(errors: &serde_json::Value) -> Option<String> {
    match errors {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items.first()?.as_str().map(str::to_string),
        _ => None,
    }
}
