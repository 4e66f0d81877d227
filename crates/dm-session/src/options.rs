//! Session client settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Where the host is sent when the session is missing or expired
    pub login_path: String,
    pub profile_endpoint: String,
    pub login_endpoint: String,
    pub register_endpoint: String,
    pub password_endpoint: String,
    /// How long a toast stays visible before fading
    pub toast_delay_ms: u64,
    /// Pause between the "session expired" toast and the login redirect
    pub redirect_delay_ms: u64,
    pub messages: Messages,
}

impl SessionOptions {
    pub fn toast_delay(&self) -> Duration {
        Duration::from_millis(self.toast_delay_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            login_path: "/ui/login/".to_string(),
            profile_endpoint: "/api/users/myprofile/".to_string(),
            login_endpoint: "/api/users/login/".to_string(),
            register_endpoint: "/api/users/register/".to_string(),
            password_endpoint: "/api/users/password/update/".to_string(),
            toast_delay_ms: 2200,
            redirect_delay_ms: 600,
            messages: Messages::default(),
        }
    }
}

/// User-facing strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub session_expired: String,
    pub forbidden: String,
    pub default_username: String,
    pub default_role: String,
    pub default_avatar: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            session_expired: "Your session has expired. Please sign in again.".to_string(),
            forbidden: "You are not allowed to perform this action.".to_string(),
            default_username: "User".to_string(),
            default_role: "—".to_string(),
            default_avatar: "U".to_string(),
        }
    }
}
