//! Sign-in, registration and sign-out commands
use serde::Serialize;

use dm_core::{LoginOutcome, RegisterRequest};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginInfo {
    pub id: Option<i64>,
    pub username: String,
    pub role: String,
    pub avatar: String,
    pub landing_path: String,
}

impl LoginInfo {
    fn from_outcome(state: &AppState, outcome: LoginOutcome) -> Self {
        let identity = state.client().apply_user_to_ui(Some(&outcome.user));
        Self {
            id: outcome.user.id,
            username: identity.name,
            role: identity.role,
            avatar: identity.avatar,
            landing_path: outcome.landing_path.to_string(),
        }
    }
}

pub async fn login(state: &AppState, username: &str, password: &str) -> CommandResult<LoginInfo> {
    match state.client().login(username, password).await {
        Ok(outcome) => CommandResult::ok(LoginInfo::from_outcome(state, outcome)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn register(state: &AppState, request: RegisterRequest) -> CommandResult<LoginInfo> {
    match state.client().register(&request).await {
        Ok(outcome) => CommandResult::ok(LoginInfo::from_outcome(state, outcome)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn logout(state: &AppState) -> CommandResult<()> {
    match state.client().logout() {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn change_password(
    state: &AppState,
    old_password: &str,
    new_password: &str,
    new_password_confirm: &str,
) -> CommandResult<String> {
    if !state.client().require_login() {
        return CommandResult::err("Not signed in".to_string());
    }

    match state
        .client()
        .change_password(old_password, new_password, new_password_confirm)
        .await
    {
        Ok(message) => CommandResult::ok(message),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
