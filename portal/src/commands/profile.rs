//! Current-user commands
use serde::Serialize;

use dm_core::{SessionStatus, UserProfile};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileInfo {
    pub profile: UserProfile,
    pub banner: Option<String>,
}

pub async fn whoami(state: &AppState) -> CommandResult<ProfileInfo> {
    if !state.client().require_login() {
        return CommandResult::err("Not signed in".to_string());
    }

    match state.client().fetch_current_user_profile().await {
        Ok(profile) => {
            state.client().apply_user_to_ui(Some(&profile));
            CommandResult::ok(ProfileInfo {
                profile,
                banner: state.ui().banner(),
            })
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn status(state: &AppState) -> CommandResult<SessionStatus> {
    CommandResult::ok(state.portal().status())
}
