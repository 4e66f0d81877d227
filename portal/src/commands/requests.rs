//! Raw authenticated requests against the portal API
use reqwest::Method;
use serde::Serialize;

use dm_core::ApiRequest;

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResponseInfo {
    pub status: u16,
    /// Parsed JSON when the body is JSON, the raw text otherwise
    pub body: serde_json::Value,
}

pub async fn request(
    state: &AppState,
    method: &str,
    path: &str,
    data: Option<&str>,
) -> CommandResult<ResponseInfo> {
    let method = match Method::from_bytes(method.to_ascii_uppercase().as_bytes()) {
        Ok(m) => m,
        Err(e) => return CommandResult::err(format!("Invalid method {method:?}: {e}")),
    };

    let mut api_request = ApiRequest::new(method, path);
    if let Some(data) = data {
        api_request = api_request.with_body(data.as_bytes().to_vec());
    }

    match state.client().authenticated_request(api_request).await {
        Ok(response) => {
            let body = if response.body.is_empty() {
                serde_json::Value::Null
            } else {
                response
                    .json()
                    .unwrap_or_else(|_| serde_json::Value::String(response.text()))
            };
            CommandResult::ok(ResponseInfo {
                status: response.status.as_u16(),
                body,
            })
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}
