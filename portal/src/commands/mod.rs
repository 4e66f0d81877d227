//! Portal commands
//!
//! Each command drives the session client and reports a `CommandResult`
//! that the CLI prints as JSON.

pub mod auth;
pub mod profile;
pub mod requests;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use dm_core::{ApiRequest, ApiResponse, Config, Database, HttpTransport, SessionError};
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::state::AppState;

    #[derive(Default)]
    pub struct CannedTransport {
        responses: Mutex<VecDeque<(u16, String)>>,
        pub requests: Mutex<Vec<ApiRequest>>,
    }

    impl CannedTransport {
        pub fn respond(&self, status: u16, body: &str) {
            self.responses.lock().push_back((status, body.to_string()));
        }
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SessionError> {
            self.requests.lock().push(request);
            let (status, body) = self
                .responses
                .lock()
                .pop_front()
                .ok_or_else(|| SessionError::Transport("connection refused".to_string()))?;
            let status = reqwest::StatusCode::from_u16(status)
                .map_err(|e| SessionError::Transport(e.to_string()))?;
            Ok(ApiResponse::new(status, body.into_bytes()))
        }
    }

    pub fn app_state() -> (AppState, Arc<CannedTransport>) {
        let transport = Arc::new(CannedTransport::default());
        let state = AppState::with_parts(
            Config::new(PathBuf::from("/tmp/dm-portal-test")),
            Database::open_in_memory().unwrap(),
            transport.clone(),
        );
        (state, transport)
    }
}
