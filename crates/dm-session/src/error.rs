//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// The server rejected the credential (HTTP 401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not permitted (HTTP 403), with the message shown to the user
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] dm_storage::StorageError),

    #[error("New passwords do not match")]
    PasswordMismatch,
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        SessionError::Transport(err.to_string())
    }
}

impl SessionError {
    /// Whether the caller should treat this as a lost session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SessionError::Unauthorized)
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, SessionError::Forbidden(_))
    }
}
