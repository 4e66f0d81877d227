//! DM Portal Core
//!
//! Configuration, logging and the `Portal` container that wires the
//! persistent store and HTTP transport into a session client.

mod config;
mod error;
mod portal;

pub use config::Config;
pub use error::CoreError;
pub use portal::{Portal, SessionStatus};

// Re-export the session surface hosts program against
pub use dm_session::{
    profile_path_for_role, ApiRequest, ApiResponse, DisplayIdentity, HttpTransport,
    LoginOutcome, Messages, Navigator, RegisterRequest, ReqwestTransport, ScheduledTask,
    SessionClient, SessionError, SessionOptions, Severity, Toast, ToastSurface, UiBindings,
    UserProfile,
};
pub use dm_storage::{Database, KeyValueStore, MemoryStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
