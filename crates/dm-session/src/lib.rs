//! DM Portal Session Client
//!
//! Owns the bearer-token lifecycle for the portal API:
//! - the token lives in a persistent key-value slot (`access_token`)
//! - every request goes out with `Content-Type: application/json` and,
//!   when a token exists, `Authorization: Bearer <token>`
//! - 401 clears the token and sends the host back to the login view
//! - 403 surfaces the server's `detail` message without logging out
//!
//! Storage, HTTP, navigation and UI are supplied by the host through
//! [`KeyValueStore`](dm_storage::KeyValueStore), [`HttpTransport`],
//! [`Navigator`] and [`UiBindings`].

mod account;
mod client;
mod credentials;
mod error;
mod options;
mod profile;
mod scheduler;
mod transport;
mod ui;

#[cfg(test)]
mod testing;

pub use account::{profile_path_for_role, LoginOutcome, RegisterRequest};
pub use client::SessionClient;
pub use credentials::{Credentials, ACCESS_TOKEN_KEY, CACHED_USER_KEY};
pub use error::SessionError;
pub use options::{Messages, SessionOptions};
pub use profile::{DisplayIdentity, UserProfile};
pub use scheduler::{schedule, ScheduledTask};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
pub use ui::{Navigator, Severity, Toast, ToastSurface, UiBindings};

pub type Result<T> = std::result::Result<T, SessionError>;
