//! Credential slot
//!
//! A single bearer token per store. No format or freshness checks happen
//! here; the server decides validity through 401 responses.

use std::sync::Arc;

use dm_storage::KeyValueStore;

use crate::profile::UserProfile;
use crate::Result;

/// Storage key holding the bearer token
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key holding the user record cached at login
pub const CACHED_USER_KEY: &str = "dm_user";

#[derive(Clone)]
pub struct Credentials {
    store: Arc<dyn KeyValueStore>,
}

impl Credentials {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current token. Storage failures are logged and read as "no token".
    pub fn token(&self) -> Option<String> {
        match self.store.get_item(ACCESS_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read access token");
                None
            }
        }
    }

    /// Token usable for an Authorization header
    pub(crate) fn bearer(&self) -> Option<String> {
        self.token().filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set_item(ACCESS_TOKEN_KEY, token)?;
        tracing::debug!("Stored access token");
        Ok(())
    }

    /// Drop the token and the cached user. Idempotent.
    pub fn clear(&self) -> Result<()> {
        self.store
            .remove_items(&[ACCESS_TOKEN_KEY, CACHED_USER_KEY])?;
        tracing::debug!("Cleared credentials");
        Ok(())
    }

    pub fn cache_user(&self, user: &UserProfile) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.store.set_item(CACHED_USER_KEY, &json)?;
        Ok(())
    }

    pub fn cached_user(&self) -> Option<UserProfile> {
        let raw = match self.store.get_item(CACHED_USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cached user");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed cached user");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_storage::{Database, MemoryStore};

    fn credentials() -> (Credentials, MemoryStore) {
        let store = MemoryStore::new();
        (Credentials::new(Arc::new(store.clone())), store)
    }

    #[test]
    fn test_set_then_get_returns_token() {
        let (creds, _) = credentials();
        for token in ["abc", "eyJhbGciOiJIUzI1NiJ9.e30.sig", "with space"] {
            creds.set_token(token).unwrap();
            assert_eq!(creds.token().as_deref(), Some(token));
        }
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (creds, store) = credentials();
        creds.clear().unwrap();
        assert_eq!(creds.token(), None);

        creds.set_token("abc").unwrap();
        store.set_item(CACHED_USER_KEY, r#"{"username":"ali"}"#).unwrap();

        creds.clear().unwrap();
        creds.clear().unwrap();
        assert_eq!(creds.token(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_token_is_not_a_bearer() {
        let (creds, _) = credentials();
        creds.set_token("").unwrap();
        assert_eq!(creds.token().as_deref(), Some(""));
        assert_eq!(creds.bearer(), None);
    }

    #[test]
    fn test_cached_user_roundtrip_and_malformed() {
        let (creds, store) = credentials();
        assert!(creds.cached_user().is_none());

        let user = UserProfile {
            username: Some("sara".to_string()),
            role: Some("expert".to_string()),
            ..Default::default()
        };
        creds.cache_user(&user).unwrap();
        assert_eq!(creds.cached_user(), Some(user));

        store.set_item(CACHED_USER_KEY, "not json").unwrap();
        assert!(creds.cached_user().is_none());
    }

    #[test]
    fn test_sqlite_backed_credentials() {
        let db = Database::open_in_memory().unwrap();
        let creds = Credentials::new(Arc::new(db.clone()));

        creds.set_token("db-token").unwrap();
        assert_eq!(
            db.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("db-token")
        );

        creds.clear().unwrap();
        assert_eq!(creds.token(), None);
    }
}
