//! Portal client configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use dm_session::SessionOptions;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the local storage database
    pub database_path: PathBuf,
    /// Portal server origin that relative API paths resolve against
    pub base_url: String,
    /// Endpoints, delays and user-facing messages
    pub session: SessionOptions,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("portal.db"),
            base_url: "http://127.0.0.1:8000".to_string(),
            session: SessionOptions::default(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("DM Portal"))
            .unwrap_or_else(|| PathBuf::from(".dm-portal"))
    }

    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::Config("base_url cannot be empty".to_string()));
        }
        if !self.session.login_path.starts_with('/') {
            return Err(CoreError::Config(format!(
                "login_path must be an absolute path, got {:?}",
                self.session.login_path
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for the per-user data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/dm"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/dm/portal.db"));
        assert_eq!(config.session.login_path, "/ui/login/");
        assert_eq!(config.session.toast_delay_ms, 2200);
        assert_eq!(config.session.redirect_delay_ms, 600);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.json");
        std::fs::write(
            &path,
            r#"{"base_url": "https://portal.example", "session": {"redirect_delay_ms": 0}}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.base_url, "https://portal.example");
        assert_eq!(config.session.redirect_delay_ms, 0);
        assert_eq!(config.session.toast_delay_ms, 2200);
        assert_eq!(config.session.profile_endpoint, "/api/users/myprofile/");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.json");

        std::fs::write(&path, r#"{"base_url": ""}"#).unwrap();
        assert!(matches!(Config::from_file(&path), Err(CoreError::Config(_))));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(CoreError::Serialization(_))
        ));

        assert!(matches!(
            Config::from_file(dir.path().join("missing.json")),
            Err(CoreError::Io(_))
        ));
    }
}
