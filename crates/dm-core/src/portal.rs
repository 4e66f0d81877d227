//! Portal client container
//!
//! Owns the local store and the session client built on it. The host
//! supplies only the UI and navigation bindings.

use serde::Serialize;
use std::sync::Arc;

use dm_session::{
    HttpTransport, Navigator, ReqwestTransport, SessionClient, UiBindings, UserProfile,
};
use dm_storage::Database;

use crate::config::Config;
use crate::Result;

/// Snapshot of the local session, no server round trip
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub cached_user: Option<UserProfile>,
    pub base_url: String,
    pub database_path: String,
}

pub struct Portal {
    config: Config,
    db: Database,
    client: SessionClient,
}

impl Portal {
    /// Open the on-disk store and connect to the configured server
    pub fn new(
        config: Config,
        ui: Arc<dyn UiBindings>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        let transport = Arc::new(ReqwestTransport::new(&config.base_url)?);

        tracing::info!(
            base_url = %config.base_url,
            database = %config.database_path.display(),
            "Portal client ready"
        );

        Ok(Self::with_parts(config, db, transport, ui, navigator))
    }

    pub fn with_parts(
        config: Config,
        db: Database,
        transport: Arc<dyn HttpTransport>,
        ui: Arc<dyn UiBindings>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let client = SessionClient::new(
            Arc::new(db.clone()),
            transport,
            ui,
            navigator,
            config.session.clone(),
        );

        Self { config, db, client }
    }

    pub fn client(&self) -> &SessionClient {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            logged_in: self.client.is_logged_in(),
            cached_user: self.client.cached_user(),
            base_url: self.config.base_url.clone(),
            database_path: self.config.database_path.display().to_string(),
        }
    }
}
