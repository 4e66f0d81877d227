//! Application state management
use dm_core::{Config, Database, HttpTransport, Portal, Result, SessionClient};
use std::sync::Arc;

use crate::terminal::{TerminalNavigator, TerminalUi};

pub struct AppState {
    portal: Portal,
    ui: Arc<TerminalUi>,
    navigator: Arc<TerminalNavigator>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let ui = Arc::new(TerminalUi::new());
        let navigator = Arc::new(TerminalNavigator::default());
        let portal = Portal::new(config, ui.clone(), navigator.clone())?;

        Ok(Self {
            portal,
            ui,
            navigator,
        })
    }

    /// Wire the state around an explicit store and transport
    pub fn with_parts(config: Config, db: Database, transport: Arc<dyn HttpTransport>) -> Self {
        let ui = Arc::new(TerminalUi::new());
        let navigator = Arc::new(TerminalNavigator::default());
        let portal = Portal::with_parts(config, db, transport, ui.clone(), navigator.clone());

        Self {
            portal,
            ui,
            navigator,
        }
    }

    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    pub fn client(&self) -> &SessionClient {
        self.portal.client()
    }

    pub fn ui(&self) -> &TerminalUi {
        &self.ui
    }

    /// Last view the session client navigated to
    pub fn location(&self) -> Option<String> {
        self.navigator.location()
    }
}
