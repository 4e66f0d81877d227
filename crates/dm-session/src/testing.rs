//! Fakes for the host collaborators

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Arc;

use dm_storage::MemoryStore;

use crate::error::SessionError;
use crate::options::SessionOptions;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};
use crate::ui::{Navigator, Toast, ToastSurface, UiBindings};
use crate::{Result, SessionClient};

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    pub requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        self.responses
            .lock()
            .push_back(ApiResponse::new(status, body.as_bytes().to_vec()));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests.lock().last().cloned().unwrap()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| SessionError::Transport("no canned response".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub shown: Mutex<Vec<Toast>>,
    pub fades: Mutex<usize>,
}

impl ToastSurface for RecordingSurface {
    fn show(&self, toast: &Toast) {
        self.shown.lock().push(toast.clone());
    }

    fn fade(&self) {
        *self.fades.lock() += 1;
    }
}

#[derive(Default)]
pub struct RecordingUi {
    pub surface: Option<Arc<RecordingSurface>>,
    pub alerts: Mutex<Vec<String>>,
    pub username: Mutex<Option<String>>,
    pub role: Mutex<Option<String>>,
    pub avatar: Mutex<Option<String>>,
}

impl RecordingUi {
    pub fn with_surface() -> Self {
        Self {
            surface: Some(Arc::new(RecordingSurface::default())),
            ..Default::default()
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.surface
            .as_ref()
            .map(|s| s.shown.lock().clone())
            .unwrap_or_default()
    }

    pub fn fades(&self) -> usize {
        self.surface.as_ref().map(|s| *s.fades.lock()).unwrap_or(0)
    }
}

impl UiBindings for RecordingUi {
    fn toast_surface(&self) -> Option<Arc<dyn ToastSurface>> {
        self.surface
            .clone()
            .map(|s| s as Arc<dyn ToastSurface>)
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }

    fn set_username(&self, text: &str) {
        *self.username.lock() = Some(text.to_string());
    }

    fn set_role(&self, text: &str) {
        *self.role.lock() = Some(text.to_string());
    }

    fn set_avatar(&self, glyph: &str) {
        *self.avatar.lock() = Some(glyph.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().push(path.to_string());
    }
}

pub struct Harness {
    pub client: SessionClient,
    pub store: MemoryStore,
    pub transport: Arc<MockTransport>,
    pub ui: Arc<RecordingUi>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness() -> Harness {
    harness_with_ui(RecordingUi::with_surface())
}

pub fn harness_with_ui(ui: RecordingUi) -> Harness {
    let store = MemoryStore::new();
    let transport = Arc::new(MockTransport::default());
    let ui = Arc::new(ui);
    let navigator = Arc::new(RecordingNavigator::default());

    let client = SessionClient::new(
        Arc::new(store.clone()),
        transport.clone(),
        ui.clone(),
        navigator.clone(),
        SessionOptions::default(),
    );

    Harness {
        client,
        store,
        transport,
        ui,
        navigator,
    }
}
