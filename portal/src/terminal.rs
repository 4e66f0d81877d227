//! Terminal bindings for the session client
//!
//! The toast surface is a stderr line; the identity slots form the banner
//! printed by `whoami`; navigation records the requested view.

use parking_lot::RwLock;
use std::sync::Arc;

use dm_core::{Navigator, Toast, ToastSurface, UiBindings};

#[derive(Debug, Default)]
pub struct TerminalToast {
    last: RwLock<Option<Toast>>,
}

impl TerminalToast {
    pub fn last(&self) -> Option<Toast> {
        self.last.read().clone()
    }
}

impl ToastSurface for TerminalToast {
    fn show(&self, toast: &Toast) {
        eprintln!("[{}] {}", toast.severity, toast.message);
        *self.last.write() = Some(toast.clone());
    }

    fn fade(&self) {
        tracing::trace!("Toast faded");
        self.last.write().take();
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Banner {
    username: Option<String>,
    role: Option<String>,
    avatar: Option<String>,
}

pub struct TerminalUi {
    toast: Option<Arc<TerminalToast>>,
    banner: RwLock<Banner>,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self {
            toast: Some(Arc::new(TerminalToast::default())),
            banner: RwLock::new(Banner::default()),
        }
    }

    /// No toast line; notifications go through `alert` instead
    pub fn without_toasts() -> Self {
        Self {
            toast: None,
            banner: RwLock::new(Banner::default()),
        }
    }

    pub fn toast(&self) -> Option<&Arc<TerminalToast>> {
        self.toast.as_ref()
    }

    /// `[A] ali (admin)`, or `None` before any user was applied
    pub fn banner(&self) -> Option<String> {
        let banner = self.banner.read();
        let username = banner.username.as_deref()?;
        Some(format!(
            "[{}] {} ({})",
            banner.avatar.as_deref().unwrap_or("?"),
            username,
            banner.role.as_deref().unwrap_or("")
        ))
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl UiBindings for TerminalUi {
    fn toast_surface(&self) -> Option<Arc<dyn ToastSurface>> {
        self.toast.clone().map(|t| t as Arc<dyn ToastSurface>)
    }

    fn alert(&self, message: &str) {
        eprintln!("!! {message}");
    }

    fn set_username(&self, text: &str) {
        self.banner.write().username = Some(text.to_string());
    }

    fn set_role(&self, text: &str) {
        self.banner.write().role = Some(text.to_string());
    }

    fn set_avatar(&self, glyph: &str) {
        self.banner.write().avatar = Some(glyph.to_string());
    }
}

/// Records where the session client wants the user to go
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    location: RwLock<Option<String>>,
}

impl TerminalNavigator {
    pub fn location(&self) -> Option<String> {
        self.location.read().clone()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        eprintln!("-> {path}");
        *self.location.write() = Some(path.to_string());
    }
}
