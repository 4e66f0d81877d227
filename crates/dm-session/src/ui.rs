//! Host UI collaborators
//!
//! The session client never looks up presentation elements itself; the
//! host hands it these bindings. A binding left at its default is a slot
//! the host does not render, and writes to it are skipped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warn,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Danger => "danger",
        }
    }

    /// Class list applied to the toast surface
    pub fn css_class(&self) -> String {
        format!("dm-toast dm-toast-{}", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "danger" => Ok(Severity::Danger),
            other => Err(format!("Unknown severity: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Notification region. A single surface: a new toast replaces the current one.
pub trait ToastSurface: Send + Sync {
    /// Make the toast visible with its severity styling
    fn show(&self, toast: &Toast);

    /// Visually dismiss whatever is currently shown
    fn fade(&self);
}

pub trait UiBindings: Send + Sync {
    /// `None` when the host has no notification region
    fn toast_surface(&self) -> Option<Arc<dyn ToastSurface>> {
        None
    }

    /// Blocking fallback used when there is no toast surface
    fn alert(&self, message: &str);

    fn set_username(&self, _text: &str) {}

    fn set_role(&self, _text: &str) {}

    fn set_avatar(&self, _glyph: &str) {}
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}
