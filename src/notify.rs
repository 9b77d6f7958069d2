//! User-visible notifications
//!
//! Failures in the table, form and page never propagate; they end up here
//! as non-blocking notices. Every notice is also logged.

use serde::Serialize;
use tracing::{error, info, warn};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single notice shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub message: String,
}

/// Pending notices, oldest first
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notice
    pub fn push(&mut self, level: Level, title: impl Into<String>, message: impl Into<String>) {
        let notification = Notification {
            level,
            title: title.into(),
            message: message.into(),
        };

        match level {
            Level::Error => error!(title = %notification.title, "{}", notification.message),
            Level::Warning => warn!(title = %notification.title, "{}", notification.message),
            Level::Info | Level::Success => {
                info!(title = %notification.title, "{}", notification.message)
            }
        }

        self.items.push(notification);
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(Level::Info, title, message);
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(Level::Success, title, message);
    }

    pub fn warning(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(Level::Warning, title, message);
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(Level::Error, title, message);
    }

    /// Take all pending notices
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
