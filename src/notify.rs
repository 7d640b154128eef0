//! # Notifications
//!
//! User-facing notification side channel for upload outcomes. The upload
//! pipeline is the only producer; the consuming shell decides how to render
//! (toast, status bar, log line).

use tracing::{error, info};

/// Outcome severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// One dismissible, human-readable notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub body: Option<String>,
}

impl Notification {
    pub fn success<S: Into<String>>(title: S, body: Option<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            body,
        }
    }

    pub fn error<S: Into<String>>(title: S, body: Option<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            body,
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default sink that renders notifications as structured log events.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => info!(
                title = %notification.title,
                body = notification.body.as_deref().unwrap_or(""),
                "notification"
            ),
            Severity::Error => error!(
                title = %notification.title,
                body = notification.body.as_deref().unwrap_or(""),
                "notification"
            ),
        }
    }
}
