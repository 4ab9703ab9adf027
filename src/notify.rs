//! User-facing notifications.
//!
//! The core only produces [`Notice`] records. How they are displayed (toast,
//! log line, status bar) is up to the [`Notifier`] plugged into the session.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            created_at: Utc::now(),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Info)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }
}

/// Receives notices emitted by the wizard and the workspace helpers.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Forwards notices to `tracing` at a level matching their severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => tracing::info!(title = %notice.title, "{}", notice.description),
            Severity::Warning => tracing::warn!(title = %notice.title, "{}", notice.description),
            Severity::Error => tracing::error!(title = %notice.title, "{}", notice.description),
        }
    }
}

/// Keeps every notice in memory, in emission order.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice lock poisoned").clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().expect("notice lock poisoned").last().cloned()
    }

    pub fn clear(&self) {
        self.notices.lock().expect("notice lock poisoned").clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notice lock poisoned").push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_is_shared_between_clones() {
        let notifier = MemoryNotifier::new();
        let handle = notifier.clone();
        handle.notify(Notice::info("Saved", "ok"));
        assert_eq!(notifier.notices().len(), 1);
        assert_eq!(notifier.last().unwrap().title, "Saved");
        notifier.clear();
        assert!(handle.notices().is_empty());
    }
}
