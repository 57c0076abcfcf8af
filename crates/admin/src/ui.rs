//! UI capabilities injected into the draft controllers.
//!
//! Controllers never render anything themselves. They report outcomes through
//! a [`NotificationSink`] and ask yes/no questions through a [`ConfirmPrompt`],
//! so the same logic drives the CLI, the preview server and the tests.

use std::sync::{Arc, Mutex};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient, user-visible feedback (a toast, a CLI line, ...).
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Blocking yes/no confirmation.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Writes every notification to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(%severity, "{message}"),
            Severity::Success | Severity::Info => tracing::info!(%severity, "{message}"),
        }
    }
}

/// Keeps notifications in memory, in the order they were sent.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    entries: Arc<Mutex<Vec<(String, Severity)>>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Severity)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// The most recent notification, if any.
    #[must_use]
    pub fn last(&self) -> Option<(String, Severity)> {
        self.entries().pop()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl NotificationSink for MemoryNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((message.to_owned(), severity));
        }
    }
}

/// Answers every prompt with a fixed value (`--yes` on the CLI).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmPrompt for FixedAnswer {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!(answer = self.0, "{message}");
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_keeps_order() {
        let sink = MemoryNotifier::new();
        sink.notify("uno", Severity::Info);
        sink.notify("dos", Severity::Error);

        assert_eq!(
            sink.entries(),
            vec![
                ("uno".to_string(), Severity::Info),
                ("dos".to_string(), Severity::Error),
            ]
        );
        assert_eq!(sink.last(), Some(("dos".to_string(), Severity::Error)));

        sink.clear();
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let sink = MemoryNotifier::new();
        let handle: Arc<dyn NotificationSink> = Arc::new(sink.clone());
        handle.notify("guardado", Severity::Success);
        assert_eq!(sink.entries().len(), 1);
    }

    #[test]
    fn test_fixed_answer() {
        assert!(FixedAnswer(true).confirm("¿Seguro?"));
        assert!(!FixedAnswer(false).confirm("¿Seguro?"));
    }
}
