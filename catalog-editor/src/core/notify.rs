//! Notification surface
//!
//! The controller reports outcomes as (title, message, severity); the
//! surface owns display and dismissal timing.

use serde::Serialize;
use std::cell::RefCell;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// How long a notification stays up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    AutoHide(Duration),
    /// Stays until dismissed or superseded
    Sticky,
}

impl Severity {
    pub fn dismissal(&self) -> Dismissal {
        match self {
            Self::Success => Dismissal::AutoHide(Duration::from_secs(3)),
            Self::Info | Self::Warning => Dismissal::AutoHide(Duration::from_secs(5)),
            Self::Error => Dismissal::Sticky,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Success)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Warning)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Error)
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    Active,
    Dismissed,
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub seq: u64,
    pub notification: Notification,
    pub state: EntryState,
}

/// In-memory notification surface
///
/// Keeps every notification with its state. A new outcome supersedes sticky
/// errors that are still up; auto-hiding entries are left to the host timer.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: RefCell<Vec<LogEntry>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit dismissal; false if `seq` is unknown or already gone
    pub fn dismiss(&self, seq: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries
            .iter_mut()
            .find(|e| e.seq == seq && e.state == EntryState::Active)
        {
            Some(entry) => {
                entry.state = EntryState::Dismissed;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    pub fn active(&self) -> Vec<LogEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.state == EntryState::Active)
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries.borrow().last().map(|e| e.notification.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        let mut entries = self.entries.borrow_mut();
        for entry in entries.iter_mut() {
            if entry.state == EntryState::Active
                && entry.notification.severity.dismissal() == Dismissal::Sticky
            {
                entry.state = EntryState::Superseded;
            }
        }

        match notification.severity {
            Severity::Error => tracing::warn!(title = %notification.title, "{}", notification.message),
            _ => tracing::info!(title = %notification.title, "{}", notification.message),
        }

        let seq = entries.last().map_or(1, |e| e.seq + 1);
        entries.push(LogEntry {
            seq,
            notification,
            state: EntryState::Active,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_stay_longer_than_successes() {
        assert_eq!(Severity::Error.dismissal(), Dismissal::Sticky);
        assert_eq!(
            Severity::Success.dismissal(),
            Dismissal::AutoHide(Duration::from_secs(3))
        );
        assert_eq!(
            Severity::Warning.dismissal(),
            Dismissal::AutoHide(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_new_outcome_supersedes_sticky_error() {
        let log = NotificationLog::new();
        log.notify(Notification::error("Server Error", "boom"));
        log.notify(Notification::success("Success!", "saved"));

        let entries = log.entries();
        assert_eq!(entries[0].state, EntryState::Superseded);
        assert_eq!(entries[1].state, EntryState::Active);
        assert_eq!(log.active().len(), 1);
    }

    #[test]
    fn test_explicit_dismissal() {
        let log = NotificationLog::new();
        log.notify(Notification::error("Network Error", "unreachable"));
        let seq = log.entries()[0].seq;

        assert!(log.dismiss(seq));
        assert!(!log.dismiss(seq));
        assert!(log.active().is_empty());
        assert_eq!(log.len(), 1);
    }
}
