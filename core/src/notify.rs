//! One-shot notification channel consumed by the next rendered view.
//!
//! The install abort protocol surfaces failure messages through this seam.
//! [`Flash`] is the default in-memory implementation; a host application
//! can implement [`Notifier`] over its own session/flash machinery instead.

use std::collections::HashMap;
use std::fmt;

/// Severity of a queued notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Error,
    Notice,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Success => write!(f, "success"),
            NoticeKind::Error => write!(f, "error"),
            NoticeKind::Notice => write!(f, "notice"),
        }
    }
}

/// Sink for one-shot user-facing messages.
pub trait Notifier {
    /// Queues `message` under `kind`, replacing any message already queued
    /// for that kind.
    fn set(&mut self, kind: NoticeKind, message: &str);
}

/// In-memory one-shot message queue.
///
/// Each kind holds at most one message; setting overwrites, taking
/// consumes.
///
/// # Examples
///
/// ```
/// use plugin_installer_core::{Flash, Notifier, NoticeKind};
///
/// let mut flash = Flash::new();
/// flash.set(NoticeKind::Error, "table 'widgets' already exists");
/// assert_eq!(
///     flash.take(NoticeKind::Error).as_deref(),
///     Some("table 'widgets' already exists")
/// );
/// assert!(flash.take(NoticeKind::Error).is_none());
/// ```
#[derive(Debug, Default)]
pub struct Flash {
    messages: HashMap<NoticeKind, String>,
}

impl Flash {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes and returns the message queued under `kind`, if any.
    pub fn take(&mut self, kind: NoticeKind) -> Option<String> {
        self.messages.remove(&kind)
    }

    /// Peeks at the message queued under `kind` without consuming it.
    pub fn peek(&self, kind: NoticeKind) -> Option<&str> {
        self.messages.get(&kind).map(String::as_str)
    }
}

impl Notifier for Flash {
    fn set(&mut self, kind: NoticeKind, message: &str) {
        self.messages.insert(kind, message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_previous_message() {
        let mut flash = Flash::new();
        flash.set(NoticeKind::Error, "first");
        flash.set(NoticeKind::Error, "second");
        assert_eq!(flash.take(NoticeKind::Error).as_deref(), Some("second"));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut flash = Flash::new();
        flash.set(NoticeKind::Error, "bad");
        flash.set(NoticeKind::Success, "good");
        assert_eq!(flash.peek(NoticeKind::Error), Some("bad"));
        assert_eq!(flash.take(NoticeKind::Success).as_deref(), Some("good"));
        assert_eq!(flash.peek(NoticeKind::Success), None);
    }
}
