//! Single-slot notification
//!
//! The last event wins: showing a new message replaces whatever was there and
//! restarts the visibility window. There is no queue.

use std::time::{Duration, Instant};

/// How the message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

/// A message that auto-dismisses after its time-to-live
#[derive(Debug, Clone)]
pub struct Notification {
    message: String,
    severity: Severity,
    /// `None` once dismissed or before anything was shown
    opened_at: Option<Instant>,
    ttl: Duration,
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl Notification {
    /// Visibility window used when no other is configured
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

    /// Creates a closed notification slot
    pub fn new(ttl: Duration) -> Self {
        Self {
            message: String::new(),
            severity: Severity::Info,
            opened_at: None,
            ttl,
        }
    }

    /// Replaces the message and re-opens the slot
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_at(message, severity, Instant::now());
    }

    /// Same as [`Notification::show`] with an explicit clock reading
    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.message = message.into();
        self.severity = severity;
        self.opened_at = Some(now);
    }

    /// Closes the slot before the window runs out
    pub fn dismiss(&mut self) {
        self.opened_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.opened_at
            .is_some_and(|opened| now.saturating_duration_since(opened) < self.ttl)
    }

    /// Message and severity, if still on screen
    pub fn visible_at(&self, now: Instant) -> Option<(&str, Severity)> {
        self.is_visible_at(now)
            .then_some((self.message.as_str(), self.severity))
    }

    /// Last message shown, visible or not
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let notification = Notification::default();
        assert!(!notification.is_visible());
        assert_eq!(notification.ttl(), Duration::from_secs(3));
    }

    #[test]
    fn test_auto_dismisses_after_ttl() {
        let start = Instant::now();
        let mut notification = Notification::default();
        notification.show_at("Claim submitted successfully", Severity::Success, start);

        assert!(notification.is_visible_at(start));
        assert!(notification.is_visible_at(start + Duration::from_millis(2999)));
        assert!(!notification.is_visible_at(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_dismiss_closes_immediately() {
        let mut notification = Notification::default();
        notification.show("hello", Severity::Info);
        notification.dismiss();
        assert!(!notification.is_visible());
        assert_eq!(notification.message(), "hello");
    }

    #[test]
    fn test_last_write_wins_and_restarts_window() {
        let start = Instant::now();
        let mut notification = Notification::default();
        notification.show_at("first", Severity::Success, start);
        notification.show_at("second", Severity::Error, start + Duration::from_secs(2));

        let later = start + Duration::from_secs(4);
        assert_eq!(notification.visible_at(later), Some(("second", Severity::Error)));
    }
}
