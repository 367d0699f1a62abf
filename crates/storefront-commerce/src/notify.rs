//! Transient notifications ("toasts").
//!
//! Each toast carries its own deadline. [`ToastQueue::expire`] removes
//! exactly the toasts whose deadline has passed, so a toast never
//! disappears early because another one was pushed before it. The queue
//! holds no timers: the owner decides when to call `expire`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ids::ToastId;

/// How long a toast stays visible by default.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(3);

/// Toast severity, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    #[default]
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

/// A notification waiting to expire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
    pub expires_at: Instant,
}

impl Toast {
    /// Whether the toast's deadline has passed at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// FIFO of active toasts.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    ttl: Duration,
    next_id: u64,
}

impl ToastQueue {
    /// Create a queue with the default three-second lifetime.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOAST_TTL)
    }

    /// Create a queue with a custom lifetime.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
            next_id: 0,
        }
    }

    /// Push a toast created now.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> ToastId {
        self.push_at(message, severity, Instant::now())
    }

    /// Push a toast created at `now`.
    pub fn push_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> ToastId {
        let id = ToastId::new(self.next_id);
        self.next_id += 1;

        let toast = Toast {
            id,
            message: message.into(),
            severity,
            created_at: now,
            expires_at: now + self.ttl,
        };
        debug!(toast = %id, severity = severity.as_str(), message = %toast.message, "toast queued");
        self.toasts.push_back(toast);
        id
    }

    /// Remove and return every toast whose deadline has passed, oldest first.
    pub fn expire(&mut self, now: Instant) -> Vec<Toast> {
        let mut expired = Vec::new();
        let mut kept = VecDeque::with_capacity(self.toasts.len());
        for toast in self.toasts.drain(..) {
            if toast.is_expired(now) {
                expired.push(toast);
            } else {
                kept.push_back(toast);
            }
        }
        self.toasts = kept;

        if !expired.is_empty() {
            debug!(expired = expired.len(), remaining = self.toasts.len(), "toasts expired");
        }
        expired
    }

    /// Remove a toast before its deadline. Returns it if it was active.
    pub fn dismiss(&mut self, id: ToastId) -> Option<Toast> {
        let position = self.toasts.iter().position(|t| t.id == id)?;
        self.toasts.remove(position)
    }

    /// Active toasts, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// The next deadline, if any toast is active.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.toasts.iter().map(|t| t.expires_at).min()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(queue: &ToastQueue) -> Vec<&str> {
        queue.active().map(|t| t.message.as_str()).collect()
    }

    #[test]
    fn test_push_is_fifo() {
        let mut queue = ToastQueue::new();
        let start = Instant::now();
        queue.push_at("first", Severity::Success, start);
        queue.push_at("second", Severity::Error, start);
        assert_eq!(messages(&queue), vec!["first", "second"]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_expire_after_ttl() {
        let mut queue = ToastQueue::new();
        let start = Instant::now();
        queue.push_at("saved", Severity::Success, start);

        assert!(queue.expire(start + Duration::from_millis(2999)).is_empty());
        let expired = queue.expire(start + DEFAULT_TOAST_TTL);
        assert_eq!(expired.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_expire_removes_only_elapsed_toasts() {
        let mut queue = ToastQueue::new();
        let start = Instant::now();
        queue.push_at("a", Severity::Info, start);
        queue.push_at("b", Severity::Info, start + Duration::from_secs(1));
        queue.push_at("c", Severity::Info, start + Duration::from_secs(2));

        // a's deadline fires; b and c were pushed later and must survive.
        let expired = queue.expire(start + Duration::from_secs(3));
        assert_eq!(expired.iter().map(|t| t.message.as_str()).collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(messages(&queue), vec!["b", "c"]);

        queue.expire(start + Duration::from_secs(5));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss() {
        let mut queue = ToastQueue::new();
        let start = Instant::now();
        let a = queue.push_at("a", Severity::Info, start);
        queue.push_at("b", Severity::Info, start);

        assert_eq!(queue.dismiss(a).unwrap().message, "a");
        assert!(queue.dismiss(a).is_none());
        assert_eq!(messages(&queue), vec!["b"]);
    }

    #[test]
    fn test_custom_ttl_and_deadline() {
        let mut queue = ToastQueue::with_ttl(Duration::from_millis(500));
        assert_eq!(queue.next_deadline(), None);

        let start = Instant::now();
        queue.push_at("quick", Severity::Info, start);
        assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(500)));
        assert_eq!(queue.expire(start + Duration::from_millis(500)).len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut queue = ToastQueue::new();
        let a = queue.push("a", Severity::Info);
        let b = queue.push("b", Severity::Info);
        assert_ne!(a, b);
        assert!(b > a);
    }
}
