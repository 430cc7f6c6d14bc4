use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::events::DashboardEvent;

/// How loudly an event is surfaced to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Maximum number of simultaneously visible notifications.
pub const MAX_VISIBLE_NOTIFICATIONS: usize = 3;

/// Default cap on queued notifications; the oldest are dropped beyond it.
pub const DEFAULT_MAX_PENDING_NOTIFICATIONS: usize = 100;

/// A toast shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub level: NotificationLevel,
    pub timestamp: u64,
}

impl From<&DashboardEvent> for Notification {
    fn from(event: &DashboardEvent) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.body.clone(),
            level: event.level,
            timestamp: event.timestamp,
        }
    }
}

/// Visible toasts plus an overflow queue. Dismissing a visible toast
/// promotes the oldest pending one. The pending queue is bounded and drops
/// its oldest entry when full.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    visible: Vec<Notification>,
    pending: VecDeque<Notification>,
    max_pending: usize,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    pub visible: Vec<Notification>,
    pub pending: usize,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_PENDING_NOTIFICATIONS)
    }

    pub fn with_capacity(max_pending: usize) -> Self {
        Self {
            visible: Vec::new(),
            pending: VecDeque::new(),
            max_pending,
        }
    }

    pub fn push(&mut self, notification: Notification) {
        if self.visible.len() < MAX_VISIBLE_NOTIFICATIONS {
            self.visible.push(notification);
            return;
        }
        self.pending.push_back(notification);
        while self.pending.len() > self.max_pending {
            if let Some(dropped) = self.pending.pop_front() {
                tracing::debug!(id = %dropped.id, "notification queue full, dropping oldest");
            }
        }
    }

    pub fn push_event(&mut self, event: &DashboardEvent) {
        self.push(Notification::from(event));
    }

    pub fn visible(&self) -> &[Notification] {
        &self.visible
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Dismiss a toast by id, visible or pending. Returns whether it existed.
    pub fn dismiss(&mut self, id: &str) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id == id) {
            self.visible.remove(pos);
            if let Some(next) = self.pending.pop_front() {
                self.visible.push(next);
            }
            return true;
        }
        let before = self.pending.len();
        self.pending.retain(|n| n.id != id);
        self.pending.len() != before
    }

    pub fn clear(&mut self) {
        self.visible.clear();
        self.pending.clear();
    }

    pub fn snapshot(&self) -> NotificationView {
        NotificationView {
            visible: self.visible.clone(),
            pending: self.pending.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    fn note(id: &str) -> Notification {
        Notification {
            id: id.to_string(),
            title: format!("Note {id}"),
            description: None,
            level: NotificationLevel::Info,
            timestamp: 0,
        }
    }

    #[test]
    fn overflow_goes_to_pending() {
        let mut q = NotificationQueue::new();
        for i in 0..5 {
            q.push(note(&i.to_string()));
        }
        assert_eq!(q.visible().len(), MAX_VISIBLE_NOTIFICATIONS);
        assert_eq!(q.pending_count(), 2);
    }

    #[test]
    fn dismiss_promotes_oldest_pending() {
        let mut q = NotificationQueue::new();
        for i in 0..5 {
            q.push(note(&i.to_string()));
        }
        assert!(q.dismiss("1"));
        let ids: Vec<_> = q.visible().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["0", "2", "3"]);
        assert_eq!(q.pending_count(), 1);
    }

    #[test]
    fn dismiss_pending_and_unknown() {
        let mut q = NotificationQueue::new();
        for i in 0..4 {
            q.push(note(&i.to_string()));
        }
        assert!(q.dismiss("3"));
        assert_eq!(q.pending_count(), 0);
        assert!(!q.dismiss("nope"));
    }

    #[test]
    fn pending_is_capped_keeping_newest() {
        let mut q = NotificationQueue::with_capacity(100);
        for i in 0..10_000 {
            q.push(note(&i.to_string()));
        }
        assert_eq!(q.visible().len(), MAX_VISIBLE_NOTIFICATIONS);
        assert_eq!(q.pending_count(), 100);

        // Dismissing a visible toast promotes the oldest survivor.
        assert!(q.dismiss("0"));
        assert_eq!(q.visible()[2].id, "9900");
        assert!(q.dismiss("9999"));
        assert!(!q.dismiss("5000"));
    }

    #[test]
    fn zero_capacity_keeps_only_visible() {
        let mut q = NotificationQueue::with_capacity(0);
        for i in 0..5 {
            q.push(note(&i.to_string()));
        }
        assert_eq!(q.visible().len(), MAX_VISIBLE_NOTIFICATIONS);
        assert_eq!(q.pending_count(), 0);
    }

    #[test]
    fn event_becomes_notification() {
        let event = DashboardEvent::new(
            EventKind::RcaRequested,
            NotificationLevel::Info,
            "RCA requested",
        )
        .with_body("Root cause analysis queued for fe1");
        let mut q = NotificationQueue::new();
        q.push_event(&event);
        assert_eq!(q.visible()[0].id, event.id);
        assert_eq!(
            q.visible()[0].description.as_deref(),
            Some("Root cause analysis queued for fe1")
        );
    }
}
