use std::collections::VecDeque;

use agenthub_core::events::DashboardEvent;
use agenthub_core::notification::NotificationLevel;
use tokio::sync::broadcast;

/// Default maximum number of events stored before oldest are evicted.
const DEFAULT_MAX_STORED_EVENTS: usize = 500;

/// Default broadcast channel capacity for event fan-out.
const DEFAULT_BROADCAST_CAPACITY: usize = 1024;

/// Aggregate statistics about the event store.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EventStoreStats {
    pub total_stored: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

/// In-memory, bounded log of dashboard events with broadcast fan-out.
pub struct EventStore {
    events: VecDeque<DashboardEvent>,
    broadcast_tx: broadcast::Sender<DashboardEvent>,
    max_stored_events: usize,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_STORED_EVENTS, DEFAULT_BROADCAST_CAPACITY)
    }

    pub fn with_capacity(max_stored_events: usize, broadcast_capacity: usize) -> Self {
        let (broadcast_tx, _) = broadcast::channel(broadcast_capacity);
        Self {
            events: VecDeque::new(),
            broadcast_tx,
            max_stored_events,
        }
    }

    /// Store an event and broadcast it. Evicts the oldest event if at capacity.
    pub fn insert(&mut self, event: DashboardEvent) {
        // No subscribers is fine.
        let _ = self.broadcast_tx.send(event.clone());
        self.events.push_back(event);
        while self.events.len() > self.max_stored_events {
            self.events.pop_front();
        }
    }

    #[cfg(test)]
    pub fn get(&self, event_id: &str) -> Option<&DashboardEvent> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Events stored after `event_id`, oldest first. Empty when the id is
    /// unknown or already evicted.
    pub fn since(&self, event_id: &str) -> Vec<DashboardEvent> {
        match self.events.iter().position(|e| e.id == event_id) {
            Some(pos) => self.events.iter().skip(pos + 1).cloned().collect(),
            None => Vec::new(),
        }
    }

    /// The most recent `count` events, newest first.
    pub fn recent(&self, count: usize) -> Vec<&DashboardEvent> {
        self.events.iter().rev().take(count).collect()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.broadcast_tx.subscribe()
    }

    pub fn stats(&self) -> EventStoreStats {
        let count_level = |level: NotificationLevel| {
            self.events.iter().filter(|e| e.level == level).count()
        };
        EventStoreStats {
            total_stored: self.events.len(),
            total_errors: count_level(NotificationLevel::Error),
            total_warnings: count_level(NotificationLevel::Warning),
        }
    }
}
