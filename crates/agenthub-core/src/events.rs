use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::notification::NotificationLevel;
use crate::time::unix_seconds_now;

/// Things that happen on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "agent.started")]
    AgentStarted,
    #[serde(rename = "agent.stopped")]
    AgentStopped,
    #[serde(rename = "playground.completed")]
    PlaygroundCompleted,
    #[serde(rename = "playground.cancelled")]
    PlaygroundCancelled,
    #[serde(rename = "wizard.completed")]
    WizardCompleted,
    #[serde(rename = "incident.rollback_started")]
    RollbackStarted,
    #[serde(rename = "incident.rollback_completed")]
    RollbackCompleted,
    #[serde(rename = "incident.rca_requested")]
    RcaRequested,
    #[serde(rename = "onboarding.completed")]
    OnboardingCompleted,
    #[serde(rename = "custom")]
    Custom,
}

/// A dashboard event. Every event is also a notification candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardEvent {
    pub id: String,
    pub kind: EventKind,
    #[serde(default)]
    pub level: NotificationLevel,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Unix seconds.
    pub timestamp: u64,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl DashboardEvent {
    pub fn new(kind: EventKind, level: NotificationLevel, title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            level,
            title: title.into(),
            body: None,
            timestamp: unix_seconds_now(),
            agent_id: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn for_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn with_meta(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serde_rename() {
        assert_eq!(
            serde_json::to_string(&EventKind::RollbackStarted).unwrap(),
            "\"incident.rollback_started\""
        );
        assert_eq!(
            serde_json::to_string(&EventKind::AgentStopped).unwrap(),
            "\"agent.stopped\""
        );
    }

    #[test]
    fn builder_sets_fields() {
        let event = DashboardEvent::new(
            EventKind::AgentStarted,
            NotificationLevel::Success,
            "Agent started",
        )
            .with_body("Customer Support Bot is now active")
            .for_agent("1")
            .with_meta("from", serde_json::json!("inactive"));
        assert_eq!(event.agent_id.as_deref(), Some("1"));
        assert_eq!(event.metadata["from"], "inactive");
        assert!(!event.id.is_empty());
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{
            "id": "e1",
            "kind": "custom",
            "title": "Minimal",
            "timestamp": 0
        }"#;
        let event: DashboardEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.level, NotificationLevel::Info);
        assert!(event.body.is_none());
        assert!(event.metadata.is_empty());
    }
}
