use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Lifecycle status of a monitored agent.
///
/// Only `Active` and `Inactive` are reachable through [`AgentCollection::start`]
/// and [`AgentCollection::stop`]. `Error`, `Training` and `Testing` are set by
/// whatever supplies the collection (seed data today, a backend later).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
    Error,
    Training,
    Testing,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 5] = [
        AgentStatus::Active,
        AgentStatus::Inactive,
        AgentStatus::Error,
        AgentStatus::Training,
        AgentStatus::Testing,
    ];

    /// Whether a user action can move an agent into this status.
    pub fn has_entry_transition(self) -> bool {
        matches!(self, AgentStatus::Active | AgentStatus::Inactive)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Inactive => "inactive",
            AgentStatus::Error => "error",
            AgentStatus::Training => "training",
            AgentStatus::Testing => "testing",
        }
    }
}

/// Quality figures, percentages except `response_time` (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub success_rate: f64,
    pub response_time: f64,
    pub uptime: f64,
    pub error_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sessions {
    pub total: u64,
    pub cost_per_session: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

/// A monitored agent as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: AgentStatus,
    pub version: String,
    pub model: String,
    /// Free-text relative time such as "5 minutes ago".
    pub last_activity: String,
    pub performance: Performance,
    pub sessions: Sessions,
    pub tokens: TokenUsage,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Outcome of a successful start/stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub agent_id: String,
    pub agent_name: String,
    pub from: AgentStatus,
    pub to: AgentStatus,
}

/// The canonical, ordered agent collection.
///
/// Views never mutate it; the only mutation is a status change by id.
#[derive(Debug, Clone, Default)]
pub struct AgentCollection {
    agents: Vec<Agent>,
}

impl AgentCollection {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Mark the agent `active`.
    pub fn start(&mut self, id: &str) -> Result<StatusChange, DashboardError> {
        self.set_status(id, AgentStatus::Active)
    }

    /// Mark the agent `inactive`.
    pub fn stop(&mut self, id: &str) -> Result<StatusChange, DashboardError> {
        self.set_status(id, AgentStatus::Inactive)
    }

    fn set_status(&mut self, id: &str, to: AgentStatus) -> Result<StatusChange, DashboardError> {
        let agent = self
            .agents
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DashboardError::AgentNotFound(id.to_string()))?;
        let from = agent.status;
        agent.status = to;
        tracing::debug!(
            agent = %agent.id,
            from = from.as_str(),
            to = to.as_str(),
            "agent status changed"
        );
        Ok(StatusChange {
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            from,
            to,
        })
    }
}
