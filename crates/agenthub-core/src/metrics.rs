use serde::Serialize;

use crate::agent::{Agent, AgentStatus};

/// Agent counts per status, for the "n active • n training • n testing" line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub active: usize,
    pub inactive: usize,
    pub error: usize,
    pub training: usize,
    pub testing: usize,
}

/// Aggregate KPI figures for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_agents: usize,
    pub active_agents: usize,
    pub average_performance: f64,
    /// Sum of session totals across all agents.
    pub total_tests: u64,
    pub success_rate: f64,
    pub average_response_time: f64,
    pub by_status: StatusBreakdown,
}

impl DashboardMetrics {
    /// Recompute everything from the collection. Averages over an empty
    /// collection are 0.
    pub fn compute(agents: &[Agent]) -> Self {
        let mut by_status = StatusBreakdown::default();
        let mut success_sum = 0.0;
        let mut response_sum = 0.0;
        let mut total_tests = 0;
        for agent in agents {
            match agent.status {
                AgentStatus::Active => by_status.active += 1,
                AgentStatus::Inactive => by_status.inactive += 1,
                AgentStatus::Error => by_status.error += 1,
                AgentStatus::Training => by_status.training += 1,
                AgentStatus::Testing => by_status.testing += 1,
            }
            success_sum += agent.performance.success_rate;
            response_sum += agent.performance.response_time;
            total_tests += agent.sessions.total;
        }

        let mean = |sum: f64| {
            if agents.is_empty() {
                0.0
            } else {
                sum / agents.len() as f64
            }
        };
        let average_performance = mean(success_sum);

        Self {
            total_agents: agents.len(),
            active_agents: by_status.active,
            average_performance,
            total_tests,
            success_rate: average_performance,
            average_response_time: mean(response_sum),
            by_status,
        }
    }
}
