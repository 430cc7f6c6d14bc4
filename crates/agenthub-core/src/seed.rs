//! Fixed collections the dashboard starts from.

use crate::agent::{Agent, AgentStatus, Performance, Sessions, TokenUsage};
use crate::cost::{CostEntry, CostStatus, EntityType};
use crate::incident::{
    AlertChain, AlertChainStatus, ExecutionStatus, FailedExecution, RollbackCandidate, Severity,
    SloHealth, SloMetric, Trend,
};

#[allow(clippy::too_many_arguments)]
fn agent(
    id: &str,
    name: &str,
    description: &str,
    status: AgentStatus,
    version: &str,
    model: &str,
    last_activity: &str,
    performance: [f64; 4],
    sessions: (u64, f64),
    tokens: (u64, u64),
    tags: &[&str],
) -> Agent {
    let [success_rate, response_time, uptime, error_rate] = performance;
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        status,
        version: version.to_string(),
        model: model.to_string(),
        last_activity: last_activity.to_string(),
        performance: Performance {
            success_rate,
            response_time,
            uptime,
            error_rate,
        },
        sessions: Sessions {
            total: sessions.0,
            cost_per_session: sessions.1,
        },
        tokens: TokenUsage {
            input: tokens.0,
            output: tokens.1,
            total: tokens.0 + tokens.1,
        },
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// The six agents the dashboard is seeded with.
pub fn seed_agents() -> Vec<Agent> {
    vec![
        agent(
            "1",
            "Customer Support Bot",
            "Intelligent customer service assistant that handles common inquiries and escalates complex issues to human agents.",
            AgentStatus::Active,
            "v2.1.3",
            "GPT-4",
            "2 minutes ago",
            [94.5, 150.0, 99.8, 2.1],
            (15420, 0.045),
            (1_250_000, 890_000),
            &["Customer Service", "NLP", "Support"],
        ),
        agent(
            "2",
            "Content Generator",
            "Creative AI that generates high-quality marketing content, blog posts, and social media content.",
            AgentStatus::Active,
            "v1.8.2",
            "GPT-4",
            "5 minutes ago",
            [91.2, 200.0, 99.9, 3.4],
            (8750, 0.067),
            (980_000, 1_340_000),
            &["Content", "Marketing", "Creative"],
        ),
        agent(
            "3",
            "Code Review Assistant",
            "Automated code review agent that analyzes pull requests and provides suggestions for improvements.",
            AgentStatus::Training,
            "v0.9.1-beta",
            "CodeLlama",
            "30 minutes ago",
            [88.7, 300.0, 98.5, 5.2],
            (3420, 0.032),
            (2_100_000, 780_000),
            &["Development", "Code Review", "Quality"],
        ),
        agent(
            "4",
            "Data Analyst",
            "Advanced analytics agent that processes large datasets and generates insights and reports.",
            AgentStatus::Active,
            "v3.0.1",
            "GPT-4",
            "1 hour ago",
            [96.1, 120.0, 99.7, 1.8],
            (22800, 0.089),
            (3_200_000, 1_800_000),
            &["Analytics", "Data Science", "Reports"],
        ),
        agent(
            "5",
            "Translation Service",
            "Multi-language translation agent supporting 50+ languages with context-aware translations.",
            AgentStatus::Error,
            "v2.3.0",
            "mT5",
            "2 hours ago",
            [89.3, 180.0, 97.2, 8.7],
            (12300, 0.052),
            (1_850_000, 1_650_000),
            &["Translation", "Multilingual", "Communication"],
        ),
        agent(
            "6",
            "Sales Assistant",
            "AI-powered sales agent that qualifies leads, schedules meetings, and follows up with prospects.",
            AgentStatus::Testing,
            "v1.5.4",
            "GPT-4",
            "15 minutes ago",
            [92.8, 160.0, 99.1, 2.9],
            (5680, 0.073),
            (950_000, 1_150_000),
            &["Sales", "Lead Generation", "CRM"],
        ),
    ]
}

pub fn seed_failed_executions() -> Vec<FailedExecution> {
    vec![
        FailedExecution {
            id: "fe1".to_string(),
            agent_id: "agent-001".to_string(),
            agent_name: "Customer Support Bot".to_string(),
            timestamp: "2025-01-13T15:30:00Z".to_string(),
            error_type: "API_TIMEOUT".to_string(),
            error_message: "External API timeout after 30s".to_string(),
            severity: Severity::High,
            duration_ms: 30_000,
            retry_count: 3,
            status: ExecutionStatus::Investigating,
            affected_users: 45,
        },
        FailedExecution {
            id: "fe2".to_string(),
            agent_id: "agent-002".to_string(),
            agent_name: "Data Processor".to_string(),
            timestamp: "2025-01-13T14:45:00Z".to_string(),
            error_type: "MEMORY_LIMIT".to_string(),
            error_message: "Memory limit exceeded during batch processing".to_string(),
            severity: Severity::Critical,
            duration_ms: 0,
            retry_count: 0,
            status: ExecutionStatus::Escalated,
            affected_users: 120,
        },
        FailedExecution {
            id: "fe3".to_string(),
            agent_id: "agent-003".to_string(),
            agent_name: "Analytics Engine".to_string(),
            timestamp: "2025-01-13T14:20:00Z".to_string(),
            error_type: "VALIDATION_ERROR".to_string(),
            error_message: "Invalid input schema detected".to_string(),
            severity: Severity::Medium,
            duration_ms: 5000,
            retry_count: 1,
            status: ExecutionStatus::Resolved,
            affected_users: 12,
        },
    ]
}

pub fn seed_rollback_candidates() -> Vec<RollbackCandidate> {
    let candidate =
        |version: &str, deployed_at: &str, stability, success_rate, error_count, recommended| {
            RollbackCandidate {
                version: version.to_string(),
                deployed_at: deployed_at.to_string(),
                stability,
                success_rate,
                error_count,
                can_rollback: true,
                recommended,
            }
        };
    vec![
        candidate("v2.4.1", "2025-01-12T10:00:00Z", 98.5, 99.2, 3, true),
        candidate("v2.4.0", "2025-01-10T16:30:00Z", 95.8, 97.8, 8, false),
        candidate("v2.3.9", "2025-01-08T14:15:00Z", 97.2, 98.5, 5, false),
    ]
}

pub fn seed_slo_metrics() -> Vec<SloMetric> {
    let metric = |name: &str, current, target, threshold, status, trend| SloMetric {
        name: name.to_string(),
        current,
        target,
        threshold,
        status,
        trend,
    };
    vec![
        metric("Availability", 99.2, 99.5, 99.0, SloHealth::Warning, Trend::Down),
        metric("Response Time", 850.0, 500.0, 1000.0, SloHealth::Critical, Trend::Up),
        metric("Error Rate", 0.8, 0.5, 1.0, SloHealth::Warning, Trend::Up),
        metric("Throughput", 1250.0, 1000.0, 800.0, SloHealth::Healthy, Trend::Up),
    ]
}

pub fn seed_alert_chains() -> Vec<AlertChain> {
    let chain = |id: &str, name: &str, source: &str, deps: &[&str], status, last: &str| AlertChain {
        id: id.to_string(),
        name: name.to_string(),
        source: source.to_string(),
        dependencies: deps.iter().map(|d| d.to_string()).collect(),
        status,
        last_triggered: last.to_string(),
    };
    vec![
        chain(
            "ac1",
            "High Error Rate → Auto Scale",
            "Error Monitoring",
            &["Load Balancer", "Auto Scaler", "Notification Service"],
            AlertChainStatus::Active,
            "2025-01-13T15:30:00Z",
        ),
        chain(
            "ac2",
            "Memory Limit → Restart Service",
            "Resource Monitor",
            &["Service Manager", "Health Checker"],
            AlertChainStatus::Failed,
            "2025-01-13T14:45:00Z",
        ),
        chain(
            "ac3",
            "API Timeout → Circuit Breaker",
            "API Gateway",
            &["Circuit Breaker", "Fallback Service"],
            AlertChainStatus::Active,
            "2025-01-13T14:20:00Z",
        ),
    ]
}

pub fn seed_cost_entries() -> Vec<CostEntry> {
    // (id, name, type, estimated cost, hours, cost per unit, last run, status, breakdown)
    let rows = [
        (
            "1",
            "Agent A",
            EntityType::Agent,
            300.0,
            12.0,
            25.0,
            "2025-08-06",
            CostStatus::Active,
            "12 runs x ₹25",
        ),
        (
            "2",
            "Tool X",
            EntityType::Tool,
            200.0,
            8.0,
            25.0,
            "2025-08-05",
            CostStatus::Active,
            "8 runs x ₹25",
        ),
        (
            "3",
            "Server 1",
            EntityType::Server,
            100.0,
            24.0,
            4.0,
            "2025-08-07",
            CostStatus::Inactive,
            "24 hrs x ₹4",
        ),
        (
            "4",
            "Agent B",
            EntityType::Agent,
            300.0,
            10.0,
            30.0,
            "2025-08-04",
            CostStatus::Active,
            "10 runs x ₹30",
        ),
        (
            "5",
            "Tool Y",
            EntityType::Tool,
            0.0,
            7.0,
            28.5,
            "2025-08-03",
            CostStatus::Inactive,
            "7 runs x ₹28.5",
        ),
    ];
    rows.into_iter()
        .map(|(id, name, entity_type, cost, hours, unit, last_run, status, breakdown)| CostEntry {
            id: id.to_string(),
            name: name.to_string(),
            entity_type,
            estimated_cost: cost,
            usage_hours: hours,
            cost_per_unit: unit,
            last_run: last_run.to_string(),
            status,
            breakdown: breakdown.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_agent_ids_are_unique() {
        let agents = seed_agents();
        let mut ids: Vec<_> = agents.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), agents.len());
    }

    #[test]
    fn token_totals_are_sums() {
        for a in seed_agents() {
            assert_eq!(a.tokens.total, a.tokens.input + a.tokens.output, "{}", a.name);
        }
    }

    #[test]
    fn exactly_one_recommended_rollback() {
        let recommended = seed_rollback_candidates()
            .into_iter()
            .filter(|c| c.recommended)
            .count();
        assert_eq!(recommended, 1);
    }
}
