//! Filtered, sorted projection of the canonical agent collection.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::error::DashboardError;

/// Sort orders offered by the dashboard's "Sort by" selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Performance,
    LastActivity,
    Cost,
}

impl FromStr for SortKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "performance" => Ok(SortKey::Performance),
            "lastActivity" | "last_activity" => Ok(SortKey::LastActivity),
            "cost" => Ok(SortKey::Cost),
            other => Err(DashboardError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Whether `agent` matches a free-text query on name, model or any tag.
/// `needle` must already be trimmed and lower-cased; empty matches everything.
fn matches_needle(agent: &Agent, needle: &str) -> bool {
    needle.is_empty()
        || agent.name.to_lowercase().contains(needle)
        || agent.model.to_lowercase().contains(needle)
        || agent
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Agents whose name, model or a tag contains `query`, case-insensitively,
/// in their original order.
pub fn filter_agents(agents: &[Agent], query: &str) -> Vec<Agent> {
    let needle = query.trim().to_lowercase();
    agents
        .iter()
        .filter(|a| matches_needle(a, &needle))
        .cloned()
        .collect()
}

fn compare(a: &Agent, b: &Agent, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortKey::Performance => b
            .performance
            .success_rate
            .total_cmp(&a.performance.success_rate),
        SortKey::LastActivity => {
            recency_minutes(&a.last_activity).cmp(&recency_minutes(&b.last_activity))
        },
        SortKey::Cost => a
            .sessions
            .cost_per_session
            .total_cmp(&b.sessions.cost_per_session),
    }
}

/// Stable sort into a new vector; the input is left untouched.
pub fn sort_agents(agents: &[Agent], key: SortKey) -> Vec<Agent> {
    let mut sorted = agents.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

/// Filter then sort, the full list projection.
pub fn project(agents: &[Agent], query: &str, key: SortKey) -> Vec<Agent> {
    let mut view = filter_agents(agents, query);
    view.sort_by(|a, b| compare(a, b, key));
    view
}

fn unit_minutes(word: &str) -> Option<f64> {
    let word = word.trim_end_matches(|c: char| !c.is_ascii_alphabetic());
    let singular = word.strip_suffix('s').unwrap_or(word);
    match singular {
        "sec" | "second" => Some(1.0 / 60.0),
        "min" | "minute" => Some(1.0),
        "hr" | "hour" => Some(60.0),
        "day" => Some(1440.0),
        "week" => Some(10_080.0),
        _ => None,
    }
}

/// Convert a relative-time phrase ("5 minutes ago", "1 hour ago",
/// "an hour ago", "2 days 3 hours ago") into whole minutes.
///
/// Every `<count> <unit>` pair is summed; seconds round down. Phrases with no
/// recognizable pair ("just now", "yesterday", "") are 0.
pub fn recency_minutes(text: &str) -> u64 {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let mut total = 0.0_f64;
    for pair in words.windows(2) {
        let count = match pair[0] {
            "a" | "an" | "one" => Some(1.0),
            w => w.parse::<u64>().ok().map(|n| n as f64),
        };
        if let Some(count) = count
            && let Some(unit) = unit_minutes(pair[1])
        {
            total += count * unit;
        }
    }
    total.floor() as u64
}

/// The list as rendered under "All Agents (n)".
#[derive(Debug, Clone, Serialize)]
pub struct AgentListView {
    pub query: String,
    pub sort: SortKey,
    /// Size of the canonical collection.
    pub total: usize,
    /// Size of the projection.
    pub shown: usize,
    pub agents: Vec<Agent>,
}

impl AgentListView {
    pub fn build(agents: &[Agent], query: &str, sort: SortKey) -> Self {
        let projected = project(agents, query, sort);
        Self {
            query: query.to_string(),
            sort,
            total: agents.len(),
            shown: projected.len(),
            agents: projected,
        }
    }
}
