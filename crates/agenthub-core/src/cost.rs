use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default monthly budget the cost page measures against.
pub const DEFAULT_BUDGET: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    Agent,
    Tool,
    Server,
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "agent" => Ok(EntityType::Agent),
            "tool" => Ok(EntityType::Tool),
            "server" => Ok(EntityType::Server),
            _ => Err(format!("unknown entity type {s:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostStatus {
    Active,
    Inactive,
}

impl FromStr for CostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(CostStatus::Active),
            "inactive" => Ok(CostStatus::Inactive),
            _ => Err(format!("unknown cost status {s:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub estimated_cost: f64,
    pub usage_hours: f64,
    pub cost_per_unit: f64,
    pub last_run: String,
    pub status: CostStatus,
    pub breakdown: String,
}

/// Table filters; `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostFilter {
    pub search: String,
    pub entity_type: Option<EntityType>,
    pub status: Option<CostStatus>,
}

impl CostFilter {
    pub fn matches(&self, entry: &CostEntry) -> bool {
        let needle = self.search.trim().to_lowercase();
        (needle.is_empty() || entry.name.to_lowercase().contains(&needle))
            && self.entity_type.is_none_or(|t| t == entry.entity_type)
            && self.status.is_none_or(|s| s == entry.status)
    }

    pub fn apply(&self, entries: &[CostEntry]) -> Vec<CostEntry> {
        entries
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}

/// KPI cards on the cost page. Always computed over every entry, not the
/// filtered table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostSummary {
    pub total_estimated: f64,
    pub agent_cost: f64,
    pub tool_cost: f64,
    pub server_cost: f64,
    pub budget: f64,
    pub remaining_budget: f64,
}

impl CostSummary {
    pub fn compute(entries: &[CostEntry], budget: f64) -> Self {
        let sum_of = |t: EntityType| {
            entries
                .iter()
                .filter(|e| e.entity_type == t)
                .map(|e| e.estimated_cost)
                .sum::<f64>()
        };
        let total_estimated = entries.iter().map(|e| e.estimated_cost).sum::<f64>();
        Self {
            total_estimated,
            agent_cost: sum_of(EntityType::Agent),
            tool_cost: sum_of(EntityType::Tool),
            server_cost: sum_of(EntityType::Server),
            budget,
            remaining_budget: budget - total_estimated,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CostView {
    pub summary: CostSummary,
    pub entries: Vec<CostEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_cost_entries;

    #[test]
    fn summary_totals() {
        let s = CostSummary::compute(&seed_cost_entries(), DEFAULT_BUDGET);
        assert_eq!(s.total_estimated, 900.0);
        assert_eq!(s.agent_cost, 600.0);
        assert_eq!(s.tool_cost, 200.0);
        assert_eq!(s.server_cost, 100.0);
        assert_eq!(s.remaining_budget, 1100.0);
    }

    #[test]
    fn filter_combines_all_criteria() {
        let entries = seed_cost_entries();
        let all = CostFilter::default();
        assert_eq!(all.apply(&entries).len(), 5);

        let tools = CostFilter {
            entity_type: Some(EntityType::Tool),
            ..CostFilter::default()
        };
        assert_eq!(tools.apply(&entries).len(), 2);

        let inactive_tools = CostFilter {
            status: Some(CostStatus::Inactive),
            ..tools
        };
        let found = inactive_tools.apply(&entries);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Tool Y");

        let search = CostFilter {
            search: "agent".to_string(),
            ..CostFilter::default()
        };
        assert_eq!(search.apply(&entries).len(), 2);
    }

    #[test]
    fn parses_filter_values() {
        assert_eq!("Agent".parse::<EntityType>(), Ok(EntityType::Agent));
        assert_eq!("inactive".parse::<CostStatus>(), Ok(CostStatus::Inactive));
        assert!("gpu".parse::<EntityType>().is_err());
    }

    #[test]
    fn entry_type_field_is_named_type() {
        let json = serde_json::to_value(&seed_cost_entries()[2]).unwrap();
        assert_eq!(json["type"], "Server");
        assert_eq!(json["status"], "inactive");
    }
}
