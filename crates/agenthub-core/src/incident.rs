//! Incident panel data: failed executions, rollback candidates, SLOs and
//! alert chains. Everything here is display data; no remediation runs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Investigating,
    Resolved,
    Escalated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedExecution {
    pub id: String,
    pub agent_id: String,
    pub agent_name: String,
    pub timestamp: String,
    pub error_type: String,
    pub error_message: String,
    pub severity: Severity,
    pub duration_ms: u64,
    pub retry_count: u32,
    pub status: ExecutionStatus,
    pub affected_users: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackCandidate {
    pub version: String,
    pub deployed_at: String,
    pub stability: f64,
    pub success_rate: f64,
    pub error_count: u32,
    pub can_rollback: bool,
    pub recommended: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SloHealth {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloMetric {
    pub name: String,
    pub current: f64,
    pub target: f64,
    pub threshold: f64,
    pub status: SloHealth,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertChainStatus {
    Active,
    Failed,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertChain {
    pub id: String,
    pub name: String,
    pub source: String,
    pub dependencies: Vec<String>,
    pub status: AlertChainStatus,
    pub last_triggered: String,
}

/// Executions whose agent name, error type or message contains `search`,
/// case-insensitively. Blank search keeps everything.
pub fn filter_executions(executions: &[FailedExecution], search: &str) -> Vec<FailedExecution> {
    let needle = search.trim().to_lowercase();
    executions
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.agent_name.to_lowercase().contains(&needle)
                || e.error_type.to_lowercase().contains(&needle)
                || e.error_message.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// The version the panel suggests rolling back to, if any.
pub fn recommended_rollback(candidates: &[RollbackCandidate]) -> Option<&RollbackCandidate> {
    candidates.iter().find(|c| c.recommended && c.can_rollback)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

/// Header figures for the incident panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IncidentSummary {
    pub total: usize,
    /// Not yet resolved.
    pub open: usize,
    pub by_severity: SeverityCounts,
    pub affected_users: u64,
    pub failing_alert_chains: usize,
    pub slo_breaches: usize,
}

impl IncidentSummary {
    pub fn compute(
        executions: &[FailedExecution],
        slos: &[SloMetric],
        chains: &[AlertChain],
    ) -> Self {
        let mut summary = IncidentSummary {
            total: executions.len(),
            ..IncidentSummary::default()
        };
        for e in executions {
            if e.status != ExecutionStatus::Resolved {
                summary.open += 1;
            }
            match e.severity {
                Severity::Low => summary.by_severity.low += 1,
                Severity::Medium => summary.by_severity.medium += 1,
                Severity::High => summary.by_severity.high += 1,
                Severity::Critical => summary.by_severity.critical += 1,
            }
            summary.affected_users += u64::from(e.affected_users);
        }
        summary.failing_alert_chains = chains
            .iter()
            .filter(|c| c.status == AlertChainStatus::Failed)
            .count();
        summary.slo_breaches = slos
            .iter()
            .filter(|s| s.status == SloHealth::Critical)
            .count();
        summary
    }
}

/// Panel toggles. They are shown and stored but drive nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentSettings {
    pub auto_rollback_enabled: bool,
    pub slo_auto_actions: bool,
}

impl Default for IncidentSettings {
    fn default() -> Self {
        Self {
            auto_rollback_enabled: true,
            slo_auto_actions: true,
        }
    }
}

/// Partial update of [`IncidentSettings`]; absent fields are kept.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct IncidentSettingsPatch {
    pub auto_rollback_enabled: Option<bool>,
    pub slo_auto_actions: Option<bool>,
}

impl IncidentSettings {
    pub fn apply(&mut self, patch: IncidentSettingsPatch) {
        if let Some(v) = patch.auto_rollback_enabled {
            self.auto_rollback_enabled = v;
        }
        if let Some(v) = patch.slo_auto_actions {
            self.slo_auto_actions = v;
        }
    }
}

/// The whole incident panel.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentView {
    pub summary: IncidentSummary,
    pub executions: Vec<FailedExecution>,
    pub rollback_candidates: Vec<RollbackCandidate>,
    pub recommended_rollback: Option<String>,
    pub slo_metrics: Vec<SloMetric>,
    pub alert_chains: Vec<AlertChain>,
    pub settings: IncidentSettings,
}

/// In-memory incident data set.
#[derive(Debug, Clone, Default)]
pub struct IncidentBoard {
    pub executions: Vec<FailedExecution>,
    pub rollback_candidates: Vec<RollbackCandidate>,
    pub slo_metrics: Vec<SloMetric>,
    pub alert_chains: Vec<AlertChain>,
    pub settings: IncidentSettings,
}

impl IncidentBoard {
    pub fn seeded() -> Self {
        Self {
            executions: crate::seed::seed_failed_executions(),
            rollback_candidates: crate::seed::seed_rollback_candidates(),
            slo_metrics: crate::seed::seed_slo_metrics(),
            alert_chains: crate::seed::seed_alert_chains(),
            settings: IncidentSettings::default(),
        }
    }

    pub fn execution(&self, id: &str) -> Option<&FailedExecution> {
        self.executions.iter().find(|e| e.id == id)
    }

    pub fn rollback_candidate(&self, version: &str) -> Option<&RollbackCandidate> {
        self.rollback_candidates
            .iter()
            .find(|c| c.version == version)
    }

    /// The panel with executions narrowed by `search`. The summary always
    /// covers every execution.
    pub fn view(&self, search: &str) -> IncidentView {
        IncidentView {
            summary: IncidentSummary::compute(
                &self.executions,
                &self.slo_metrics,
                &self.alert_chains,
            ),
            executions: filter_executions(&self.executions, search),
            rollback_candidates: self.rollback_candidates.clone(),
            recommended_rollback: recommended_rollback(&self.rollback_candidates)
                .map(|c| c.version.clone()),
            slo_metrics: self.slo_metrics.clone(),
            alert_chains: self.alert_chains.clone(),
            settings: self.settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_matches_name_type_and_message() {
        let board = IncidentBoard::seeded();
        assert_eq!(filter_executions(&board.executions, "support").len(), 1);
        assert_eq!(filter_executions(&board.executions, "memory_limit")[0].id, "fe2");
        assert_eq!(filter_executions(&board.executions, "schema")[0].id, "fe3");
        assert_eq!(filter_executions(&board.executions, "").len(), 3);
        assert!(filter_executions(&board.executions, "kafka").is_empty());
    }

    #[test]
    fn settings_default_on_and_patch_partially() {
        let mut board = IncidentBoard::seeded();
        assert_eq!(board.view("").settings, IncidentSettings::default());
        assert!(board.settings.auto_rollback_enabled);

        board.settings.apply(IncidentSettingsPatch {
            slo_auto_actions: Some(false),
            ..IncidentSettingsPatch::default()
        });
        assert!(board.settings.auto_rollback_enabled);
        assert!(!board.view("").settings.slo_auto_actions);
    }

    #[test]
    fn summary_counts() {
        let board = IncidentBoard::seeded();
        let s = board.view("").summary;
        assert_eq!(s.total, 3);
        assert_eq!(s.open, 2);
        assert_eq!(s.by_severity.critical, 1);
        assert_eq!(s.by_severity.high, 1);
        assert_eq!(s.by_severity.medium, 1);
        assert_eq!(s.affected_users, 177);
        assert_eq!(s.failing_alert_chains, 1);
        assert_eq!(s.slo_breaches, 1);
    }

    #[test]
    fn recommended_candidate_must_be_rollbackable() {
        let mut board = IncidentBoard::seeded();
        assert_eq!(board.view("").recommended_rollback.as_deref(), Some("v2.4.1"));
        board.rollback_candidates[0].can_rollback = false;
        assert!(recommended_rollback(&board.rollback_candidates).is_none());
    }

    #[test]
    fn severity_orders_by_impact() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Low < Severity::Medium);
    }
}
