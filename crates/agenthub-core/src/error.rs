use crate::wizard::WizardStepId;

/// Failures reported by agent lookups and list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    AgentNotFound(String),
    UnknownSortKey(String),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AgentNotFound(id) => write!(f, "agent {id} not found"),
            Self::UnknownSortKey(key) => write!(
                f,
                "unknown sort key {key:?} (expected name, performance, lastActivity or cost)"
            ),
        }
    }
}

impl std::error::Error for DashboardError {}

/// Rejected wizard transitions and configuration edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The step validator refused to let the wizard leave `step`.
    Validation {
        step: WizardStepId,
        reason: String,
    },
    /// Adding/removing configurations or picking an orchestration pattern
    /// requires multi-agent mode.
    MultiAgentOnly,
    /// Removing the entry would leave the wizard with no configuration.
    LastConfiguration,
    NoSuchConfiguration(usize),
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { step, reason } => {
                write!(f, "step {} is not valid: {reason}", step.as_str())
            },
            Self::MultiAgentOnly => write!(f, "operation requires multi-agent mode"),
            Self::LastConfiguration => {
                write!(f, "at least one agent configuration must remain")
            },
            Self::NoSuchConfiguration(index) => {
                write!(f, "no agent configuration at index {index}")
            },
        }
    }
}

impl std::error::Error for WizardError {}
