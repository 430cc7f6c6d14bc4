use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::wizard::{AgentConfiguration, OrchestrationPattern};

/// The finalized wizard output handed to a deployment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub multi_agent: bool,
    pub configurations: Vec<AgentConfiguration>,
    pub orchestration: Option<OrchestrationPattern>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Queued,
    /// Reported by targets that start work before returning.
    Deploying,
}

/// What a deployment service returns for an accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReceipt {
    pub deployment_id: Uuid,
    pub status: DeploymentStatus,
    pub agent_names: Vec<String>,
}

/// Receives completed wizard configurations.
pub trait DeploymentTarget: Send + Sync {
    fn submit(&self, request: &DeploymentRequest) -> DeploymentReceipt;
}

/// Accepts every request and only records it in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggedDeployment;

impl DeploymentTarget for LoggedDeployment {
    fn submit(&self, request: &DeploymentRequest) -> DeploymentReceipt {
        let receipt = DeploymentReceipt {
            deployment_id: Uuid::new_v4(),
            status: DeploymentStatus::Queued,
            agent_names: request
                .configurations
                .iter()
                .map(|c| c.name.clone())
                .collect(),
        };
        tracing::info!(
            deployment_id = %receipt.deployment_id,
            agents = receipt.agent_names.len(),
            orchestration = ?request.orchestration,
            "deployment queued"
        );
        receipt
    }
}
