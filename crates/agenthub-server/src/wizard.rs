use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use agenthub_core::deployment::DeploymentReceipt;
use agenthub_core::events::{DashboardEvent, EventKind};
use agenthub_core::notification::NotificationLevel;
use agenthub_core::wizard::{
    AgentConfigPatch, AgentConfiguration, OrchestrationPattern, WizardAdvance, WizardView,
};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/v1/wizard
pub async fn get_wizard(State(state): State<AppState>) -> Json<WizardView> {
    Json(state.wizard.read().await.snapshot())
}

#[derive(Debug, Serialize)]
pub struct NextResponse {
    pub completed: bool,
    /// Present when the wizard was completed and handed off.
    pub receipt: Option<DeploymentReceipt>,
    pub wizard: WizardView,
}

/// POST /api/v1/wizard/next: advance, or deploy from the last step.
///
/// A completed wizard is submitted to the deployment target and reset.
pub async fn next_step(State(state): State<AppState>) -> Result<Json<NextResponse>, AppError> {
    let (receipt, wizard) = {
        let mut wizard = state.wizard.write().await;
        match wizard.next()? {
            WizardAdvance::Moved { from, to } => {
                tracing::debug!(from, to, "wizard advanced");
                (None, wizard.snapshot())
            },
            WizardAdvance::Completed(request) => {
                let receipt = state.deployments.submit(&request);
                wizard.reset();
                (Some(receipt), wizard.snapshot())
            },
        }
    };

    if let Some(receipt) = &receipt {
        let names = receipt.agent_names.join(", ");
        state
            .emit(
                DashboardEvent::new(
                    EventKind::WizardCompleted,
                    NotificationLevel::Success,
                    "Deployment submitted",
                )
                .with_body(format!("Deploying {names}"))
                .with_meta("deployment_id", serde_json::json!(receipt.deployment_id)),
            )
            .await;
    }

    Ok(Json(NextResponse {
        completed: receipt.is_some(),
        receipt,
        wizard,
    }))
}

/// POST /api/v1/wizard/prev
pub async fn prev_step(State(state): State<AppState>) -> Json<WizardView> {
    let mut wizard = state.wizard.write().await;
    wizard.prev();
    Json(wizard.snapshot())
}

/// POST /api/v1/wizard/steps/{n}: jump to a step, clamped into range.
pub async fn go_to_step(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Json<WizardView> {
    let mut wizard = state.wizard.write().await;
    wizard.go_to_step(index);
    Json(wizard.snapshot())
}

/// POST /api/v1/wizard/reset
pub async fn reset(State(state): State<AppState>) -> Json<WizardView> {
    let mut wizard = state.wizard.write().await;
    wizard.reset();
    Json(wizard.snapshot())
}

#[derive(Debug, Deserialize)]
pub struct ModeBody {
    pub multi_agent: bool,
}

/// POST /api/v1/wizard/mode
pub async fn set_mode(
    State(state): State<AppState>,
    Json(body): Json<ModeBody>,
) -> Json<WizardView> {
    let mut wizard = state.wizard.write().await;
    wizard.set_multi_agent(body.multi_agent);
    Json(wizard.snapshot())
}

#[derive(Debug, Serialize)]
pub struct AddAgentResponse {
    pub index: usize,
    pub wizard: WizardView,
}

/// POST /api/v1/wizard/agents: append a configuration (multi-agent only).
pub async fn add_agent(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AddAgentResponse>), AppError> {
    let mut wizard = state.wizard.write().await;
    let index = wizard.add_configuration()?;
    Ok((
        StatusCode::CREATED,
        Json(AddAgentResponse {
            index,
            wizard: wizard.snapshot(),
        }),
    ))
}

/// PATCH /api/v1/wizard/agents/{index}
pub async fn update_agent(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(patch): Json<AgentConfigPatch>,
) -> Result<Json<AgentConfiguration>, AppError> {
    let mut wizard = state.wizard.write().await;
    let config = wizard.update_configuration(index, patch)?;
    Ok(Json(config.clone()))
}

/// DELETE /api/v1/wizard/agents/{index}
pub async fn remove_agent(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<AgentConfiguration>, AppError> {
    let mut wizard = state.wizard.write().await;
    let removed = wizard.remove_configuration(index)?;
    Ok(Json(removed))
}

#[derive(Debug, Deserialize)]
pub struct OrchestrationBody {
    pub pattern: OrchestrationPattern,
}

/// PUT /api/v1/wizard/orchestration
pub async fn set_orchestration(
    State(state): State<AppState>,
    Json(body): Json<OrchestrationBody>,
) -> Result<Json<WizardView>, AppError> {
    let mut wizard = state.wizard.write().await;
    wizard.set_orchestration(body.pattern)?;
    Ok(Json(wizard.snapshot()))
}
