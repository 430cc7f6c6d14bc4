use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use agenthub_core::events::{DashboardEvent, EventKind};
use agenthub_core::incident::{IncidentSettings, IncidentSettingsPatch, IncidentView};
use agenthub_core::notification::NotificationLevel;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IncidentQuery {
    pub search: String,
}

/// GET /api/v1/incidents?search=
pub async fn get_incidents(
    State(state): State<AppState>,
    Query(query): Query<IncidentQuery>,
) -> Json<IncidentView> {
    Json(state.incidents.read().await.view(&query.search))
}

/// PUT /api/v1/incidents/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<IncidentSettingsPatch>,
) -> Json<IncidentSettings> {
    let mut board = state.incidents.write().await;
    board.settings.apply(patch);
    tracing::info!(
        auto_rollback = board.settings.auto_rollback_enabled,
        slo_auto_actions = board.settings.slo_auto_actions,
        "incident settings updated"
    );
    Json(board.settings)
}

#[derive(Debug, Serialize)]
pub struct ActionAccepted {
    pub accepted: bool,
    pub target: String,
}

/// POST /api/v1/incidents/rollback/{version}
///
/// Announces the rollback, then a background task announces completion after
/// the configured delay. Nothing is actually rolled back.
pub async fn start_rollback(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Result<(StatusCode, Json<ActionAccepted>), AppError> {
    let can_rollback = state
        .incidents
        .read()
        .await
        .rollback_candidate(&version)
        .map(|c| c.can_rollback)
        .ok_or_else(|| AppError::NotFound(format!("version {version} not found")))?;
    if !can_rollback {
        return Err(AppError::Conflict(format!("version {version} cannot be rolled back to")));
    }

    tracing::info!(%version, "rollback initiated");
    state
        .emit(
            DashboardEvent::new(
                EventKind::RollbackStarted,
                NotificationLevel::Info,
                "Initiating Rollback",
            )
            .with_body(format!("Rolling back to version {version}...")),
        )
        .await;
    spawn_rollback(state.clone(), version.clone());

    Ok((
        StatusCode::ACCEPTED,
        Json(ActionAccepted {
            accepted: true,
            target: version,
        }),
    ))
}

fn spawn_rollback(state: AppState, version: String) {
    let cancel = state.shutdown.child_token();
    let delay = Duration::from_millis(state.config.incidents.rollback_duration_ms);
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(%version, "rollback abandoned on shutdown");
            },
            _ = tokio::time::sleep(delay) => {
                tracing::info!(%version, "rollback completed");
                state
                    .emit(
                        DashboardEvent::new(
                            EventKind::RollbackCompleted,
                            NotificationLevel::Success,
                            "Rollback Completed",
                        )
                        .with_body(format!("Successfully rolled back to version {version}")),
                    )
                    .await;
            },
        }
    });
}

/// POST /api/v1/incidents/{id}/rca: queue a root cause analysis.
pub async fn request_rca(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ActionAccepted>), AppError> {
    let agent_id = state
        .incidents
        .read()
        .await
        .execution(&id)
        .map(|e| e.agent_id.clone())
        .ok_or_else(|| AppError::NotFound(format!("execution {id} not found")))?;

    state
        .emit(
            DashboardEvent::new(
                EventKind::RcaRequested,
                NotificationLevel::Info,
                "RCA Analysis Started",
            )
            .with_body(format!("Analyzing root cause for execution {id}"))
            .for_agent(agent_id),
        )
        .await;

    Ok((
        StatusCode::ACCEPTED,
        Json(ActionAccepted {
            accepted: true,
            target: id,
        }),
    ))
}
