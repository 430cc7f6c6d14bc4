use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use agenthub_core::events::{DashboardEvent, EventKind};
use agenthub_core::notification::NotificationLevel;
use agenthub_core::playground::{
    PendingRun, PlaygroundEdit, PlaygroundSession, PlaygroundView, TestResult,
};

use crate::error::AppError;
use crate::state::AppState;

/// A simulated run executing in the background.
pub struct RunHandle {
    pub run_id: Uuid,
    pub agent_id: String,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl RunHandle {
    /// Stop waiting; the run records nothing.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn the task that answers `run` after the configured latency with a
/// canned response, a random response time in [0, 3) s and a random cost
/// in [0, 0.001).
pub fn spawn_simulated_run(state: AppState, agent_id: String, run: PendingRun) -> RunHandle {
    let cancel = state.shutdown.child_token();
    let latency = Duration::from_millis(state.config.playground.simulated_latency_ms);
    let run_id = run.id;

    let task = tokio::spawn({
        let cancel = cancel.clone();
        let agent_id = agent_id.clone();
        async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(%run_id, "playground run cancelled before completion");
                    return;
                },
                _ = tokio::time::sleep(latency) => {},
            }

            let (response_time, cost) = {
                let mut rng = rand::rng();
                (rng.random_range(0.0..3.0), rng.random_range(0.0..0.001))
            };
            let result = TestResult::simulated(&run, response_time, cost);

            let recorded = {
                let mut sessions = state.playgrounds.write().await;
                sessions
                    .get_mut(&agent_id)
                    .is_some_and(|s| s.complete_run(result))
            };
            state.runs.write().await.remove(&run_id);

            if recorded {
                tracing::info!(
                    %run_id,
                    agent_id = %agent_id,
                    response_time,
                    "playground run completed"
                );
                state
                    .emit(
                        DashboardEvent::new(
                            EventKind::PlaygroundCompleted,
                            NotificationLevel::Success,
                            "Test completed",
                        )
                        .with_body(format!("Response received in {response_time:.2}s"))
                        .for_agent(agent_id)
                        .with_meta("run_id", serde_json::json!(run_id)),
                    )
                    .await;
            }
        }
    });

    RunHandle {
        run_id,
        agent_id,
        cancel,
        task,
    }
}

async fn ensure_agent(state: &AppState, agent_id: &str) -> Result<(), AppError> {
    if state.agents.read().await.get(agent_id).is_none() {
        return Err(AppError::NotFound(format!("agent {agent_id} not found")));
    }
    Ok(())
}

/// Run `f` on the agent's session, creating it on first use.
async fn with_session<R>(
    state: &AppState,
    agent_id: &str,
    f: impl FnOnce(&mut PlaygroundSession) -> R,
) -> Result<R, AppError> {
    ensure_agent(state, agent_id).await?;
    let mut sessions = state.playgrounds.write().await;
    let session = sessions.entry(agent_id.to_string()).or_insert_with(|| {
        PlaygroundSession::new(
            agent_id,
            state.config.playground.default_model.clone(),
            state.config.playground.history_limit,
        )
    });
    Ok(f(session))
}

/// GET /api/v1/agents/{id}/playground
pub async fn get_playground(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Json<PlaygroundView>, AppError> {
    let view = with_session(&state, &agent_id, |s| s.snapshot()).await?;
    Ok(Json(view))
}

/// PUT /api/v1/agents/{id}/playground: edit prompts, model or variables.
pub async fn edit_playground(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    Json(edit): Json<PlaygroundEdit>,
) -> Result<Json<PlaygroundView>, AppError> {
    let view = with_session(&state, &agent_id, |s| {
        s.edit(edit);
        s.snapshot()
    })
    .await?;
    Ok(Json(view))
}

/// POST /api/v1/agents/{id}/playground/runs: start a simulated run.
pub async fn start_run(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<(StatusCode, Json<PendingRun>), AppError> {
    let run = with_session(&state, &agent_id, |s| {
        if s.rendered_prompt().trim().is_empty() {
            None
        } else {
            Some(s.begin_run())
        }
    })
    .await?
    .ok_or_else(|| AppError::BadRequest("user prompt is empty".to_string()))?;

    // Hold the registry lock across the spawn so the task cannot finish and
    // deregister before the handle is stored.
    let mut runs = state.runs.write().await;
    runs.retain(|_, handle| !handle.is_finished());
    let handle = spawn_simulated_run(state.clone(), agent_id.clone(), run.clone());
    runs.insert(run.id, handle);
    tracing::info!(run_id = %run.id, agent_id = %agent_id, "playground run started");

    Ok((StatusCode::ACCEPTED, Json(run)))
}

/// DELETE /api/v1/agents/{id}/playground/runs/{run_id}: cancel a run.
pub async fn cancel_run(
    State(state): State<AppState>,
    Path((agent_id, run_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    ensure_agent(&state, &agent_id).await?;

    if let Some(handle) = state.runs.write().await.remove(&run_id) {
        handle.cancel();
    }
    let was_in_flight = {
        let mut sessions = state.playgrounds.write().await;
        sessions
            .get_mut(&agent_id)
            .is_some_and(|s| s.cancel_run(run_id))
    };
    if !was_in_flight {
        return Err(AppError::NotFound(format!("run {run_id} is not in flight")));
    }

    state
        .emit(
            DashboardEvent::new(
                EventKind::PlaygroundCancelled,
                NotificationLevel::Info,
                "Test cancelled",
            )
            .for_agent(agent_id),
        )
        .await;
    Ok(StatusCode::NO_CONTENT)
}
