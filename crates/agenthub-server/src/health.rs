use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub agents: usize,
    pub sse_subscribers: usize,
    pub runs_in_flight: usize,
    pub stored_events: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let agents = state.agents.read().await.len();
    let runs_in_flight = state
        .runs
        .read()
        .await
        .values()
        .filter(|h| !h.is_finished())
        .count();
    let stored_events = state.event_store.read().await.stats().total_stored;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        agents,
        sse_subscribers: state.sse_subscriber_count.load(Ordering::Relaxed),
        runs_in_flight,
        stored_events,
    })
}

/// GET /ready: the agent collection is loaded.
pub async fn readiness_check(State(state): State<AppState>) -> &'static str {
    if state.agents.read().await.is_empty() {
        return "not ready: no agents loaded";
    }
    "ready"
}
