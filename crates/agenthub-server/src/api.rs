use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use agenthub_core::agent::{Agent, AgentStatus, StatusChange};
use agenthub_core::cost::{CostFilter, CostSummary, CostView};
use agenthub_core::events::{DashboardEvent, EventKind};
use agenthub_core::metrics::DashboardMetrics;
use agenthub_core::notification::{NotificationLevel, NotificationView};
use agenthub_core::view_model::{AgentListView, SortKey};

use crate::error::AppError;
use crate::event_store::EventStoreStats;
use crate::state::AppState;

/// Query string of the agent list.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AgentListQuery {
    pub q: String,
    pub sort: Option<String>,
}

/// GET /api/v1/agents: filtered and sorted agent list (`q`, `sort`).
pub async fn list_agents(
    State(state): State<AppState>,
    Query(query): Query<AgentListQuery>,
) -> Result<Json<AgentListView>, AppError> {
    let sort = match query.sort.as_deref() {
        Some(s) if !s.is_empty() => s.parse::<SortKey>()?,
        _ => SortKey::default(),
    };
    let agents = state.agents.read().await;
    Ok(Json(AgentListView::build(agents.agents(), &query.q, sort)))
}

/// GET /api/v1/agents/{id}
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Agent>, AppError> {
    let agents = state.agents.read().await;
    agents
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("agent {id} not found")))
}

async fn announce_status_change(state: &AppState, change: &StatusChange) {
    let (kind, title, verb) = match change.to {
        AgentStatus::Active => (EventKind::AgentStarted, "Agent started", "started"),
        _ => (EventKind::AgentStopped, "Agent stopped", "stopped"),
    };
    state
        .emit(
            DashboardEvent::new(kind, NotificationLevel::Success, title)
                .with_body(format!("{} has been {verb}", change.agent_name))
                .for_agent(change.agent_id.clone())
                .with_meta("from", serde_json::json!(change.from))
                .with_meta("to", serde_json::json!(change.to)),
        )
        .await;
}

/// POST /api/v1/agents/{id}/start
pub async fn start_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusChange>, AppError> {
    let change = state.agents.write().await.start(&id)?;
    announce_status_change(&state, &change).await;
    Ok(Json(change))
}

/// POST /api/v1/agents/{id}/stop
pub async fn stop_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusChange>, AppError> {
    let change = state.agents.write().await.stop(&id)?;
    announce_status_change(&state, &change).await;
    Ok(Json(change))
}

/// GET /api/v1/metrics
pub async fn get_metrics(State(state): State<AppState>) -> Json<DashboardMetrics> {
    let agents = state.agents.read().await;
    Json(DashboardMetrics::compute(agents.agents()))
}

/// Query string of the cost table. Blank values and "all" mean no filter.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CostQuery {
    pub search: String,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub status: Option<String>,
}

fn parse_choice<T: std::str::FromStr<Err = String>>(
    value: Option<&str>,
) -> Result<Option<T>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse::<T>().map(Some).map_err(AppError::BadRequest),
    }
}

/// GET /api/v1/costs?search=&type=&status=
pub async fn get_costs(
    State(state): State<AppState>,
    Query(query): Query<CostQuery>,
) -> Result<Json<CostView>, AppError> {
    let filter = CostFilter {
        search: query.search,
        entity_type: parse_choice(query.entity_type.as_deref())?,
        status: parse_choice(query.status.as_deref())?,
    };
    Ok(Json(CostView {
        summary: CostSummary::compute(&state.costs, state.config.costs.monthly_budget),
        entries: filter.apply(&state.costs),
    }))
}

/// GET /api/v1/notifications
pub async fn get_notifications(State(state): State<AppState>) -> Json<NotificationView> {
    Json(state.notifications.read().await.snapshot())
}

/// POST /api/v1/notifications/{id}/dismiss
pub async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NotificationView>, AppError> {
    let mut queue = state.notifications.write().await;
    if !queue.dismiss(&id) {
        return Err(AppError::NotFound(format!("notification {id} not found")));
    }
    Ok(Json(queue.snapshot()))
}

/// DELETE /api/v1/notifications
pub async fn clear_notifications(State(state): State<AppState>) -> StatusCode {
    state.notifications.write().await.clear();
    StatusCode::NO_CONTENT
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecentEventsResponse {
    pub stats: EventStoreStats,
    pub events: Vec<DashboardEvent>,
}

/// GET /api/v1/events: recent dashboard events, newest first.
pub async fn recent_events(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<RecentEventsResponse> {
    let limit = query
        .limit
        .unwrap_or(20)
        .min(state.config.limits.max_stored_events);
    let store = state.event_store.read().await;
    Json(RecentEventsResponse {
        stats: store.stats(),
        events: store.recent(limit).into_iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenthub_core::cost::{CostStatus, EntityType};

    #[test]
    fn choice_parsing() {
        assert_eq!(parse_choice::<EntityType>(None).unwrap(), None);
        assert_eq!(parse_choice::<EntityType>(Some("All")).unwrap(), None);
        assert_eq!(parse_choice::<EntityType>(Some(" ")).unwrap(), None);
        assert_eq!(
            parse_choice::<EntityType>(Some("tool")).unwrap(),
            Some(EntityType::Tool)
        );
        assert_eq!(
            parse_choice::<CostStatus>(Some("inactive")).unwrap(),
            Some(CostStatus::Inactive)
        );
        assert!(matches!(
            parse_choice::<CostStatus>(Some("paused")),
            Err(AppError::BadRequest(_))
        ));
    }
}
