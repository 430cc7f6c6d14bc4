use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use futures::stream::Stream;
use serde::Deserialize;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use agenthub_core::events::DashboardEvent;

use crate::state::{AppState, ConnectionGuard};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StreamQuery {
    /// Only forward events about this agent.
    pub agent: Option<String>,
}

fn to_sse(event: &DashboardEvent) -> SseEvent {
    let json = serde_json::to_string(event).unwrap_or_default();
    SseEvent::default()
        .event("dashboard")
        .data(json)
        .id(event.id.clone())
}

/// GET /api/v1/events/stream: live dashboard events.
///
/// A reconnecting client that sends `Last-Event-ID` first receives the stored
/// events it missed.
pub async fn event_stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>, StatusCode> {
    let max_sse = state.config.limits.max_sse_subscribers;
    let current = state.sse_subscriber_count.load(Ordering::Relaxed);
    if current >= max_sse {
        tracing::warn!(current, max = max_sse, "SSE subscriber limit reached");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let guard = ConnectionGuard::new(Arc::clone(&state.sse_subscriber_count));

    // Replay and subscribe under one lock so nothing slips in between.
    let (missed, rx) = {
        let store = state.event_store.read().await;
        let missed = headers
            .get("last-event-id")
            .and_then(|v| v.to_str().ok())
            .map(|id| store.since(id))
            .unwrap_or_default();
        (missed, store.subscribe())
    };
    if !missed.is_empty() {
        tracing::debug!(count = missed.len(), "replaying missed events");
    }

    let agent = query.agent;
    let wanted = move |event: &DashboardEvent| {
        agent
            .as_deref()
            .is_none_or(|a| event.agent_id.as_deref() == Some(a))
    };
    let wanted_live = wanted.clone();

    let replay = tokio_stream::iter(
        missed
            .into_iter()
            .filter(wanted)
            .map(|event| Ok::<_, Infallible>(to_sse(&event))),
    );
    let live = BroadcastStream::new(rx).filter_map(move |result: Result<DashboardEvent, _>| {
        let _guard = &guard;
        match result {
            Ok(event) if wanted_live(&event) => Some(Ok(to_sse(&event))),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("SSE broadcast receive error: {e}");
                None
            },
        }
    });

    Ok(Sse::new(replay.chain(live)).keep_alive(KeepAlive::default()))
}
