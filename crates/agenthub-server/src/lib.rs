pub mod api;
pub mod config;
pub mod error;
pub mod event_store;
pub mod flag_store;
pub mod health;
pub mod incidents;
pub mod onboarding;
pub mod playground;
pub mod sse;
pub mod state;
pub mod wizard;

use std::time::Duration;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let state = AppState::new(config);
    let app = router(state.clone());
    (app, state)
}

/// Router over an already constructed state.
pub fn router(state: AppState) -> Router<()> {
    let web_root = state.config.web_root.clone();
    let timeout = Duration::from_secs(state.config.limits.request_timeout_secs);

    let api_routes = Router::new()
        .route("/agents", get(api::list_agents))
        .route("/agents/{id}", get(api::get_agent))
        .route("/agents/{id}/start", post(api::start_agent))
        .route("/agents/{id}/stop", post(api::stop_agent))
        .route(
            "/agents/{id}/playground",
            get(playground::get_playground).put(playground::edit_playground),
        )
        .route("/agents/{id}/playground/runs", post(playground::start_run))
        .route(
            "/agents/{id}/playground/runs/{run_id}",
            axum::routing::delete(playground::cancel_run),
        )
        .route("/metrics", get(api::get_metrics))
        .route("/costs", get(api::get_costs))
        .route("/wizard", get(wizard::get_wizard))
        .route("/wizard/next", post(wizard::next_step))
        .route("/wizard/prev", post(wizard::prev_step))
        .route("/wizard/reset", post(wizard::reset))
        .route("/wizard/steps/{n}", post(wizard::go_to_step))
        .route("/wizard/mode", post(wizard::set_mode))
        .route("/wizard/agents", post(wizard::add_agent))
        .route(
            "/wizard/agents/{index}",
            axum::routing::patch(wizard::update_agent).delete(wizard::remove_agent),
        )
        .route("/wizard/orchestration", put(wizard::set_orchestration))
        .route("/incidents", get(incidents::get_incidents))
        .route("/incidents/settings", put(incidents::update_settings))
        .route(
            "/incidents/rollback/{version}",
            post(incidents::start_rollback),
        )
        .route("/incidents/{id}/rca", post(incidents::request_rca))
        .route(
            "/notifications",
            get(api::get_notifications).delete(api::clear_notifications),
        )
        .route(
            "/notifications/{id}/dismiss",
            post(api::dismiss_notification),
        )
        .route("/onboarding", get(onboarding::get_tour))
        .route("/onboarding/next", post(onboarding::next_page))
        .route("/onboarding/prev", post(onboarding::prev_page))
        .route("/onboarding/skip", post(onboarding::skip))
        .route("/onboarding/steps/{n}", post(onboarding::go_to_page))
        .route("/events", get(api::recent_events))
        .layer(TimeoutLayer::new(timeout))
        // The SSE stream is long-lived and stays outside the timeout.
        .route("/events/stream", get(sse::event_stream));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api/v1", api_routes)
        .fallback_service(ServeDir::new(&web_root))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
