use axum::extract::{Path, State};
use axum::response::Json;

use agenthub_core::events::{DashboardEvent, EventKind};
use agenthub_core::notification::NotificationLevel;
use agenthub_core::onboarding::{TourAdvance, TourView};

use crate::state::AppState;

/// GET /api/v1/onboarding
pub async fn get_tour(State(state): State<AppState>) -> Json<TourView> {
    let onboarding = state.onboarding.read().await;
    Json(onboarding.tour.snapshot(&*onboarding.flags))
}

/// POST /api/v1/onboarding/next: next page, finishing on the last one.
pub async fn next_page(State(state): State<AppState>) -> Json<TourView> {
    let (view, finished) = {
        let mut guard = state.onboarding.write().await;
        let onboarding = &mut *guard;
        let finished = match onboarding.tour.next() {
            TourAdvance::Moved(_) => false,
            TourAdvance::Finished => {
                onboarding.tour.finish(&mut *onboarding.flags);
                true
            },
        };
        (onboarding.tour.snapshot(&*onboarding.flags), finished)
    };
    if finished {
        state
            .emit(DashboardEvent::new(
                EventKind::OnboardingCompleted,
                NotificationLevel::Success,
                "Tutorial completed",
            ))
            .await;
    }
    Json(view)
}

/// POST /api/v1/onboarding/prev
pub async fn prev_page(State(state): State<AppState>) -> Json<TourView> {
    let mut guard = state.onboarding.write().await;
    guard.tour.prev();
    Json(guard.tour.snapshot(&*guard.flags))
}

/// POST /api/v1/onboarding/steps/{n}
pub async fn go_to_page(State(state): State<AppState>, Path(index): Path<usize>) -> Json<TourView> {
    let mut guard = state.onboarding.write().await;
    guard.tour.go_to(index);
    Json(guard.tour.snapshot(&*guard.flags))
}

/// POST /api/v1/onboarding/skip
pub async fn skip(State(state): State<AppState>) -> Json<TourView> {
    let mut guard = state.onboarding.write().await;
    let onboarding = &mut *guard;
    onboarding.tour.skip(&mut *onboarding.flags);
    Json(onboarding.tour.snapshot(&*onboarding.flags))
}
