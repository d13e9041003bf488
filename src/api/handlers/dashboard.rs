//! Dashboard handlers: statistics, system status, scheduler control.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ActivitiesResponse, ControlResponse};
use crate::app_state::AppState;
use crate::domain::{DashboardStats, SystemStatus};

/// `GET /dashboard/stats` — Headline dashboard statistics.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    summary = "Dashboard statistics",
    description = "Returns aggregate counters over properties, posting history, and engagement tracking.",
    responses(
        (status = 200, description = "Current statistics", body = DashboardStats),
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.service.stats().await)
}

/// `GET /dashboard/system-status` — Scheduler and runtime status.
#[utoipa::path(
    get,
    path = "/api/dashboard/system-status",
    tag = "Dashboard",
    summary = "System status",
    description = "Returns the scheduler state, last/next execution times, active workflows, and uptime.",
    responses(
        (status = 200, description = "Current system status", body = SystemStatus),
    )
)]
pub async fn get_system_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.service.system_status().await)
}

/// `POST /dashboard/start` — Start the posting scheduler.
#[utoipa::path(
    post,
    path = "/api/dashboard/start",
    tag = "Dashboard",
    summary = "Start the scheduler",
    description = "Starts the posting scheduler. Idempotent: starting an already-running scheduler succeeds without effect.",
    responses(
        (status = 200, description = "Scheduler state after the call", body = ControlResponse),
    )
)]
pub async fn start_system(State(state): State<AppState>) -> impl IntoResponse {
    state.service.start().await;
    Json(ControlResponse {
        success: true,
        is_running: true,
        message: "posting scheduler started".to_string(),
    })
}

/// `POST /dashboard/stop` — Stop the posting scheduler.
#[utoipa::path(
    post,
    path = "/api/dashboard/stop",
    tag = "Dashboard",
    summary = "Stop the scheduler",
    description = "Stops the posting scheduler. Idempotent: stopping an already-stopped scheduler succeeds without effect.",
    responses(
        (status = 200, description = "Scheduler state after the call", body = ControlResponse),
    )
)]
pub async fn stop_system(State(state): State<AppState>) -> impl IntoResponse {
    state.service.stop().await;
    Json(ControlResponse {
        success: true,
        is_running: false,
        message: "posting scheduler stopped".to_string(),
    })
}

/// `GET /dashboard/recent-activities` — Merged recent-activity feed.
#[utoipa::path(
    get,
    path = "/api/dashboard/recent-activities",
    tag = "Dashboard",
    summary = "Recent activities",
    description = "Returns the merged posting and property-ingestion feed, newest first, capped at 20 entries.",
    responses(
        (status = 200, description = "Recent activities", body = ActivitiesResponse),
    )
)]
pub async fn get_recent_activities(State(state): State<AppState>) -> impl IntoResponse {
    Json(ActivitiesResponse {
        activities: state.service.recent_activities().await,
    })
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(get_stats))
        .route("/dashboard/system-status", get(get_system_status))
        .route("/dashboard/start", post(start_system))
        .route("/dashboard/stop", post(stop_system))
        .route("/dashboard/recent-activities", get(get_recent_activities))
}
