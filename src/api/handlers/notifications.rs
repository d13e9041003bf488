//! Notification handlers: listing, read-state, statistics.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    KindCounts, MessageResponse, NotificationListResponse, NotificationQuery,
    NotificationStatsResponse,
};
use crate::app_state::AppState;
use crate::domain::{NotificationId, NotificationKind};
use crate::error::{ErrorResponse, GatewayError};

/// Default number of notifications returned by the list endpoint.
const DEFAULT_LIMIT: usize = 50;

/// `GET /notifications` — Recent notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    summary = "List notifications",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Recent notifications", body = NotificationListResponse),
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> impl IntoResponse {
    let store = state.service.notifications();
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    Json(NotificationListResponse {
        notifications: store.list(limit).await,
        total: store.len().await as u32,
        unread_count: store.unread_count().await as u32,
    })
}

/// `POST /notifications/:id/read` — Mark one notification as read.
///
/// # Errors
///
/// Returns [`GatewayError::NotificationNotFound`] if the ID is unknown.
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    summary = "Mark a notification as read",
    params(
        ("id" = uuid::Uuid, Path, description = "Notification UUID"),
    ),
    responses(
        (status = 200, description = "Notification marked read", body = MessageResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse),
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> Result<impl IntoResponse, GatewayError> {
    state.service.notifications().mark_read(id).await?;
    Ok(Json(MessageResponse::ok("notification marked as read")))
}

/// `POST /notifications/mark-all-read` — Mark every notification as read.
#[utoipa::path(
    post,
    path = "/api/notifications/mark-all-read",
    tag = "Notifications",
    summary = "Mark all notifications as read",
    responses(
        (status = 200, description = "All notifications marked read", body = MessageResponse),
    )
)]
pub async fn mark_all_read(State(state): State<AppState>) -> impl IntoResponse {
    let changed = state.service.notifications().mark_all_read().await;
    Json(MessageResponse::ok(format!(
        "{changed} notifications marked as read"
    )))
}

/// `GET /notifications/stats` — Notification and 24h posting counters.
#[utoipa::path(
    get,
    path = "/api/notifications/stats",
    tag = "Notifications",
    summary = "Notification statistics",
    description = "Returns totals and per-severity counts over retained notifications plus posting attempts per platform in the last 24 hours.",
    responses(
        (status = 200, description = "Notification statistics", body = NotificationStatsResponse),
    )
)]
pub async fn notification_stats(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.service.notifications();
    let retained = store.list(usize::MAX).await;

    let mut by_kind = KindCounts::default();
    for notification in &retained {
        match notification.kind {
            NotificationKind::Success => by_kind.success += 1,
            NotificationKind::Error => by_kind.error += 1,
            NotificationKind::Warning => by_kind.warning += 1,
            NotificationKind::Info => by_kind.info += 1,
        }
    }

    let mut posts_last_24h: HashMap<String, u32> = HashMap::new();
    for record in state.service.posting_log().recent(1).await {
        *posts_last_24h.entry(record.platform.to_string()).or_default() += 1;
    }

    Json(NotificationStatsResponse {
        total: retained.len() as u32,
        unread_count: retained.iter().filter(|n| !n.read).count() as u32,
        by_kind,
        posts_last_24h,
    })
}

/// Notification routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", post(mark_read))
        .route("/notifications/mark-all-read", post(mark_all_read))
        .route("/notifications/stats", get(notification_stats))
}
