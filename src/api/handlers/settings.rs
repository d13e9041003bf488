//! Settings handlers: dashboard settings, API keys, diagnostics.

use std::collections::HashMap;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ApiKeysResponse, ApiKeysUpdateResponse, MessageResponse, SystemInfoResponse,
    TestConnectionRequest, TestConnectionResponse,
};
use crate::app_state::AppState;
use crate::domain::DashboardSettings;
use crate::domain::settings::KNOWN_SERVICES;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /settings` — Current settings document.
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    summary = "Get settings",
    responses(
        (status = 200, description = "Current settings", body = DashboardSettings),
    )
)]
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.settings.get().await)
}

/// `POST /settings` — Replace the settings document.
#[utoipa::path(
    post,
    path = "/api/settings",
    tag = "Settings",
    summary = "Update settings",
    request_body = DashboardSettings,
    responses(
        (status = 200, description = "Settings replaced", body = MessageResponse),
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<DashboardSettings>,
) -> impl IntoResponse {
    state.settings.update(settings).await;
    tracing::info!("dashboard settings updated");
    Json(MessageResponse::ok("settings updated"))
}

/// `GET /settings/api-keys` — Stored credentials, masked.
#[utoipa::path(
    get,
    path = "/api/settings/api-keys",
    tag = "Settings",
    summary = "List API keys",
    description = "Returns stored credential names with masked values. Plaintext values are never readable through the API.",
    responses(
        (status = 200, description = "Masked credentials", body = ApiKeysResponse),
    )
)]
pub async fn get_api_keys(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiKeysResponse {
        keys: state.settings.masked_api_keys().await,
    })
}

/// `POST /settings/api-keys` — Store credentials.
#[utoipa::path(
    post,
    path = "/api/settings/api-keys",
    tag = "Settings",
    summary = "Update API keys",
    responses(
        (status = 200, description = "Credentials stored", body = ApiKeysUpdateResponse),
    )
)]
pub async fn update_api_keys(
    State(state): State<AppState>,
    Json(keys): Json<HashMap<String, String>>,
) -> impl IntoResponse {
    let updated = state.settings.update_api_keys(keys).await;
    tracing::info!(count = updated.len(), "api keys updated");
    Json(ApiKeysUpdateResponse {
        success: true,
        updated,
    })
}

/// `POST /settings/test-connection` — Check whether a service credential exists.
///
/// # Errors
///
/// Returns [`GatewayError::UnknownService`] for services the gateway does
/// not integrate with.
#[utoipa::path(
    post,
    path = "/api/settings/test-connection",
    tag = "Settings",
    summary = "Test a service connection",
    request_body = TestConnectionRequest,
    responses(
        (status = 200, description = "Connection check result", body = TestConnectionResponse),
        (status = 400, description = "Unknown service", body = ErrorResponse),
    )
)]
pub async fn test_connection(
    State(state): State<AppState>,
    Json(request): Json<TestConnectionRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    if !KNOWN_SERVICES.contains(&request.service.as_str()) {
        return Err(GatewayError::UnknownService(request.service));
    }

    let connected = state
        .settings
        .masked_api_keys()
        .await
        .contains_key(&request.service);
    let message = if connected {
        format!("{} credential is configured", request.service)
    } else {
        format!("no credential stored for {}", request.service)
    };

    Ok(Json(TestConnectionResponse {
        service: request.service,
        connected,
        message,
    }))
}

/// `GET /settings/system-info` — Runtime diagnostics.
#[utoipa::path(
    get,
    path = "/api/settings/system-info",
    tag = "Settings",
    summary = "System information",
    responses(
        (status = 200, description = "Runtime diagnostics", body = SystemInfoResponse),
    )
)]
pub async fn system_info(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.service.system_status().await;
    Json(SystemInfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at,
        uptime: status.uptime,
        properties_count: state.service.properties().len().await as u32,
        notifications_count: state.service.notifications().len().await as u32,
        websocket_clients: state.event_bus.receiver_count() as u32,
    })
}

/// Settings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_settings).post(update_settings))
        .route("/settings/api-keys", get(get_api_keys).post(update_api_keys))
        .route("/settings/test-connection", post(test_connection))
        .route("/settings/system-info", get(system_info))
}
