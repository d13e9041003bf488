//! DTOs for the settings endpoints.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for `POST /api/settings/api-keys`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiKeysUpdateResponse {
    /// Whether the keys were stored.
    pub success: bool,
    /// Key names that were updated, sorted.
    pub updated: Vec<String>,
}

/// Response for `GET /api/settings/api-keys`. Values are always masked.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiKeysResponse {
    /// Stored key names with masked values (`abc***...`).
    pub keys: HashMap<String, String>,
}

/// Request body for `POST /api/settings/test-connection`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestConnectionRequest {
    /// Service to test, e.g. `"openai"` or `"instagram"`.
    pub service: String,
}

/// Response for `POST /api/settings/test-connection`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestConnectionResponse {
    /// Service that was tested.
    pub service: String,
    /// Whether a credential is stored for the service.
    pub connected: bool,
    /// Human-readable result description.
    pub message: String,
}

/// Response for `GET /api/settings/system-info`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfoResponse {
    /// Gateway crate version.
    pub version: String,
    /// Process start time.
    pub started_at: DateTime<Utc>,
    /// Human-readable uptime.
    pub uptime: String,
    /// Listings currently stored.
    pub properties_count: u32,
    /// Notifications currently retained.
    pub notifications_count: u32,
    /// Connected WebSocket clients.
    pub websocket_clients: u32,
}
