//! DTOs for the dashboard endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::Activity;

/// Response for `GET /api/dashboard/recent-activities`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivitiesResponse {
    /// Merged activity feed, newest first, capped at 20 entries.
    pub activities: Vec<Activity>,
}

/// Response for the scheduler start/stop endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ControlResponse {
    /// Whether the state change was applied.
    pub success: bool,
    /// Whether the scheduler is running after the call.
    pub is_running: bool,
    /// Human-readable result description.
    pub message: String,
}
