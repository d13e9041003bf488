//! DTOs for the notification endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Notification;

/// Query parameters for `GET /api/notifications`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NotificationQuery {
    /// Maximum notifications to return. Defaults to 50.
    pub limit: Option<usize>,
}

/// Response for `GET /api/notifications`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    /// Retained notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Total retained notifications.
    pub total: u32,
    /// Retained notifications still unread.
    pub unread_count: u32,
}

/// Notification counts per severity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct KindCounts {
    /// Success notifications.
    pub success: u32,
    /// Error notifications.
    pub error: u32,
    /// Warning notifications.
    pub warning: u32,
    /// Informational notifications.
    pub info: u32,
}

/// Response for `GET /api/notifications/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStatsResponse {
    /// Total retained notifications.
    pub total: u32,
    /// Retained notifications still unread.
    pub unread_count: u32,
    /// Counts per severity over the retained list.
    pub by_kind: KindCounts,
    /// Posting attempts in the last 24 hours, keyed by platform name.
    pub posts_last_24h: HashMap<String, u32>,
}
