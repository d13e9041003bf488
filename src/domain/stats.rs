//! Computed dashboard aggregates.
//!
//! Field names serialize in camelCase — the wire shape the dashboard
//! frontend consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Headline statistics for the dashboard overview page.
///
/// Also the payload of the `system_update` push event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// All listings known to the system.
    pub total_properties: u32,
    /// Listings participating in posting runs.
    pub active_properties: u32,
    /// Posting attempts in the analytics window.
    pub total_posts: u32,
    /// Successful attempts.
    pub successful_posts: u32,
    /// Failed attempts.
    pub failed_posts: u32,
    /// Tracked link clicks across all properties.
    pub total_clicks: u64,
    /// Tracked conversions across all properties.
    pub total_conversions: u64,
    /// Conversions per click, percent.
    pub conversion_rate: f64,
    /// Failed attempts, surfaced separately for the error widget.
    pub error_count: u32,
    /// Successful attempts per attempt, percent.
    pub success_rate: f64,
}

/// Scheduler/runtime status for the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    /// Whether the posting scheduler is running.
    pub is_running: bool,
    /// When the last posting run completed.
    pub last_execution: Option<DateTime<Utc>>,
    /// When the next posting run is due.
    pub next_execution: Option<DateTime<Utc>>,
    /// Names of the workflows the scheduler drives.
    pub active_workflows: Vec<String>,
    /// Failed attempts in the analytics window.
    pub error_count: u32,
    /// Human-readable uptime string.
    pub uptime: String,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialize_camel_case() {
        let stats = DashboardStats {
            total_properties: 3,
            success_rate: 50.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats);
        let Ok(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("totalProperties"));
        assert!(json.contains("successRate"));
        assert!(!json.contains("total_properties"));
    }

    #[test]
    fn status_round_trips() {
        let status = SystemStatus {
            is_running: true,
            last_execution: Some(Utc::now()),
            next_execution: None,
            active_workflows: vec!["social_posting".to_string()],
            error_count: 0,
            uptime: "2h 5m".to_string(),
        };
        let json = serde_json::to_string(&status).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        let back: Option<SystemStatus> = serde_json::from_str(&json).ok();
        assert_eq!(back.map(|s| s.is_running), Some(true));
    }
}
