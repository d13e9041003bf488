//! DTOs for the analytics endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the analytics aggregation endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AnalyticsQuery {
    /// Lookback window in days. Defaults to the configured window.
    pub days: Option<i64>,
}

/// Query parameters for `GET /api/analytics/export`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// Export format: `"json"` or `"csv"`. Defaults to `"json"`.
    pub format: Option<String>,
    /// Lookback window in days. Defaults to the configured window.
    pub days: Option<i64>,
}

/// Per-platform posting counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformBreakdown {
    /// Posting attempts in the window.
    pub posts: u32,
    /// Successful attempts.
    pub successful: u32,
    /// Failed attempts.
    pub failed: u32,
    /// Success percentage over `posts`.
    pub success_rate: f64,
}

/// Response for `GET /api/analytics/overview`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    /// Lookback window applied, in days.
    pub period_days: i64,
    /// Total posting attempts in the window.
    pub total_posts: u32,
    /// Successful attempts.
    pub successful_posts: u32,
    /// Failed attempts.
    pub failed_posts: u32,
    /// Success percentage over all attempts.
    pub success_rate: f64,
    /// Tracked link clicks across all properties.
    pub total_clicks: u64,
    /// Tracked conversions across all properties.
    pub total_conversions: u64,
    /// Conversion percentage over clicks.
    pub conversion_rate: f64,
    /// Counters keyed by platform name.
    pub platform_breakdown: HashMap<String, PlatformBreakdown>,
}

/// Per-platform performance entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPerformance {
    /// Platform name.
    pub platform: String,
    /// Posting attempts in the window.
    pub posts: u32,
    /// Success percentage.
    pub success_rate: f64,
    /// Average attempts per week over the window.
    pub avg_posts_per_week: f64,
}

/// Response for `GET /api/analytics/performance`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    /// Lookback window applied, in days.
    pub period_days: i64,
    /// Per-platform entries, most posts first.
    pub platforms: Vec<PlatformPerformance>,
    /// Platform with the highest success rate, if any posts exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_platform: Option<String>,
}

/// One ISO-week bucket of the posting trend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrend {
    /// ISO week label, e.g. `"2026-W34"`.
    pub week: String,
    /// Posting attempts in that week.
    pub posts: u32,
    /// Successful attempts in that week.
    pub successful: u32,
}

/// Response for `GET /api/analytics/trends`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    /// Lookback window applied, in days.
    pub period_days: i64,
    /// Weekly buckets, oldest first.
    pub weekly: Vec<WeeklyTrend>,
    /// Post-count growth of the latest week over the previous one,
    /// as a percentage. Absent with fewer than two weeks of data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<f64>,
}
