//! Analytics handlers: posting aggregations over the in-memory log.

use std::collections::{BTreeMap, HashMap};

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Datelike;

use crate::api::dto::{
    AnalyticsQuery, ExportQuery, OverviewResponse, PerformanceResponse, PlatformBreakdown,
    PlatformPerformance, TrendsResponse, WeeklyTrend,
};
use crate::app_state::AppState;
use crate::domain::{PostStatus, PostingRecord};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /analytics/overview` — Posting and engagement totals.
#[utoipa::path(
    get,
    path = "/api/analytics/overview",
    tag = "Analytics",
    summary = "Analytics overview",
    description = "Returns posting totals, success rates, engagement counters, and a per-platform breakdown over the lookback window.",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Aggregated overview", body = OverviewResponse),
    )
)]
pub async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> impl IntoResponse {
    let days = window_days(&state, query.days);
    let window = state.service.posting_log().recent(days).await;

    let total_posts = window.len() as u32;
    let successful_posts = count_status(&window, PostStatus::Success);
    let failed_posts = count_status(&window, PostStatus::Failed);

    let mut platform_breakdown: HashMap<String, PlatformBreakdown> = HashMap::new();
    for record in &window {
        let entry = platform_breakdown
            .entry(record.platform.to_string())
            .or_default();
        entry.posts += 1;
        match record.status {
            PostStatus::Success => entry.successful += 1,
            PostStatus::Failed => entry.failed += 1,
            PostStatus::Pending => {}
        }
    }
    for entry in platform_breakdown.values_mut() {
        entry.success_rate = percentage(entry.successful, entry.posts);
    }

    let engagement = state.service.engagement().totals().await;
    let conversion_rate = if engagement.clicks > 0 {
        engagement.conversions as f64 / engagement.clicks as f64 * 100.0
    } else {
        0.0
    };

    Json(OverviewResponse {
        period_days: days,
        total_posts,
        successful_posts,
        failed_posts,
        success_rate: percentage(successful_posts, total_posts),
        total_clicks: engagement.clicks,
        total_conversions: engagement.conversions,
        conversion_rate,
        platform_breakdown,
    })
}

/// `GET /analytics/performance` — Per-platform performance ranking.
#[utoipa::path(
    get,
    path = "/api/analytics/performance",
    tag = "Analytics",
    summary = "Platform performance",
    description = "Ranks platforms by posting volume and identifies the one with the highest success rate.",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Per-platform performance", body = PerformanceResponse),
    )
)]
pub async fn get_performance(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> impl IntoResponse {
    let days = window_days(&state, query.days);
    let window = state.service.posting_log().recent(days).await;
    let weeks = (days as f64 / 7.0).max(1.0);

    let mut per_platform: HashMap<String, (u32, u32)> = HashMap::new();
    for record in &window {
        let entry = per_platform.entry(record.platform.to_string()).or_default();
        entry.0 += 1;
        if record.status == PostStatus::Success {
            entry.1 += 1;
        }
    }

    let mut platforms: Vec<PlatformPerformance> = per_platform
        .into_iter()
        .map(|(platform, (posts, successful))| PlatformPerformance {
            platform,
            posts,
            success_rate: percentage(successful, posts),
            avg_posts_per_week: f64::from(posts) / weeks,
        })
        .collect();
    platforms.sort_by(|a, b| b.posts.cmp(&a.posts).then(a.platform.cmp(&b.platform)));

    let best_platform = platforms
        .iter()
        .max_by(|a, b| a.success_rate.total_cmp(&b.success_rate))
        .map(|p| p.platform.clone());

    Json(PerformanceResponse {
        period_days: days,
        platforms,
        best_platform,
    })
}

/// `GET /analytics/trends` — Weekly posting trend with growth rate.
#[utoipa::path(
    get,
    path = "/api/analytics/trends",
    tag = "Analytics",
    summary = "Posting trends",
    description = "Buckets posting attempts by ISO week and reports the week-over-week growth of the latest week.",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Weekly trend", body = TrendsResponse),
    )
)]
pub async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> impl IntoResponse {
    let days = window_days(&state, query.days);
    let window = state.service.posting_log().recent(days).await;

    // BTreeMap keeps the "YYYY-Www" labels in chronological order.
    let mut buckets: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for record in &window {
        let week = record.posted_at.iso_week();
        let label = format!("{}-W{:02}", week.year(), week.week());
        let entry = buckets.entry(label).or_default();
        entry.0 += 1;
        if record.status == PostStatus::Success {
            entry.1 += 1;
        }
    }

    let weekly: Vec<WeeklyTrend> = buckets
        .into_iter()
        .map(|(week, (posts, successful))| WeeklyTrend {
            week,
            posts,
            successful,
        })
        .collect();

    let growth_rate = match weekly.as_slice() {
        [.., previous, latest] if previous.posts > 0 => Some(
            (f64::from(latest.posts) - f64::from(previous.posts)) / f64::from(previous.posts)
                * 100.0,
        ),
        _ => None,
    };

    Json(TrendsResponse {
        period_days: days,
        weekly,
        growth_rate,
    })
}

/// `GET /analytics/export` — Export the posting log as JSON or CSV.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidExportFormat`] for unknown formats.
#[utoipa::path(
    get,
    path = "/api/analytics/export",
    tag = "Analytics",
    summary = "Export posting history",
    description = "Exports the posting attempts in the lookback window as JSON (default) or CSV.",
    params(ExportQuery),
    responses(
        (status = 200, description = "Exported records"),
        (status = 400, description = "Unknown export format", body = ErrorResponse),
    )
)]
pub async fn export_analytics(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let days = window_days(&state, query.days);
    let window = state.service.posting_log().recent(days).await;

    match query.format.as_deref().unwrap_or("json") {
        "json" => {
            let body = serde_json::to_string(&window)
                .map_err(|e| GatewayError::Internal(e.to_string()))?;
            Ok(([(header::CONTENT_TYPE, "application/json")], body))
        }
        "csv" => Ok(([(header::CONTENT_TYPE, "text/csv")], records_to_csv(&window))),
        other => Err(GatewayError::InvalidExportFormat(other.to_string())),
    }
}

/// Analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/overview", get(get_overview))
        .route("/analytics/performance", get(get_performance))
        .route("/analytics/trends", get(get_trends))
        .route("/analytics/export", get(export_analytics))
}

/// Largest accepted lookback window (ten years).
const MAX_WINDOW_DAYS: i64 = 3650;

fn window_days(state: &AppState, requested: Option<i64>) -> i64 {
    requested
        .filter(|d| *d > 0)
        .map(|d| d.min(MAX_WINDOW_DAYS))
        .unwrap_or_else(|| state.service.analytics_window_days())
}

fn count_status(window: &[PostingRecord], status: PostStatus) -> u32 {
    window.iter().filter(|r| r.status == status).count() as u32
}

fn percentage(part: u32, whole: u32) -> f64 {
    if whole > 0 {
        f64::from(part) / f64::from(whole) * 100.0
    } else {
        0.0
    }
}

fn records_to_csv(window: &[PostingRecord]) -> String {
    let mut csv = String::from("id,property_id,platform,status,post_url,error_message,posted_at\n");
    for record in window {
        let status = match record.status {
            PostStatus::Success => "success",
            PostStatus::Failed => "failed",
            PostStatus::Pending => "pending",
        };
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            record.id,
            record.property_id,
            record.platform,
            status,
            record.post_url.as_deref().unwrap_or(""),
            record.error_message.as_deref().unwrap_or("").replace(',', ";"),
            record.posted_at.to_rfc3339(),
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Platform, PropertyId};
    use chrono::Utc;

    fn make_record(status: PostStatus) -> PostingRecord {
        PostingRecord {
            id: 1,
            property_id: PropertyId::new("stay-1"),
            platform: Platform::Instagram,
            post_url: Some("https://instagram.com/p/1".to_string()),
            status,
            error_message: None,
            posted_at: Utc::now(),
        }
    }

    #[test]
    fn percentage_guards_division_by_zero() {
        assert!((percentage(1, 2) - 50.0).abs() < f64::EPSILON);
        assert!(percentage(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = records_to_csv(&[make_record(PostStatus::Success)]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,property_id,platform,status,post_url,error_message,posted_at")
        );
        let row = lines.next().unwrap_or_default();
        assert!(row.starts_with("1,stay-1,instagram,success,"));
    }
}
