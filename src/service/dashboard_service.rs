//! Dashboard service: orchestrates store mutations and emits events.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::domain::{
    DashboardEvent, DashboardStats, EngagementLog, EventBus, Notification, NotificationKind,
    NotificationStore, PostStatus, PostingLog, PostingRecord, Property, PropertyId, PropertyStore,
    SettingsStore, SystemStatus,
};

/// Hours between scheduled posting runs.
const EXECUTION_INTERVAL_HOURS: i64 = 6;

/// Workflow names reported while the scheduler is running.
const ACTIVE_WORKFLOWS: [&str; 3] = ["data_collection", "content_generation", "social_posting"];

/// Kind discriminator for activity-feed entries.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A posting attempt completed.
    Post,
    /// A new listing was ingested.
    PropertyAdded,
}

/// One entry of the recent-activity feed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Activity {
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Human-readable description.
    pub message: String,
    /// Outcome label (`success`, `failed`, …).
    pub status: String,
    /// When the activity happened.
    pub timestamp: DateTime<Utc>,
    /// Related property, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
}

/// Orchestration layer for all dashboard operations.
///
/// Stateless coordinator over the domain stores plus the [`EventBus`].
/// Every mutation method follows the pattern: mutate store → derive
/// notification → publish events → return result.
#[derive(Debug)]
pub struct DashboardService {
    properties: Arc<PropertyStore>,
    posting_log: Arc<PostingLog>,
    engagement: Arc<EngagementLog>,
    notifications: Arc<NotificationStore>,
    settings: Arc<SettingsStore>,
    event_bus: EventBus,
    running: AtomicBool,
    last_execution: RwLock<Option<DateTime<Utc>>>,
    started_at: DateTime<Utc>,
    analytics_window_days: i64,
}

impl DashboardService {
    /// Creates a new `DashboardService` over the given stores.
    #[must_use]
    pub fn new(
        properties: Arc<PropertyStore>,
        posting_log: Arc<PostingLog>,
        engagement: Arc<EngagementLog>,
        notifications: Arc<NotificationStore>,
        settings: Arc<SettingsStore>,
        event_bus: EventBus,
        analytics_window_days: i64,
    ) -> Self {
        Self {
            properties,
            posting_log,
            engagement,
            notifications,
            settings,
            event_bus,
            running: AtomicBool::new(false),
            last_execution: RwLock::new(None),
            started_at: Utc::now(),
            analytics_window_days,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the property store.
    #[must_use]
    pub fn properties(&self) -> &Arc<PropertyStore> {
        &self.properties
    }

    /// Returns a reference to the posting log.
    #[must_use]
    pub fn posting_log(&self) -> &Arc<PostingLog> {
        &self.posting_log
    }

    /// Returns a reference to the engagement log.
    #[must_use]
    pub fn engagement(&self) -> &Arc<EngagementLog> {
        &self.engagement
    }

    /// Returns a reference to the notification store.
    #[must_use]
    pub fn notifications(&self) -> &Arc<NotificationStore> {
        &self.notifications
    }

    /// Returns a reference to the settings store.
    #[must_use]
    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    /// Returns the configured analytics lookback window in days.
    #[must_use]
    pub fn analytics_window_days(&self) -> i64 {
        self.analytics_window_days
    }

    /// Computes the headline dashboard statistics.
    pub async fn stats(&self) -> DashboardStats {
        let window = self.posting_log.recent(self.analytics_window_days).await;
        let total_posts = window.len() as u32;
        let successful_posts = window
            .iter()
            .filter(|r| r.status == PostStatus::Success)
            .count() as u32;
        let failed_posts = window
            .iter()
            .filter(|r| r.status == PostStatus::Failed)
            .count() as u32;

        let engagement = self.engagement.totals().await;
        let conversion_rate = if engagement.clicks > 0 {
            engagement.conversions as f64 / engagement.clicks as f64 * 100.0
        } else {
            0.0
        };
        let success_rate = if total_posts > 0 {
            f64::from(successful_posts) / f64::from(total_posts) * 100.0
        } else {
            0.0
        };

        DashboardStats {
            total_properties: self.properties.len().await as u32,
            active_properties: self.properties.active_count().await as u32,
            total_posts,
            successful_posts,
            failed_posts,
            total_clicks: engagement.clicks,
            total_conversions: engagement.conversions,
            conversion_rate,
            error_count: failed_posts,
            success_rate,
        }
    }

    /// Returns the current scheduler/runtime status.
    pub async fn system_status(&self) -> SystemStatus {
        let running = self.running.load(Ordering::Relaxed);
        let last_execution = *self.last_execution.read().await;
        let next_execution = if running {
            last_execution.map(|t| t + Duration::hours(EXECUTION_INTERVAL_HOURS))
        } else {
            None
        };
        let failed = self
            .posting_log
            .recent(self.analytics_window_days)
            .await
            .iter()
            .filter(|r| r.status == PostStatus::Failed)
            .count() as u32;

        SystemStatus {
            is_running: running,
            last_execution,
            next_execution,
            active_workflows: if running {
                ACTIVE_WORKFLOWS.iter().map(ToString::to_string).collect()
            } else {
                Vec::new()
            },
            error_count: failed,
            uptime: format_uptime(Utc::now() - self.started_at),
        }
    }

    /// Returns `true` if the posting scheduler is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Starts the posting scheduler. Idempotent.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::Relaxed) {
            return;
        }
        *self.last_execution.write().await = Some(Utc::now());

        self.notify(
            NotificationKind::Info,
            "System started",
            "posting scheduler is running",
            None,
        )
        .await;
        self.publish_system_update().await;
        tracing::info!("scheduler started");
    }

    /// Stops the posting scheduler. Idempotent.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::Relaxed) {
            return;
        }

        self.notify(
            NotificationKind::Warning,
            "System stopped",
            "posting scheduler was stopped",
            None,
        )
        .await;
        self.publish_system_update().await;
        tracing::info!("scheduler stopped");
    }

    /// Ingests (or re-ingests) a listing from the scraping pipeline.
    pub async fn ingest_property(&self, property: Property) {
        tracing::debug!(id = %property.id, city = %property.city, "property ingested");
        self.properties.insert(property).await;
    }

    /// Records a posting attempt, derives a notification, and broadcasts it.
    ///
    /// Success/error notifications honor the per-category switches in the
    /// notification settings.
    pub async fn record_posting(&self, record: PostingRecord) -> u64 {
        let platform = record.platform;
        let status = record.status;
        let property_id = record.property_id.clone();
        let id = self.posting_log.record(record).await;

        let types = self.settings.notification_settings().await.notification_types;
        match status {
            PostStatus::Success if types.post_success => {
                self.notify(
                    NotificationKind::Success,
                    "Post published",
                    format!("post published to {platform}"),
                    Some(property_id),
                )
                .await;
            }
            PostStatus::Failed if types.post_error => {
                self.notify(
                    NotificationKind::Error,
                    "Post failed",
                    format!("posting to {platform} failed"),
                    Some(property_id),
                )
                .await;
            }
            _ => {}
        }

        id
    }

    /// Records clicks/conversions reported by link tracking.
    pub async fn record_engagement(&self, property_id: PropertyId, clicks: u64, conversions: u64) {
        self.engagement.add(property_id, clicks, conversions).await;
    }

    /// Returns the merged recent-activity feed, newest first, capped at 20.
    pub async fn recent_activities(&self) -> Vec<Activity> {
        let mut activities: Vec<Activity> = Vec::new();

        for record in self.posting_log.recent(7).await.into_iter().take(10) {
            let status = match record.status {
                PostStatus::Success => "success",
                PostStatus::Failed => "error",
                PostStatus::Pending => "info",
            };
            activities.push(Activity {
                kind: ActivityKind::Post,
                message: format!("posted to {}", record.platform),
                status: status.to_string(),
                timestamp: record.posted_at,
                property_id: Some(record.property_id),
            });
        }

        let recent_listings = self.properties.list(&Default::default()).await;
        for property in recent_listings.into_iter().take(5) {
            activities.push(Activity {
                kind: ActivityKind::PropertyAdded,
                message: format!("new property added: {}", property.title),
                status: "success".to_string(),
                timestamp: property.created_at,
                property_id: Some(property.id),
            });
        }

        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        activities.truncate(20);
        activities
    }

    /// Broadcasts the current statistics as a `system_update` event.
    pub async fn publish_system_update(&self) {
        let stats = self.stats().await;
        let _ = self.event_bus.publish(DashboardEvent::SystemUpdate(stats));
    }

    /// Stores a notification and broadcasts it.
    async fn notify(
        &self,
        kind: NotificationKind,
        title: &str,
        message: impl Into<String>,
        property_id: Option<PropertyId>,
    ) {
        let notification = Notification::new(kind, title, message, property_id);
        self.notifications.push(notification.clone()).await;
        let _ = self
            .event_bus
            .publish(DashboardEvent::Notification(notification));
    }
}

/// Formats a duration as a compact uptime string, e.g. `"2d 5h 30m"`.
fn format_uptime(elapsed: Duration) -> String {
    let minutes = elapsed.num_minutes().max(0);
    let (days, rem) = (minutes / (24 * 60), minutes % (24 * 60));
    let (hours, mins) = (rem / 60, rem % 60);
    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}
