//! Posting history and engagement counters.
//!
//! The posting pipeline (out of scope here) records every social-media
//! posting attempt through [`PostingLog::record`]. Dashboard statistics,
//! analytics aggregations, and derived notifications are all computed over
//! this log. [`EngagementLog`] tracks click/conversion counters reported
//! back by link tracking.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::PropertyId;

/// Social-media platform a posting attempt targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Instagram feed/story/reels posting.
    Instagram,
    /// YouTube shorts posting.
    Youtube,
    /// WordPress blog posting.
    Blog,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instagram => "instagram",
            Self::Youtube => "youtube",
            Self::Blog => "blog",
        };
        write!(f, "{name}")
    }
}

/// Outcome of a posting attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// Post published successfully.
    Success,
    /// Post failed; `error_message` carries the reason.
    Failed,
    /// Post queued but not yet confirmed.
    Pending,
}

/// A single posting attempt as reported by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostingRecord {
    /// Monotonic record ID assigned by the log.
    #[serde(default)]
    pub id: u64,
    /// Property the post marketed.
    pub property_id: PropertyId,
    /// Target platform.
    pub platform: Platform,
    /// Public URL of the published post, when available.
    pub post_url: Option<String>,
    /// Attempt outcome.
    pub status: PostStatus,
    /// Failure reason for [`PostStatus::Failed`] attempts.
    pub error_message: Option<String>,
    /// When the attempt completed.
    pub posted_at: DateTime<Utc>,
}

/// Append-only in-memory log of posting attempts.
#[derive(Debug, Default)]
pub struct PostingLog {
    records: RwLock<Vec<PostingRecord>>,
    next_id: AtomicU64,
}

impl PostingLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, assigning and returning its ID.
    pub async fn record(&self, mut record: PostingRecord) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        record.id = id;
        let mut records = self.records.write().await;
        records.push(record);
        id
    }

    /// Returns all records within the last `days` days, newest first.
    ///
    /// Windows too large to represent as a timestamp select every record
    /// instead of overflowing.
    pub async fn recent(&self, days: i64) -> Vec<PostingRecord> {
        let cutoff = Duration::try_days(days).and_then(|d| Utc::now().checked_sub_signed(d));
        let records = self.records.read().await;
        let mut window: Vec<PostingRecord> = records
            .iter()
            .filter(|r| cutoff.map_or(true, |c| r.posted_at >= c))
            .cloned()
            .collect();
        window.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        window
    }

    /// Returns the total number of recorded attempts.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

/// Click/conversion counters for a single property.
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
pub struct Engagement {
    /// Tracked link clicks.
    pub clicks: u64,
    /// Tracked conversions (bookings attributed to a post).
    pub conversions: u64,
}

/// Per-property engagement counters reported by link tracking.
#[derive(Debug, Default)]
pub struct EngagementLog {
    counters: RwLock<HashMap<PropertyId, Engagement>>,
}

impl EngagementLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds clicks and conversions for a property.
    pub async fn add(&self, property_id: PropertyId, clicks: u64, conversions: u64) {
        let mut counters = self.counters.write().await;
        let entry = counters.entry(property_id).or_default();
        entry.clicks += clicks;
        entry.conversions += conversions;
    }

    /// Returns the summed clicks and conversions across all properties.
    pub async fn totals(&self) -> Engagement {
        let counters = self.counters.read().await;
        counters.values().fold(Engagement::default(), |acc, e| {
            Engagement {
                clicks: acc.clicks + e.clicks,
                conversions: acc.conversions + e.conversions,
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_record(status: PostStatus, age_days: i64) -> PostingRecord {
        PostingRecord {
            id: 0,
            property_id: PropertyId::new("stay-1"),
            platform: Platform::Instagram,
            post_url: None,
            status,
            error_message: None,
            posted_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[tokio::test]
    async fn record_assigns_sequential_ids() {
        let log = PostingLog::new();
        let a = log.record(make_record(PostStatus::Success, 0)).await;
        let b = log.record(make_record(PostStatus::Failed, 0)).await;
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(log.len().await, 2);
    }

    #[tokio::test]
    async fn recent_applies_day_window() {
        let log = PostingLog::new();
        log.record(make_record(PostStatus::Success, 0)).await;
        log.record(make_record(PostStatus::Success, 10)).await;

        assert_eq!(log.recent(7).await.len(), 1);
        assert_eq!(log.recent(30).await.len(), 2);
    }

    #[tokio::test]
    async fn recent_with_unrepresentable_window_selects_everything() {
        let log = PostingLog::new();
        log.record(make_record(PostStatus::Success, 0)).await;
        log.record(make_record(PostStatus::Failed, 10)).await;

        assert_eq!(log.recent(i64::MAX).await.len(), 2);
    }

    #[tokio::test]
    async fn recent_is_newest_first() {
        let log = PostingLog::new();
        log.record(make_record(PostStatus::Success, 3)).await;
        log.record(make_record(PostStatus::Failed, 1)).await;

        let window = log.recent(7).await;
        assert_eq!(window.first().map(|r| r.status), Some(PostStatus::Failed));
    }

    #[tokio::test]
    async fn engagement_totals_sum_properties() {
        let log = EngagementLog::new();
        log.add(PropertyId::new("stay-1"), 10, 2).await;
        log.add(PropertyId::new("stay-2"), 5, 1).await;
        log.add(PropertyId::new("stay-1"), 3, 0).await;

        let totals = log.totals().await;
        assert_eq!(totals.clicks, 18);
        assert_eq!(totals.conversions, 3);
    }
}
