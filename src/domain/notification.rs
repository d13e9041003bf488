//! Notifications and their read-state store.
//!
//! Notifications are created by the service layer (posting outcomes,
//! system lifecycle changes) and retained in a bounded in-memory list.
//! Unlike the original dashboard, read-state actually mutates here:
//! `mark_read`/`mark_all_read` flip the flag instead of being stubs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::PropertyId;
use crate::error::GatewayError;

/// Unique identifier for a notification (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct NotificationId(uuid::Uuid);

impl NotificationId {
    /// Creates a new random `NotificationId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity/category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Successful operation (e.g. post published).
    Success,
    /// Failed operation.
    Error,
    /// Degraded but non-fatal condition.
    Warning,
    /// Informational message.
    Info,
}

/// A dashboard notification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    /// Severity/category.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Related property, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
    /// Whether the user has read this notification.
    pub read: bool,
}

impl Notification {
    /// Creates an unread notification timestamped now.
    #[must_use]
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        property_id: Option<PropertyId>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp: Utc::now(),
            property_id,
            read: false,
        }
    }
}

/// Bounded in-memory notification list, newest first.
///
/// When the capacity is exceeded the oldest notifications are dropped.
#[derive(Debug)]
pub struct NotificationStore {
    notifications: RwLock<Vec<Notification>>,
    capacity: usize,
}

impl NotificationStore {
    /// Creates an empty store retaining at most `capacity` notifications.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            notifications: RwLock::new(Vec::new()),
            capacity,
        }
    }

    /// Prepends a notification, evicting the oldest past capacity.
    pub async fn push(&self, notification: Notification) {
        let mut list = self.notifications.write().await;
        list.insert(0, notification);
        list.truncate(self.capacity);
    }

    /// Returns up to `limit` notifications, newest first.
    pub async fn list(&self, limit: usize) -> Vec<Notification> {
        let list = self.notifications.read().await;
        list.iter().take(limit).cloned().collect()
    }

    /// Returns the total number of retained notifications.
    pub async fn len(&self) -> usize {
        self.notifications.read().await.len()
    }

    /// Returns `true` if no notifications are retained.
    pub async fn is_empty(&self) -> bool {
        self.notifications.read().await.is_empty()
    }

    /// Returns the number of unread notifications.
    pub async fn unread_count(&self) -> usize {
        let list = self.notifications.read().await;
        list.iter().filter(|n| !n.read).count()
    }

    /// Marks a single notification as read.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotificationNotFound`] if the ID is unknown.
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), GatewayError> {
        let mut list = self.notifications.write().await;
        let notification = list
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(GatewayError::NotificationNotFound(*id.as_uuid()))?;
        notification.read = true;
        Ok(())
    }

    /// Marks all retained notifications as read, returning how many changed.
    pub async fn mark_all_read(&self) -> usize {
        let mut list = self.notifications.write().await;
        let mut changed = 0;
        for notification in list.iter_mut() {
            if !notification.read {
                notification.read = true;
                changed += 1;
            }
        }
        changed
    }
}
