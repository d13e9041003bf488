//! Domain events pushed to dashboard clients.
//!
//! Every event serializes as the broadcast envelope the frontend expects:
//! `{"type": "<event name>", "data": <payload>}`.

use serde::Serialize;

use super::{DashboardStats, Notification};

/// Event broadcast to all connected dashboard clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// A new notification was created.
    Notification(Notification),
    /// Fresh dashboard statistics (periodic or after lifecycle changes).
    SystemUpdate(DashboardStats),
}

impl DashboardEvent {
    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::Notification(_) => "notification",
            Self::SystemUpdate(_) => "system_update",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::NotificationKind;

    #[test]
    fn notification_event_envelope() {
        let event = DashboardEvent::Notification(Notification::new(
            NotificationKind::Success,
            "Post published",
            "instagram post went live",
            None,
        ));
        assert_eq!(event.event_type_str(), "notification");

        let json = serde_json::to_string(&event);
        let Ok(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"type\":\"notification\""));
        assert!(json.contains("\"data\":"));
    }

    #[test]
    fn system_update_event_envelope() {
        let event = DashboardEvent::SystemUpdate(DashboardStats::default());
        assert_eq!(event.event_type_str(), "system_update");

        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"type\":\"system_update\""));
        assert!(json.contains("totalProperties"));
    }
}
