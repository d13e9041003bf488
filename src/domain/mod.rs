//! Domain layer: core types, stores, and the event system.
//!
//! This module contains the server-side domain model: property identity
//! and storage, the posting/engagement logs that analytics derive from,
//! notifications with read-state, the settings document, and the event
//! bus that broadcasts state changes to WebSocket clients.

pub mod event;
pub mod event_bus;
pub mod notification;
pub mod posting;
pub mod property;
pub mod property_id;
pub mod property_store;
pub mod settings;
pub mod stats;

pub use event::DashboardEvent;
pub use event_bus::EventBus;
pub use notification::{Notification, NotificationId, NotificationKind, NotificationStore};
pub use posting::{Engagement, EngagementLog, Platform, PostStatus, PostingLog, PostingRecord};
pub use property::Property;
pub use property_id::PropertyId;
pub use property_store::{
    PropertyFilter, PropertyStore, PropertySummaryStats, StatusFilter,
};
pub use settings::{DashboardSettings, NotificationSettings, SettingsStore};
pub use stats::{DashboardStats, SystemStatus};
