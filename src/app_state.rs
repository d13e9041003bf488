//! Shared application state threaded through all handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{EventBus, SettingsStore};
use crate::service::DashboardService;

/// Shared state for the axum router.
///
/// Cheap to clone: everything is behind an [`Arc`] or is itself a handle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Orchestration layer over the domain stores.
    pub service: Arc<DashboardService>,
    /// Broadcast bus WebSocket connections subscribe to.
    pub event_bus: EventBus,
    /// Settings document and API-key store.
    pub settings: Arc<SettingsStore>,
    /// When this process started (reported by `/api/settings/system-info`).
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates the shared state around an already-built service.
    #[must_use]
    pub fn new(service: Arc<DashboardService>) -> Self {
        let event_bus = service.event_bus().clone();
        let settings = Arc::clone(service.settings());
        Self {
            service,
            event_bus,
            settings,
            started_at: Utc::now(),
        }
    }
}
