//! # staycast-gateway
//!
//! REST API and WebSocket gateway for the Staycast property-marketing
//! automation dashboard.
//!
//! The gateway serves the dashboard frontend: property listings, posting
//! analytics, notifications, and settings over REST, plus realtime pushes
//! over WebSocket. The scraping and posting pipeline itself runs
//! elsewhere and reports in through the service layer's ingestion seams.
//! All state is held in memory.
//!
//! ## Architecture
//!
//! ```text
//! Dashboard clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Push (ws/)
//!     │
//!     ├── DashboardService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     └── Stores: properties, posting log, notifications,
//!         engagement, settings (domain/)
//!
//! Consumers
//!     └── NotificationChannel (client/) ── ws:// ──▶ /ws
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
