//! Service layer: orchestration between the domain stores and the API.

pub mod dashboard_service;

pub use dashboard_service::{Activity, ActivityKind, DashboardService};
