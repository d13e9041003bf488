//! REST endpoint handlers organized by resource.

pub mod analytics;
pub mod dashboard;
pub mod notifications;
pub mod properties;
pub mod settings;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::routes())
        .merge(properties::routes())
        .merge(analytics::routes())
        .merge(notifications::routes())
        .merge(settings::routes())
}
