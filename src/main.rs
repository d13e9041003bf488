//! staycast-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints and the
//! periodic system-update broadcaster.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use staycast_gateway::api;
use staycast_gateway::app_state::AppState;
use staycast_gateway::config::GatewayConfig;
use staycast_gateway::domain::{
    EngagementLog, EventBus, NotificationStore, PostingLog, PropertyStore, SettingsStore,
};
use staycast_gateway::service::DashboardService;
use staycast_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env().context("invalid configuration")?;
    tracing::info!(addr = %config.listen_addr, "starting staycast-gateway");

    // Build domain layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let service = Arc::new(DashboardService::new(
        Arc::new(PropertyStore::new()),
        Arc::new(PostingLog::new()),
        Arc::new(EngagementLog::new()),
        Arc::new(NotificationStore::new(config.notification_capacity)),
        Arc::new(SettingsStore::new()),
        event_bus,
        config.analytics_window_days,
    ));

    // Build application state
    let app_state = AppState::new(Arc::clone(&service));

    // Periodic system-update broadcast for connected dashboards
    let interval_secs = config.system_update_interval_secs;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            service.publish_system_update().await;
        }
    });

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .context("failed to bind listen address")?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
