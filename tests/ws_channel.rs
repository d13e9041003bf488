//! End-to-end tests of the notification channel against a live gateway.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use chrono::Utc;

use staycast_gateway::api;
use staycast_gateway::app_state::AppState;
use staycast_gateway::client::{ChannelEvent, EventKind, NotificationChannel};
use staycast_gateway::domain::{
    EngagementLog, EventBus, NotificationStore, Platform, PostStatus, PostingLog, PostingRecord,
    Property, PropertyId, PropertyStore, SettingsStore,
};
use staycast_gateway::service::DashboardService;
use staycast_gateway::ws::handler::ws_handler;

fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("unexpected error: {e:?}"),
    }
}

async fn spawn_gateway() -> (SocketAddr, Arc<DashboardService>) {
    let service = Arc::new(DashboardService::new(
        Arc::new(PropertyStore::new()),
        Arc::new(PostingLog::new()),
        Arc::new(EngagementLog::new()),
        Arc::new(NotificationStore::new(100)),
        Arc::new(SettingsStore::new()),
        EventBus::new(100),
        30,
    ));
    let state = AppState::new(Arc::clone(&service));

    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .with_state(state);

    let listener = must(tokio::net::TcpListener::bind(("127.0.0.1", 0)).await);
    let addr = must(listener.local_addr());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, service)
}

type EventLog = Arc<Mutex<Vec<ChannelEvent>>>;

fn recorder(log: &EventLog) -> impl Fn(&ChannelEvent) + Send + Sync + use<> {
    let log = Arc::clone(log);
    move |event| {
        if let Ok(mut entries) = log.lock() {
            entries.push(event.clone());
        }
    }
}

fn logged(log: &EventLog) -> Vec<ChannelEvent> {
    log.lock().map(|l| l.clone()).unwrap_or_default()
}

/// Polls until `predicate` holds or two seconds elapse.
async fn wait_until(mut predicate: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

fn make_record(status: PostStatus) -> PostingRecord {
    PostingRecord {
        id: 0,
        property_id: PropertyId::new("stay-1"),
        platform: Platform::Instagram,
        post_url: None,
        status,
        error_message: None,
        posted_at: Utc::now(),
    }
}

#[tokio::test]
async fn connect_dispatches_connected_and_sets_flag() {
    let (addr, _service) = spawn_gateway().await;
    let channel = NotificationChannel::new(format!("ws://{addr}/ws"));
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    channel.on(EventKind::Connected, recorder(&log));

    channel.connect().await;

    assert!(channel.is_connected());
    assert_eq!(logged(&log).len(), 1);

    // Second connect is a no-op: no second Connected event.
    channel.connect().await;
    assert_eq!(logged(&log).len(), 1);

    channel.disconnect().await;
}

#[tokio::test]
async fn notification_broadcast_reaches_handlers() {
    let (addr, service) = spawn_gateway().await;
    let channel = NotificationChannel::new(format!("ws://{addr}/ws"));
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    channel.on(EventKind::Notification, recorder(&log));

    channel.connect().await;
    service.record_posting(make_record(PostStatus::Success)).await;

    assert!(wait_until(|| !logged(&log).is_empty()).await);
    let events = logged(&log);
    let Some(ChannelEvent::Notification(data)) = events.first() else {
        panic!("expected a notification event");
    };
    assert_eq!(data["type"], "success");
    assert_eq!(data["title"], "Post published");

    channel.disconnect().await;
}

#[tokio::test]
async fn system_update_broadcast_carries_stats() {
    let (addr, service) = spawn_gateway().await;
    service
        .ingest_property(Property {
            id: PropertyId::new("stay-1"),
            title: "Riverside Loft".to_string(),
            city: "Seoul".to_string(),
            price_per_night: 120_000,
            rating: 4.8,
            max_guests: 4,
            bedrooms: 2,
            bathrooms: 1,
            amenities: vec![],
            images: vec![],
            is_active: true,
            created_at: Utc::now(),
            scraped_at: Utc::now(),
        })
        .await;

    let channel = NotificationChannel::new(format!("ws://{addr}/ws"));
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    channel.on(EventKind::SystemUpdate, recorder(&log));

    channel.connect().await;
    service.publish_system_update().await;

    assert!(wait_until(|| !logged(&log).is_empty()).await);
    let events = logged(&log);
    let Some(ChannelEvent::SystemUpdate(data)) = events.first() else {
        panic!("expected a system_update event");
    };
    assert_eq!(data["totalProperties"], 1);

    channel.disconnect().await;
}

#[tokio::test]
async fn disconnect_fires_once_and_registry_survives() {
    let (addr, service) = spawn_gateway().await;
    let channel = NotificationChannel::new(format!("ws://{addr}/ws"));
    let disconnects: EventLog = Arc::new(Mutex::new(Vec::new()));
    let notifications: EventLog = Arc::new(Mutex::new(Vec::new()));
    channel.on(EventKind::Disconnected, recorder(&disconnects));
    channel.on(EventKind::Notification, recorder(&notifications));

    channel.connect().await;
    channel.disconnect().await;

    assert!(!channel.is_connected());
    assert_eq!(logged(&disconnects).len(), 1);

    // Idempotent: a second disconnect emits nothing.
    channel.disconnect().await;
    assert_eq!(logged(&disconnects).len(), 1);

    // Handlers survive the disconnect and fire after reconnecting.
    channel.connect().await;
    assert!(channel.is_connected());
    service.record_posting(make_record(PostStatus::Failed)).await;
    assert!(wait_until(|| !logged(&notifications).is_empty()).await);

    channel.disconnect().await;
    assert_eq!(logged(&disconnects).len(), 2);
}

#[tokio::test]
async fn off_stops_delivery_to_removed_handler() {
    let (addr, service) = spawn_gateway().await;
    let channel = NotificationChannel::new(format!("ws://{addr}/ws"));
    let kept: EventLog = Arc::new(Mutex::new(Vec::new()));
    let removed: EventLog = Arc::new(Mutex::new(Vec::new()));
    channel.on(EventKind::Notification, recorder(&kept));
    let removed_id = channel.on(EventKind::Notification, recorder(&removed));

    channel.connect().await;
    assert!(channel.off(EventKind::Notification, removed_id));

    service.record_posting(make_record(PostStatus::Success)).await;
    assert!(wait_until(|| !logged(&kept).is_empty()).await);
    assert!(logged(&removed).is_empty());

    channel.disconnect().await;
}

#[tokio::test]
async fn send_reaches_the_gateway_and_is_answered() {
    let (addr, _service) = spawn_gateway().await;
    let channel = NotificationChannel::new(format!("ws://{addr}/ws"));

    channel.connect().await;
    // Pongs arrive outside the broadcast envelope and are not dispatched
    // as typed events; sending must simply not disturb the connection.
    channel.send(&serde_json::json!({"type": "ping"}));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(channel.is_connected());

    channel.disconnect().await;
}
