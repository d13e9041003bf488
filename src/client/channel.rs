//! WebSocket client channel for dashboard notifications.
//!
//! [`NotificationChannel`] wraps a `tokio-tungstenite` connection to the
//! gateway's `/ws` endpoint behind an event-listener API: callers register
//! handlers per [`EventKind`] and the channel invokes them as broadcast
//! frames arrive. Connection problems never surface as Rust errors; they
//! are delivered as [`ChannelEvent::Error`] to whoever listens.
//!
//! The channel does not reconnect on its own. After a dropped connection
//! callers must observe `Disconnected` and call [`NotificationChannel::connect`]
//! again themselves.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::events::{ChannelEvent, EventKind, HandlerId};

type Handler = Arc<dyn Fn(&ChannelEvent) + Send + Sync>;

/// Handler registrations keyed by event kind.
///
/// Handlers run in registration order. Dispatch iterates over a snapshot
/// taken at dispatch start, so handlers may register or remove other
/// handlers without affecting the ongoing dispatch.
struct HandlerRegistry {
    handlers: std::sync::Mutex<HashMap<EventKind, Vec<(HandlerId, Handler)>>>,
    next_id: AtomicU64,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            handlers: std::sync::Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn register(&self, kind: EventKind, handler: Handler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut map) = self.handlers.lock() {
            map.entry(kind).or_default().push((id, handler));
        }
        id
    }

    fn remove(&self, kind: EventKind, id: HandlerId) -> bool {
        let Ok(mut map) = self.handlers.lock() else {
            return false;
        };
        let Some(list) = map.get_mut(&kind) else {
            return false;
        };
        let Some(position) = list.iter().position(|(h, _)| *h == id) else {
            return false;
        };
        list.remove(position);
        true
    }

    fn dispatch(&self, event: &ChannelEvent) {
        let snapshot: Vec<Handler> = match self.handlers.lock() {
            Ok(map) => map
                .get(&event.kind())
                .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        for handler in snapshot {
            handler(event);
        }
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self
            .handlers
            .lock()
            .map(|map| map.values().map(Vec::len).sum::<usize>())
            .unwrap_or(0);
        f.debug_struct("HandlerRegistry")
            .field("handlers", &count)
            .finish()
    }
}

/// Live-connection state: the outbound queue plus the two socket tasks.
struct ConnectionHandle {
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

/// Client-side channel for realtime dashboard events.
///
/// Construct one per gateway endpoint and share it (e.g. behind an
/// [`Arc`]) wherever events are consumed. There is deliberately no global
/// instance; ownership is explicit.
pub struct NotificationChannel {
    url: String,
    registry: Arc<HandlerRegistry>,
    connected: Arc<AtomicBool>,
    sender: std::sync::Mutex<Option<mpsc::UnboundedSender<Message>>>,
    conn: tokio::sync::Mutex<Option<ConnectionHandle>>,
}

impl fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("url", &self.url)
            .field("connected", &self.is_connected())
            .field("registry", &self.registry)
            .finish()
    }
}

impl NotificationChannel {
    /// Creates a disconnected channel for the given WebSocket URL
    /// (e.g. `ws://localhost:8000/ws`).
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            registry: Arc::new(HandlerRegistry::new()),
            connected: Arc::new(AtomicBool::new(false)),
            sender: std::sync::Mutex::new(None),
            conn: tokio::sync::Mutex::new(None),
        }
    }

    /// Registers a handler for one event kind, returning its removal token.
    ///
    /// Handlers for the same kind run in registration order; the same
    /// closure may be registered multiple times and will run once per
    /// registration.
    pub fn on(&self, kind: EventKind, handler: impl Fn(&ChannelEvent) + Send + Sync + 'static) -> HandlerId {
        self.registry.register(kind, Arc::new(handler))
    }

    /// Removes the handler registered under `id` for `kind`.
    ///
    /// Returns `false` if no such registration exists. Removing a handler
    /// never disturbs other registrations, including other registrations
    /// of the same closure.
    pub fn off(&self, kind: EventKind, id: HandlerId) -> bool {
        self.registry.remove(kind, id)
    }

    /// Returns `true` while the socket is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Sends a JSON payload to the gateway.
    ///
    /// Fire-and-forget: while disconnected the payload is silently dropped,
    /// matching the semantics of the events it mirrors.
    pub fn send(&self, payload: &Value) {
        if !self.is_connected() {
            return;
        }
        let Ok(sender) = self.sender.lock() else {
            return;
        };
        if let Some(tx) = sender.as_ref() {
            let _ = tx.send(Message::Text(payload.to_string().into()));
        }
    }

    /// Connects to the gateway.
    ///
    /// No-op when already connected. A failed handshake is reported as a
    /// [`ChannelEvent::Error`], never returned; a successful one dispatches
    /// [`ChannelEvent::Connected`] and starts the socket tasks. The channel
    /// never reconnects automatically.
    pub async fn connect(&self) {
        let mut conn = self.conn.lock().await;
        if self.is_connected() {
            return;
        }

        let stream = match connect_async(self.url.as_str()).await {
            Ok((stream, _response)) => stream,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "ws connect failed");
                self.registry
                    .dispatch(&ChannelEvent::Error(format!("connect failed: {e}")));
                return;
            }
        };

        let (mut ws_tx, mut ws_rx) = stream.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();

        let writer = tokio::spawn(async move {
            while let Some(message) = out_rx.recv().await {
                if ws_tx.send(message).await.is_err() {
                    break;
                }
            }
            // Queue closed: announce the close and flush before dropping.
            let _ = ws_tx.send(Message::Close(None)).await;
            let _ = ws_tx.close().await;
        });

        let registry = Arc::clone(&self.registry);
        let connected = Arc::clone(&self.connected);
        let reader = tokio::spawn(async move {
            while let Some(frame) = ws_rx.next().await {
                match frame {
                    Ok(Message::Text(text)) => handle_frame(&registry, text.as_str()),
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        registry.dispatch(&ChannelEvent::Error(format!("transport error: {e}")));
                        break;
                    }
                }
            }
            // Whoever flips the flag owns the single Disconnected dispatch.
            if connected.swap(false, Ordering::SeqCst) {
                registry.dispatch(&ChannelEvent::Disconnected);
            }
        });

        if let Ok(mut sender) = self.sender.lock() {
            *sender = Some(out_tx);
        }
        *conn = Some(ConnectionHandle { reader, writer });
        self.connected.store(true, Ordering::SeqCst);
        self.registry.dispatch(&ChannelEvent::Connected);
        tracing::debug!(url = %self.url, "ws connected");
    }

    /// Disconnects from the gateway.
    ///
    /// Idempotent. Dispatches [`ChannelEvent::Disconnected`] exactly once
    /// per live connection; registered handlers survive and fire again
    /// after a later [`NotificationChannel::connect`].
    pub async fn disconnect(&self) {
        let handle = self.conn.lock().await.take();
        let Some(handle) = handle else {
            return;
        };

        // Dropping the queue makes the writer send a Close frame and stop.
        if let Ok(mut sender) = self.sender.lock() {
            *sender = None;
        }
        handle.reader.abort();
        let _ = handle.writer.await;

        if self.connected.swap(false, Ordering::SeqCst) {
            self.registry.dispatch(&ChannelEvent::Disconnected);
        }
        tracing::debug!(url = %self.url, "ws disconnected");
    }
}

/// Parses one inbound text frame and dispatches the matching event.
///
/// Expects the gateway's broadcast envelope `{"type": …, "data": …}`.
/// Unrecognized types are ignored; unparseable frames become `Error`
/// events.
fn handle_frame(registry: &HandlerRegistry, text: &str) {
    let Ok(envelope) = serde_json::from_str::<Value>(text) else {
        registry.dispatch(&ChannelEvent::Error("malformed frame".to_string()));
        return;
    };
    let event_type = envelope.get("type").and_then(Value::as_str);
    let data = envelope.get("data").cloned().unwrap_or(Value::Null);

    match event_type {
        Some("notification") => registry.dispatch(&ChannelEvent::Notification(data)),
        Some("system_update") => registry.dispatch(&ChannelEvent::SystemUpdate(data)),
        other => {
            tracing::debug!(event_type = ?other, "ignoring unrecognized ws frame");
        }
    }
}
