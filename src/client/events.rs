//! Typed events delivered by the [`super::NotificationChannel`].

use serde_json::Value;

/// Event delivered to channel listeners.
///
/// `Notification` and `SystemUpdate` carry the server payload verbatim;
/// the channel never inspects or validates it beyond envelope parsing.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// The WebSocket handshake completed.
    Connected,
    /// The connection ended (local disconnect or remote close).
    Disconnected,
    /// A `notification` broadcast from the gateway.
    Notification(Value),
    /// A `system_update` broadcast from the gateway.
    SystemUpdate(Value),
    /// A connection or transport failure. Never raised as a Rust error.
    Error(String),
}

impl ChannelEvent {
    /// Returns the discriminant used to key handler registrations.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Connected => EventKind::Connected,
            Self::Disconnected => EventKind::Disconnected,
            Self::Notification(_) => EventKind::Notification,
            Self::SystemUpdate(_) => EventKind::SystemUpdate,
            Self::Error(_) => EventKind::Error,
        }
    }
}

/// Discriminant of [`ChannelEvent`], used to register handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Handshake completed.
    Connected,
    /// Connection ended.
    Disconnected,
    /// `notification` broadcast.
    Notification,
    /// `system_update` broadcast.
    SystemUpdate,
    /// Connection or transport failure.
    Error,
}

/// Token returned by [`super::NotificationChannel::on`], used to
/// unregister the handler again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(pub(super) u64);
