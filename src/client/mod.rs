//! Client-side realtime channel for dashboard consumers.
//!
//! This is the consumer counterpart of the [`crate::ws`] push layer:
//! an explicitly owned WebSocket wrapper that turns the gateway's
//! broadcast frames into typed events with per-kind listener lists.

pub mod channel;
pub mod events;

pub use channel::NotificationChannel;
pub use events::{ChannelEvent, EventKind, HandlerId};
