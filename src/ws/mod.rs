//! Server-side WebSocket push: upgrade handler and per-connection loop.

pub mod connection;
pub mod handler;
pub mod messages;
