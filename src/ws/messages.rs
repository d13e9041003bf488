//! WebSocket control-frame types.
//!
//! Domain events are forwarded to clients in their own envelope
//! (see [`crate::domain::DashboardEvent`]); the types here cover the
//! small client→server command vocabulary and the replies to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Commands a dashboard client may send over the socket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Explicit subscription request (all events are pushed regardless;
    /// the ack lets clients confirm the channel is live).
    Subscribe,
    /// Liveness probe.
    Ping,
}

/// Replies to client commands.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerReply {
    /// Acknowledges a [`ClientCommand::Subscribe`].
    Subscribed {
        /// Human-readable confirmation.
        message: String,
    },
    /// Answers a [`ClientCommand::Ping`].
    Pong {
        /// Server time at reply.
        timestamp: DateTime<Utc>,
    },
    /// Reports a malformed or unrecognized frame.
    Error {
        /// What was wrong with the frame.
        message: String,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_tagged_json() {
        let cmd = serde_json::from_str::<ClientCommand>(r#"{"type":"ping"}"#);
        assert!(matches!(cmd, Ok(ClientCommand::Ping)));

        let cmd = serde_json::from_str::<ClientCommand>(r#"{"type":"subscribe"}"#);
        assert!(matches!(cmd, Ok(ClientCommand::Subscribe)));
    }

    #[test]
    fn replies_serialize_with_type_tag() {
        let reply = ServerReply::Pong {
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&reply);
        let Ok(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"type\":\"pong\""));
        assert!(json.contains("timestamp"));
    }
}
