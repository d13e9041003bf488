//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! answering client commands and forwarding every broadcast event.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{ClientCommand, ServerReply};
use crate::domain::DashboardEvent;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Answers `subscribe`/`ping` commands from the client.
/// - Forwards every [`DashboardEvent`] from the [`broadcast::Receiver`]
///   to the client in its `{"type", "data"}` envelope.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<DashboardEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply_json) = handle_text_message(&text)
                            && ws_tx.send(Message::text(reply_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(dashboard_event) => {
                        let json = serde_json::to_string(&dashboard_event).unwrap_or_default();
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text frame from the client, returning an optional JSON reply.
fn handle_text_message(text: &str) -> Option<String> {
    let reply = match serde_json::from_str::<ClientCommand>(text) {
        Ok(ClientCommand::Subscribe) => ServerReply::Subscribed {
            message: "subscribed to dashboard events".to_string(),
        },
        Ok(ClientCommand::Ping) => ServerReply::Pong {
            timestamp: chrono::Utc::now(),
        },
        Err(_) => ServerReply::Error {
            message: "malformed or unknown command".to_string(),
        },
    };
    serde_json::to_string(&reply).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_gets_ack() {
        let reply = handle_text_message(r#"{"type":"subscribe"}"#).unwrap_or_default();
        assert!(reply.contains("\"type\":\"subscribed\""));
    }

    #[test]
    fn ping_gets_pong_with_timestamp() {
        let reply = handle_text_message(r#"{"type":"ping"}"#).unwrap_or_default();
        assert!(reply.contains("\"type\":\"pong\""));
        assert!(reply.contains("timestamp"));
    }

    #[test]
    fn malformed_frame_gets_error_reply() {
        let reply = handle_text_message("not json").unwrap_or_default();
        assert!(reply.contains("\"type\":\"error\""));

        let reply = handle_text_message(r#"{"type":"bogus"}"#).unwrap_or_default();
        assert!(reply.contains("\"type\":\"error\""));
    }
}
