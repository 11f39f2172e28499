//! WebSocket handler for realtime clients
//!
//! Every frame is an `{event, payload}` envelope. Clients subscribe to rooms
//! with `roomJoin`; the server pushes room broadcasts back the same way.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};

use crate::application::ports::outbound::ROOM_JOIN_EVENT;
use crate::infrastructure::rooms::{ClientId, RoomHub};
use crate::infrastructure::state::AppState;

pub const ROOM_LEAVE_EVENT: &str = "roomLeave";
pub const PING_EVENT: &str = "ping";
pub const PONG_EVENT: &str = "pong";
pub const ERROR_EVENT: &str = "error";

/// Event sent by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientEvent {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

impl ClientEvent {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

/// Event pushed to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEvent {
    pub event: String,
    pub payload: Value,
}

impl ServerEvent {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::new(
            ERROR_EVENT,
            serde_json::json!({ "code": code, "message": message.into() }),
        )
    }
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let client_id = ClientId::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    state.rooms.write().await.register(client_id, tx.clone());

    tracing::info!("New WebSocket connection established: {}", client_id);

    // Forward messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&event) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let reply = match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => handle_client_event(&state.rooms, client_id, event).await,
                    Err(e) => {
                        tracing::warn!("Failed to parse message: {}", e);
                        Some(ServerEvent::error(
                            "PARSE_ERROR",
                            format!("Invalid message format: {}", e),
                        ))
                    }
                };
                if let Some(reply) = reply {
                    if tx.send(reply).is_err() {
                        break;
                    }
                }
            }
            Ok(Message::Close(_)) => {
                tracing::info!("WebSocket connection closed by client: {}", client_id);
                break;
            }
            Err(e) => {
                tracing::error!("WebSocket error for client {}: {}", client_id, e);
                break;
            }
            _ => {}
        }
    }

    let rooms = state.rooms.write().await.disconnect(client_id);
    if !rooms.is_empty() {
        tracing::info!("Client {} left rooms {:?}", client_id, rooms);
    }

    send_task.abort();

    tracing::info!("WebSocket connection terminated: {}", client_id);
}

/// Apply a client event to the hub, returning a direct reply if any
pub async fn handle_client_event(
    rooms: &RwLock<RoomHub>,
    client_id: ClientId,
    event: ClientEvent,
) -> Option<ServerEvent> {
    match event.event.as_str() {
        ROOM_JOIN_EVENT => {
            let Some(room) = event.payload.as_str() else {
                return Some(ServerEvent::error("INVALID_ROOM", "Room must be a string"));
            };
            match rooms.write().await.join(client_id, room) {
                Ok(true) => {
                    tracing::info!("Client {} joined room {}", client_id, room);
                    None
                }
                Ok(false) => None,
                Err(e) => Some(ServerEvent::error("INVALID_ROOM", e.to_string())),
            }
        }
        ROOM_LEAVE_EVENT => {
            if let Some(room) = event.payload.as_str() {
                rooms.write().await.leave(client_id, room);
            }
            None
        }
        PING_EVENT => Some(ServerEvent::new(PONG_EVENT, Value::Null)),
        other => {
            tracing::debug!("Ignoring event {} from client {}", other, client_id);
            None
        }
    }
}
