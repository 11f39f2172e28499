//! Realtime transport port
//!
//! A transport hands out live connections. Connections are rooms-aware on
//! the other end: emitting `roomJoin` with a room name subscribes the
//! connection to that room's broadcasts.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// Event emitted by clients to subscribe to a room
pub const ROOM_JOIN_EVENT: &str = "roomJoin";

#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to connect: {0}")]
    Connect(String),
    #[error("Failed to emit '{event}': {message}")]
    Emit { event: String, message: String },
    #[error("Connection closed")]
    Closed,
}

/// Callback invoked with the payload of a received event
pub type EventHandler = Box<dyn Fn(Value) + Send + Sync>;

/// A live realtime channel
pub trait Connection: Send + Sync {
    /// Identifier of this connection object
    fn id(&self) -> uuid::Uuid;

    /// Fire-and-forget send of an event
    fn emit(&self, event: &str, payload: Value) -> Result<(), TransportError>;

    /// Register a handler for an incoming event
    fn on(&self, event: &str, handler: EventHandler);

    /// Release the connection; later emits fail with [`TransportError::Closed`]
    fn close(&self);

    fn is_closed(&self) -> bool;
}

#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn Connection>, TransportError>;
}
