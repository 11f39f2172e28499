//! Room join coordination
//!
//! Connects to the realtime transport and joins a room before anything else
//! gets to see the connection. Dependents follow the published handle
//! through a watch channel, so a connection that has not joined yet is never
//! observable.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::application::ports::outbound::{
    Connection, RealtimeTransport, TransportError, ROOM_JOIN_EVENT,
};
use crate::application::services::page_composer::{SocketWatch, ToastQueue};
use crate::domain::value_objects::Toast;

/// Room joined by the admin dashboard
pub const ADMIN_ROOM: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinState {
    Disconnected,
    Connecting,
    Joined,
}

pub struct RoomJoinCoordinator {
    transport: Arc<dyn RealtimeTransport>,
    room: String,
    toasts: ToastQueue,
    state: watch::Sender<JoinState>,
    published: watch::Sender<Option<Arc<dyn Connection>>>,
}

impl RoomJoinCoordinator {
    pub fn new(
        transport: Arc<dyn RealtimeTransport>,
        room: impl Into<String>,
        toasts: ToastQueue,
    ) -> Self {
        let (state, _) = watch::channel(JoinState::Disconnected);
        let (published, _) = watch::channel(None);
        Self {
            transport,
            room: room.into(),
            toasts,
            state,
            published,
        }
    }

    /// Current state; a joined connection closed by the transport counts as disconnected
    pub fn state(&self) -> JoinState {
        let state = *self.state.borrow();
        match self.published.borrow().as_ref() {
            Some(connection) if state == JoinState::Joined && connection.is_closed() => {
                JoinState::Disconnected
            }
            _ => state,
        }
    }

    /// Receiver that yields the joined connection, or `None` while disconnected
    pub fn subscribe(&self) -> SocketWatch {
        self.published.subscribe()
    }

    pub fn connection(&self) -> Option<Arc<dyn Connection>> {
        self.published.borrow().clone()
    }

    /// Connect and join the room.
    ///
    /// Failures are reported through the toast queue and leave the
    /// coordinator disconnected; the page keeps working without live updates.
    pub async fn connect(&self) -> Result<Arc<dyn Connection>, TransportError> {
        if let Some(connection) = self.connection() {
            if !connection.is_closed() {
                return Ok(connection);
            }
            debug!(
                connection_id = %connection.id(),
                "Published connection was closed, reconnecting"
            );
            self.close();
        }

        self.state.send_replace(JoinState::Connecting);
        match self.transport.connect().await {
            Ok(connection) => self.attach(connection),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Join the room on an established connection and publish it.
    ///
    /// Attaching the connection that is already published does nothing, so
    /// each connection object emits the join exactly once.
    pub fn attach(
        &self,
        connection: Arc<dyn Connection>,
    ) -> Result<Arc<dyn Connection>, TransportError> {
        if let Some(current) = self.connection() {
            if current.id() == connection.id() {
                debug!(connection_id = %current.id(), "Connection already joined, skipping");
                return Ok(current);
            }
            current.close();
        }

        self.state.send_replace(JoinState::Connecting);
        if let Err(e) = connection.emit(ROOM_JOIN_EVENT, Value::String(self.room.clone())) {
            connection.close();
            return Err(self.fail(e));
        }

        info!(connection_id = %connection.id(), room = %self.room, "Joined room");
        self.state.send_replace(JoinState::Joined);
        self.published.send_replace(Some(connection.clone()));
        Ok(connection)
    }

    /// Close the published connection, if any
    pub fn close(&self) {
        if let Some(connection) = self.published.send_replace(None) {
            debug!(connection_id = %connection.id(), "Closing realtime connection");
            connection.close();
        }
        self.state.send_replace(JoinState::Disconnected);
    }

    fn fail(&self, error: TransportError) -> TransportError {
        warn!(room = %self.room, "Realtime connection failed: {}", error);
        self.toasts.push(Toast::error(format!(
            "Não foi possível conectar ao servidor em tempo real: {}",
            error
        )));
        self.published.send_replace(None);
        self.state.send_replace(JoinState::Disconnected);
        error
    }
}

impl Drop for RoomJoinCoordinator {
    fn drop(&mut self) {
        self.close();
    }
}
