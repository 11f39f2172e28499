//! Realtime rooms
//!
//! Tracks connected realtime clients and the named rooms they joined, so
//! that events can be broadcast to everyone in a room (e.g. `admin`).

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::infrastructure::websocket::ServerEvent;

/// Unique identifier for a connected client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(uuid::Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> uuid::Uuid {
        self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("Client {0} is not connected")]
    UnknownClient(ClientId),
    #[error("Room name cannot be empty")]
    EmptyRoomName,
}

#[derive(Debug)]
struct ConnectedClient {
    sender: mpsc::UnboundedSender<ServerEvent>,
    rooms: HashSet<String>,
    connected_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct RoomHub {
    clients: HashMap<ClientId, ConnectedClient>,
    rooms: HashMap<String, HashSet<ClientId>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, client_id: ClientId, sender: mpsc::UnboundedSender<ServerEvent>) {
        self.clients.insert(
            client_id,
            ConnectedClient {
                sender,
                rooms: HashSet::new(),
                connected_at: Utc::now(),
            },
        );
    }

    /// Add a client to a room; returns false if it was already a member
    pub fn join(&mut self, client_id: ClientId, room: &str) -> Result<bool, RoomError> {
        if room.is_empty() {
            return Err(RoomError::EmptyRoomName);
        }
        let client = self
            .clients
            .get_mut(&client_id)
            .ok_or(RoomError::UnknownClient(client_id))?;

        if !client.rooms.insert(room.to_string()) {
            return Ok(false);
        }
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(client_id);
        Ok(true)
    }

    pub fn leave(&mut self, client_id: ClientId, room: &str) -> bool {
        let Some(client) = self.clients.get_mut(&client_id) else {
            return false;
        };
        if !client.rooms.remove(room) {
            return false;
        }
        self.drop_member(room, client_id);
        true
    }

    /// Forget a client and remove it from every room it joined
    pub fn disconnect(&mut self, client_id: ClientId) -> Vec<String> {
        let Some(client) = self.clients.remove(&client_id) else {
            return Vec::new();
        };
        let mut rooms: Vec<String> = client.rooms.into_iter().collect();
        rooms.sort();
        for room in &rooms {
            self.drop_member(room, client_id);
        }
        tracing::debug!(
            "Client {} disconnected after {}s",
            client_id,
            (Utc::now() - client.connected_at).num_seconds()
        );
        rooms
    }

    /// Send an event to every member of a room; returns how many received it
    pub fn broadcast(&self, room: &str, event: &ServerEvent) -> usize {
        let Some(members) = self.rooms.get(room) else {
            return 0;
        };
        let mut delivered = 0;
        for client_id in members {
            let Some(client) = self.clients.get(client_id) else {
                continue;
            };
            match client.sender.send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to send event to client {}: {}", client_id, e),
            }
        }
        delivered
    }

    pub fn member_count(&self, room: &str) -> usize {
        self.rooms.get(room).map_or(0, HashSet::len)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    fn drop_member(&mut self, room: &str, client_id: ClientId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(&client_id);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }
}
