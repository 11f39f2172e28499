//! In-process realtime transport
//!
//! Connects callers living in the same process to the [`RoomHub`] the
//! WebSocket endpoint uses, through the same event handling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};

use crate::application::ports::outbound::{
    Connection, EventHandler, RealtimeTransport, TransportError,
};
use crate::infrastructure::rooms::{ClientId, RoomHub};
use crate::infrastructure::websocket::{handle_client_event, ClientEvent, ServerEvent};

type SharedHandler = Arc<dyn Fn(Value) + Send + Sync>;

#[derive(Default)]
struct Handlers {
    by_event: Mutex<HashMap<String, Vec<SharedHandler>>>,
}

impl Handlers {
    fn add(&self, event: &str, handler: EventHandler) {
        let mut by_event = self.by_event.lock().unwrap_or_else(|e| e.into_inner());
        by_event
            .entry(event.to_string())
            .or_default()
            .push(Arc::from(handler));
    }

    fn dispatch(&self, event: ServerEvent) {
        // Handlers run outside the lock so they may register more handlers
        let handlers = {
            let by_event = self.by_event.lock().unwrap_or_else(|e| e.into_inner());
            by_event.get(&event.event).cloned().unwrap_or_default()
        };
        for handler in handlers {
            handler(event.payload.clone());
        }
    }
}

pub struct LocalConnection {
    client_id: ClientId,
    inbound: Mutex<Option<mpsc::UnboundedSender<ClientEvent>>>,
    handlers: Arc<Handlers>,
    closed: AtomicBool,
}

impl Connection for LocalConnection {
    fn id(&self) -> uuid::Uuid {
        self.client_id.as_uuid()
    }

    fn emit(&self, event: &str, payload: Value) -> Result<(), TransportError> {
        let inbound = self.inbound.lock().unwrap_or_else(|e| e.into_inner());
        let Some(sender) = inbound.as_ref() else {
            return Err(TransportError::Closed);
        };
        sender
            .send(ClientEvent::new(event, payload))
            .map_err(|_| TransportError::Closed)
    }

    fn on(&self, event: &str, handler: EventHandler) {
        self.handlers.add(event, handler);
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        // Dropping the sender ends the pump task, which leaves every room
        self.inbound
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct LocalTransport {
    rooms: Arc<RwLock<RoomHub>>,
}

impl LocalTransport {
    pub fn new(rooms: Arc<RwLock<RoomHub>>) -> Self {
        Self { rooms }
    }
}

#[async_trait]
impl RealtimeTransport for LocalTransport {
    async fn connect(&self) -> Result<Arc<dyn Connection>, TransportError> {
        let client_id = ClientId::new();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ServerEvent>();
        let (inbound_tx, mut inbound_rx) = mpsc::unbounded_channel::<ClientEvent>();
        self.rooms
            .write()
            .await
            .register(client_id, outbound_tx.clone());

        let handlers = Arc::new(Handlers::default());
        let connection = Arc::new(LocalConnection {
            client_id,
            inbound: Mutex::new(Some(inbound_tx)),
            handlers: handlers.clone(),
            closed: AtomicBool::new(false),
        });

        let rooms = self.rooms.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    inbound = inbound_rx.recv() => match inbound {
                        Some(event) => {
                            let reply = handle_client_event(&rooms, client_id, event).await;
                            if let Some(reply) = reply {
                                let _ = outbound_tx.send(reply);
                            }
                        }
                        None => break,
                    },
                    Some(event) = outbound_rx.recv() => handlers.dispatch(event),
                }
            }
            rooms.write().await.disconnect(client_id);
            tracing::debug!("Local connection {} released", client_id);
        });

        tracing::debug!("Local connection {} established", client_id);
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::services::{
        AdminPage, JoinState, PageDataPayload, RoomJoinCoordinator, ToastQueue, ADMIN_ROOM,
    };

    async fn wait_for_members(rooms: &RwLock<RoomHub>, room: &str, expected: usize) {
        for _ in 0..100 {
            if rooms.read().await.member_count(room) == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("room {} never reached {} members", room, expected);
    }

    #[tokio::test]
    async fn test_coordinator_joins_admin_room() {
        let rooms = Arc::new(RwLock::new(RoomHub::new()));
        let coordinator = RoomJoinCoordinator::new(
            Arc::new(LocalTransport::new(rooms.clone())),
            ADMIN_ROOM,
            ToastQueue::new(),
        );

        let connection = coordinator.connect().await.unwrap();
        wait_for_members(&rooms, ADMIN_ROOM, 1).await;
        assert_eq!(coordinator.state(), JoinState::Joined);

        let (tx, mut rx) = mpsc::unbounded_channel();
        connection.on(
            "environmentChange",
            Box::new(move |payload| {
                let _ = tx.send(payload);
            }),
        );

        let event = ServerEvent::new("environmentChange", serde_json::json!({ "value": "combat" }));
        assert_eq!(rooms.read().await.broadcast(ADMIN_ROOM, &event), 1);

        let received = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received, serde_json::json!({ "value": "combat" }));
    }

    #[tokio::test]
    async fn test_close_leaves_rooms() {
        let rooms = Arc::new(RwLock::new(RoomHub::new()));
        let transport = LocalTransport::new(rooms.clone());

        let connection = transport.connect().await.unwrap();
        connection
            .emit("roomJoin", Value::String(ADMIN_ROOM.to_string()))
            .unwrap();
        wait_for_members(&rooms, ADMIN_ROOM, 1).await;

        connection.close();
        assert!(connection.is_closed());
        assert!(matches!(
            connection.emit("roomJoin", Value::Null),
            Err(TransportError::Closed)
        ));
        wait_for_members(&rooms, ADMIN_ROOM, 0).await;
    }

    #[tokio::test]
    async fn test_page_follows_joined_socket() {
        let rooms = Arc::new(RwLock::new(RoomHub::new()));
        let toasts = ToastQueue::new();
        let coordinator = RoomJoinCoordinator::new(
            Arc::new(LocalTransport::new(rooms.clone())),
            ADMIN_ROOM,
            toasts.clone(),
        );
        let page = AdminPage::new(toasts.clone()).with_socket(coordinator.subscribe());
        assert!(!page.compose(&PageDataPayload::default()).live);

        coordinator.connect().await.unwrap();

        assert!(page.compose(&PageDataPayload::default()).live);
        assert!(page.context().emit("diceResult", serde_json::json!({ "num": 1, "roll": 20 })));

        coordinator.close();
        assert!(!page.compose(&PageDataPayload::default()).live);
        assert!(!page.context().emit("diceResult", Value::Null));
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn test_closed_connection_is_replaced_on_connect() {
        let rooms = Arc::new(RwLock::new(RoomHub::new()));
        let toasts = ToastQueue::new();
        let coordinator = RoomJoinCoordinator::new(
            Arc::new(LocalTransport::new(rooms.clone())),
            ADMIN_ROOM,
            toasts.clone(),
        );
        let page = AdminPage::new(toasts.clone()).with_socket(coordinator.subscribe());

        let first = coordinator.connect().await.unwrap();
        wait_for_members(&rooms, ADMIN_ROOM, 1).await;

        // Released from the transport side, behind the coordinator's back
        first.close();
        wait_for_members(&rooms, ADMIN_ROOM, 0).await;
        assert_eq!(coordinator.state(), JoinState::Disconnected);
        assert!(!page.compose(&PageDataPayload::default()).live);

        let second = coordinator.connect().await.unwrap();
        assert_ne!(second.id(), first.id());
        assert!(!second.is_closed());
        assert_eq!(coordinator.state(), JoinState::Joined);
        wait_for_members(&rooms, ADMIN_ROOM, 1).await;
        assert!(page.compose(&PageDataPayload::default()).live);
        assert!(page.context().emit("diceResult", Value::Null));
        assert!(toasts.is_empty());
    }
}
