//! Outbound ports - Interfaces that the application requires from external systems

mod realtime_port;
mod repository_port;
mod session_store_port;

pub use realtime_port::{
    Connection, EventHandler, RealtimeTransport, TransportError, ROOM_JOIN_EVENT,
};
pub use repository_port::{AdminReadRepositoryPort, AdminWriteRepositoryPort, RepositoryError};
pub use session_store_port::{SessionStoreError, SessionStorePort};
