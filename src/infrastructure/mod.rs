//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite and in-memory adapters for sheets and sessions
//! - HTTP: admin page and admin API routes
//! - WebSocket: realtime rooms for connected clients
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod local_transport;
pub mod persistence;
pub mod rooms;
pub mod state;
pub mod websocket;
