//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP/WebSocket) can
//! serialize/deserialize without pulling serde into the domain model.

pub mod head;
pub mod page_data;

pub use head::DocumentHead;
pub use page_data::{NoteDto, PageDataDto, PlayerName};
