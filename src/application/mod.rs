//! Application layer - Use cases and ports
//!
//! This layer contains:
//! - Services: session gate, dashboard aggregation, room join, page composition
//! - Ports: repository, session store and realtime transport interfaces
//! - DTOs: serializable page payloads and document head

pub mod dto;
pub mod ports;
pub mod services;
