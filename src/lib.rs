//! Sunflower Sheet - Backend for the Sunflower RPG character sheet
//!
//! The server binary is a thin wrapper around this library. Embedding
//! callers get the same pieces:
//! - `application::services` for the session gate, dashboard aggregation,
//!   room join coordination and page composition
//! - `infrastructure::local_transport` to join rooms in-process
//! - `infrastructure::http::create_routes` to mount the dashboard routes

pub mod application;
pub mod domain;
pub mod infrastructure;
