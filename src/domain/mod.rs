//! Domain layer - Core sheet data with no external dependencies
//!
//! This layer contains:
//! - Entities: player records, environment config, player notes
//! - Value Objects: identifiers, sessions, dice results, toasts

pub mod entities;
pub mod value_objects;
