//! Free-text annotations kept per player

use crate::domain::value_objects::PlayerId;

/// At most one note exists per player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerNote {
    pub player_id: PlayerId,
    pub value: String,
}
