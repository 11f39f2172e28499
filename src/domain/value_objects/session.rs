//! The authenticated actor attached to a request

use crate::domain::value_objects::PlayerId;

/// Session as read from the session store.
///
/// Created at login and destroyed at logout or expiry by whoever owns the
/// store. The engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub actor_id: PlayerId,
    pub is_admin: bool,
}

impl Session {
    pub fn new(actor_id: impl Into<PlayerId>, is_admin: bool) -> Self {
        Self {
            actor_id: actor_id.into(),
            is_admin,
        }
    }

    pub fn admin(actor_id: impl Into<PlayerId>) -> Self {
        Self::new(actor_id, true)
    }

    pub fn player(actor_id: impl Into<PlayerId>) -> Self {
        Self::new(actor_id, false)
    }
}
