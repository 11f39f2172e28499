//! Session gate - decides whether a request may see admin data

use serde::Serialize;

use crate::application::services::PageDataPayload;
use crate::domain::value_objects::{PlayerId, Session};

/// Where unauthorized visitors are sent
pub const LOGIN_DESTINATION: &str = "/";

/// A redirect instruction; `permanent: false` must not be cached by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub destination: String,
    pub permanent: bool,
}

impl Redirect {
    pub fn temporary(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            permanent: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Not an admin; the page receives the empty payload only
    Redirect {
        redirect: Redirect,
        props: PageDataPayload,
    },
    /// Admin session; the actor id is used for the note lookup
    Proceed { actor_id: PlayerId },
}

impl GateDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

/// Admit only admin sessions
pub fn check_admin(session: Option<&Session>) -> GateDecision {
    match session {
        Some(session) if session.is_admin => GateDecision::Proceed {
            actor_id: session.actor_id.clone(),
        },
        _ => GateDecision::Redirect {
            redirect: Redirect::temporary(LOGIN_DESTINATION),
            props: PageDataPayload::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_redirects_home(decision: GateDecision) {
        match decision {
            GateDecision::Redirect { redirect, props } => {
                assert_eq!(redirect.destination, "/");
                assert!(!redirect.permanent);
                assert!(props.environment.is_none());
                assert!(props.players.is_empty());
                assert!(props.notes.is_none());
            }
            GateDecision::Proceed { .. } => panic!("Expected redirect"),
        }
    }

    #[test]
    fn test_missing_session_redirects() {
        assert!(check_admin(None).is_redirect());
        assert_redirects_home(check_admin(None));
    }

    #[test]
    fn test_player_session_redirects() {
        let session = Session::player("p7");
        assert_redirects_home(check_admin(Some(&session)));
    }

    #[test]
    fn test_admin_session_proceeds() {
        let session = Session::admin("admin-1");
        assert!(!check_admin(Some(&session)).is_redirect());
        assert_eq!(
            check_admin(Some(&session)),
            GateDecision::Proceed {
                actor_id: PlayerId::new("admin-1")
            }
        );
    }
}
