//! Client session state.
//!
//! At most one identity is active per running client. The handle is an
//! explicit object injected into the stores that need it - there is no
//! ambient global. Created at startup, populated when the hosted auth
//! service reports a sign-in, cleared at sign-out.

use std::sync::{Arc, RwLock};

use tracing::info;

pub use crate::models::Identity;

/// Shared handle to the current session.
///
/// Cheap to clone; all clones observe the same identity. Reads are
/// synchronous - gating checks happen before any remote call is issued.
#[derive(Clone, Default)]
pub struct SessionHandle {
    current: Arc<RwLock<Option<Identity>>>,
}

impl SessionHandle {
    /// Create a handle with no one signed in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current identity, if someone is signed in.
    #[must_use]
    pub fn current_user(&self) -> Option<Identity> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            // A poisoned lock only means a panicking writer; the session is
            // unusable either way, so report anonymous.
            Err(_) => None,
        }
    }

    /// Record a sign-in reported by the auth service.
    pub fn sign_in(&self, identity: Identity) {
        info!(user_id = %identity.user_id, "Session started");
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(identity);
        }
    }

    /// Clear the session. Stores holding per-user state clear theirs in turn.
    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.current.write()
            && let Some(identity) = guard.take()
        {
            info!(user_id = %identity.user_id, "Session ended");
        }
    }
}
