//! Authenticated identity.

use serde::{Deserialize, Serialize};

use woodnook_core::{Email, Role, UserId};

/// The identity the hosted auth service established for this client.
///
/// Sign-in and sign-out themselves are the auth service's concern; the
/// storefront only reads the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: Email,
    /// Role claim issued with the session token.
    pub role: Role,
}

impl Identity {
    /// Whether this identity may use the admin catalog operations.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
