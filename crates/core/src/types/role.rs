//! Authorization roles.

use serde::{Deserialize, Serialize};

/// Role claim attached to an authenticated identity.
///
/// Issued by the hosted auth service; the storefront only reads it. Admin
/// checks are made against this claim, never against a hardcoded email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular shopper.
    #[default]
    Customer,
    /// May create and delete products.
    Admin,
}

impl Role {
    /// Whether this role grants admin catalog access.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Customer.is_admin());
    }

    #[test]
    fn serde_uses_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let back: Role = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(back, Role::Customer);
    }
}
