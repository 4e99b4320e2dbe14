//! Unified error handling for store operations.
//!
//! Every store operation returns `Result<T, StoreError>`. Nothing here is
//! fatal: a failed operation leaves the store's previous state intact, and
//! callers surface the error as a notification.

use thiserror::Error;

use crate::remote::RemoteError;

/// Operation-boundary error type for the storefront stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote data service call failed; prior local state is retained.
    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteError),

    /// Input was rejected before any remote call was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A mutation was attempted without an active session.
    #[error("Not signed in")]
    Unauthenticated,

    /// The identity lacks the role the operation requires.
    #[error("Not permitted")]
    Forbidden,

    /// A catalog load was displaced by a newer one; its response was discarded.
    #[error("Load superseded by a newer request")]
    Superseded,
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_convert_via_from() {
        let remote = RemoteError::Api {
            status: 503,
            message: "unavailable".to_owned(),
        };
        let err = StoreError::from(remote);
        assert!(matches!(err, StoreError::Remote(_)));
    }

    #[test]
    fn display_messages() {
        assert_eq!(StoreError::Unauthenticated.to_string(), "Not signed in");
        assert_eq!(
            StoreError::NotFound("line li-9".to_owned()).to_string(),
            "Not found: line li-9"
        );
    }
}
