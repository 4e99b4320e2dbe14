//! Profile store.
//!
//! Loads and saves the signed-in user's delivery profile. A user who has
//! never saved one simply has no row - that is an empty state, not an
//! error, and the profile page starts from a blank draft.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::{Result, StoreError};
use crate::models::{Profile, ProfileDraft};
use crate::remote::DataService;
use crate::session::SessionHandle;

/// Store for the current user's profile.
#[derive(Clone)]
pub struct ProfileStore {
    remote: Arc<dyn DataService>,
    session: SessionHandle,
}

impl ProfileStore {
    /// Create a store over the given data service and session.
    #[must_use]
    pub fn new(remote: Arc<dyn DataService>, session: SessionHandle) -> Self {
        Self { remote, session }
    }

    /// Fetch the current user's profile, if they have saved one.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unauthenticated`] without a session,
    /// [`StoreError::Remote`] on fetch failure.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Option<Profile>> {
        let identity = self
            .session
            .current_user()
            .ok_or(StoreError::Unauthenticated)?;
        let profile = self.remote.fetch_profile(&identity.user_id).await?;
        debug!(found = profile.is_some(), "Profile loaded");
        Ok(profile)
    }

    /// Save the draft as the current user's profile (insert or replace).
    ///
    /// # Errors
    ///
    /// [`StoreError::Unauthenticated`] without a session,
    /// [`StoreError::Remote`] on write failure.
    #[instrument(skip_all)]
    pub async fn save(&self, draft: ProfileDraft) -> Result<Profile> {
        let identity = self
            .session
            .current_user()
            .ok_or(StoreError::Unauthenticated)?;
        let profile = draft.into_profile(identity.user_id);
        self.remote.upsert_profile(&profile).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use woodnook_core::{Email, Role, UserId};

    use crate::models::Identity;
    use crate::remote::MemoryDataService;

    use super::*;

    fn signed_in_session() -> SessionHandle {
        let session = SessionHandle::new();
        session.sign_in(Identity {
            user_id: UserId::new("u-1"),
            email: Email::parse("shopper@example.com").unwrap(),
            role: Role::Customer,
        });
        session
    }

    #[tokio::test]
    async fn absent_profile_is_an_empty_state() {
        let store = ProfileStore::new(Arc::new(MemoryDataService::new()), signed_in_session());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = ProfileStore::new(Arc::new(MemoryDataService::new()), signed_in_session());

        let saved = store
            .save(ProfileDraft {
                full_name: "Asha Rao".to_owned(),
                address: "12 Teak Lane".to_owned(),
                phone: "+91 98765 43210".to_owned(),
            })
            .await
            .unwrap();
        assert_eq!(saved.user_id, UserId::new("u-1"));

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.full_name, "Asha Rao");
        assert_eq!(loaded.phone, "+91 98765 43210");
    }

    #[tokio::test]
    async fn anonymous_access_is_rejected() {
        let store = ProfileStore::new(Arc::new(MemoryDataService::new()), SessionHandle::new());
        assert!(matches!(
            store.load().await.unwrap_err(),
            StoreError::Unauthenticated
        ));
    }
}
