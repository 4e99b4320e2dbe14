//! Profile domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use woodnook_core::UserId;

/// A user's delivery profile, keyed by user id in the `profiles` table.
///
/// A user with no profile row is a valid state - the profile page starts
/// from an empty draft, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub updated_at: DateTime<Utc>,
}

/// Editable profile fields, as submitted from the profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub full_name: String,
    pub address: String,
    pub phone: String,
}

impl ProfileDraft {
    /// Materialize the draft into a row for the current user, stamping
    /// `updated_at` with the current time.
    #[must_use]
    pub fn into_profile(self, user_id: UserId) -> Profile {
        Profile {
            user_id,
            full_name: self.full_name,
            address: self.address,
            phone: self.phone,
            updated_at: Utc::now(),
        }
    }
}

impl From<Profile> for ProfileDraft {
    fn from(profile: Profile) -> Self {
        Self {
            full_name: profile.full_name,
            address: profile.address,
            phone: profile.phone,
        }
    }
}
