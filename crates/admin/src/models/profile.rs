//! Profile - user profile with a unique email address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use guava_core::ProfileId;

/// A persisted profile. Email uniqueness is enforced by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Blob reference (stored filename).
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a profile.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    pub password: Option<String>,
}

/// Raw multipart input for profile creation.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    /// Stored filename of an accompanying upload, if any.
    pub profile_picture: Option<String>,
}
