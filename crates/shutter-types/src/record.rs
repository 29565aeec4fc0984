use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::name::{PhotoName, UserName};

/// A registered user, the parent scope for photos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Resource name, `users/<id>`.
    pub name: UserName,
    /// Human-readable name.
    pub display_name: String,
}

impl User {
    pub fn new(name: UserName, display_name: impl Into<String>) -> Self {
        Self {
            name,
            display_name: display_name.into(),
        }
    }
}

/// Partial update of a user. Fields left as `None` keep their value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub display_name: Option<String>,
}

impl UserPatch {
    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
    }

    /// Apply the patch to a user record, producing the updated record.
    pub fn apply(&self, mut user: User) -> User {
        if let Some(display_name) = &self.display_name {
            user.display_name = display_name.clone();
        }
        user
    }
}

/// A photo record in a user's album.
///
/// The record carries only identity and ordering attributes; the media
/// bytes live in the media store under the photo's name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Resource name, `users/<id>/photos/<id>`.
    pub name: PhotoName,
    /// Human-readable name, one of the listing order keys.
    pub display_name: String,
    /// Creation time, the other listing order key.
    pub created_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(
        name: PhotoName,
        display_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            display_name: display_name.into(),
            created_at,
        }
    }
}
