use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Characters permitted inside a resource id segment.
fn valid_id(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resource name of a user: `users/<id>`.
///
/// A `UserName` is the scope under which photos are created and listed.
/// Names are validated on parse and immutable afterwards.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Mint a fresh user name with a UUIDv7 id.
    pub fn mint() -> Self {
        Self(format!("users/{}", Uuid::now_v7().simple()))
    }

    /// Parse and validate a user name.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        match s.split('/').collect::<Vec<_>>().as_slice() {
            ["users", id] if valid_id(id) => Ok(Self(s.to_string())),
            _ => Err(TypeError::InvalidName(s.to_string())),
        }
    }

    /// Build a user name from a bare id segment.
    pub fn from_id(id: &str) -> Result<Self, TypeError> {
        Self::parse(&format!("users/{id}"))
    }

    /// The id segment of the name.
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// The full resource name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserName({})", self.0)
    }
}

/// Resource name of a photo: `users/<id>/photos/<id>`.
///
/// Photos live under a user scope; [`PhotoName::parent`] recovers it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhotoName(String);

impl PhotoName {
    /// Mint a fresh photo name under `parent` with a UUIDv7 id.
    pub fn mint(parent: &UserName) -> Self {
        Self(format!("{}/photos/{}", parent.as_str(), Uuid::now_v7().simple()))
    }

    /// Parse and validate a photo name.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        match s.split('/').collect::<Vec<_>>().as_slice() {
            ["users", uid, "photos", pid] if valid_id(uid) && valid_id(pid) => {
                Ok(Self(s.to_string()))
            }
            _ => Err(TypeError::InvalidName(s.to_string())),
        }
    }

    /// Build a photo name from bare id segments.
    pub fn from_ids(user_id: &str, photo_id: &str) -> Result<Self, TypeError> {
        Self::parse(&format!("users/{user_id}/photos/{photo_id}"))
    }

    /// The user scope this photo belongs to.
    pub fn parent(&self) -> UserName {
        let mut parts = self.0.split('/');
        let prefix = parts.next().unwrap_or_default();
        let id = parts.next().unwrap_or_default();
        UserName(format!("{prefix}/{id}"))
    }

    /// The photo id segment of the name.
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// The full resource name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem-safe transform of the name, used as the stem of the
    /// committed media file. Path separators collapse to `-`.
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect()
    }
}

impl fmt::Display for PhotoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PhotoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhotoName({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // UserName
    // -----------------------------------------------------------------------

    #[test]
    fn minted_user_name_parses() {
        let name = UserName::mint();
        let parsed = UserName::parse(name.as_str()).unwrap();
        assert_eq!(name, parsed);
    }

    #[test]
    fn user_name_rejects_malformed() {
        for bad in ["", "users", "users/", "people/abc", "users/a/b", "users/a b"] {
            assert!(UserName::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn user_name_id_segment() {
        let name = UserName::from_id("abc123").unwrap();
        assert_eq!(name.id(), "abc123");
        assert_eq!(name.as_str(), "users/abc123");
    }

    #[test]
    fn minted_user_names_are_unique() {
        assert_ne!(UserName::mint(), UserName::mint());
    }

    // -----------------------------------------------------------------------
    // PhotoName
    // -----------------------------------------------------------------------

    #[test]
    fn minted_photo_name_parses_under_parent() {
        let user = UserName::from_id("u1").unwrap();
        let photo = PhotoName::mint(&user);
        let parsed = PhotoName::parse(photo.as_str()).unwrap();
        assert_eq!(photo, parsed);
        assert_eq!(photo.parent(), user);
    }

    #[test]
    fn photo_name_rejects_malformed() {
        for bad in [
            "",
            "users/a",
            "users/a/photos",
            "users/a/photos/",
            "users//photos/p",
            "users/a/albums/p",
            "users/a/photos/p/extra",
        ] {
            assert!(PhotoName::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn photo_name_ids() {
        let name = PhotoName::from_ids("u1", "p1").unwrap();
        assert_eq!(name.id(), "p1");
        assert_eq!(name.parent().id(), "u1");
    }

    #[test]
    fn file_stem_is_filesystem_safe() {
        let name = PhotoName::from_ids("u1", "p1").unwrap();
        let stem = name.file_stem();
        assert_eq!(stem, "users-u1-photos-p1");
        assert!(!stem.contains('/'));
    }

    #[test]
    fn serde_uses_plain_strings() {
        let name = PhotoName::from_ids("u1", "p1").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"users/u1/photos/p1\"");
        let back: PhotoName = serde_json::from_str(&json).unwrap();
        assert_eq!(name, back);
    }
}
