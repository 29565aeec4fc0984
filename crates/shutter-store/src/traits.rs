use shutter_types::{Photo, PhotoFormat, PhotoName, User, UserName};

use crate::error::StoreResult;

/// Keyed collections of users and photos.
///
/// All implementations must satisfy these invariants:
/// - Each key (user name, photo name) supports atomic create/read/update;
///   concurrent callers on different keys never observe torn state.
/// - Photo collections preserve insertion order per scope.
/// - Operations that take a scope fail with `UserNotFound` when the scope
///   does not resolve, rather than inventing an empty collection.
pub trait AlbumStore: Send + Sync {
    /// Insert or replace a user record, keyed by its name.
    fn create_user(&self, user: User) -> StoreResult<()>;

    /// Read a user record. Returns `Ok(None)` if the user does not exist.
    fn get_user(&self, name: &UserName) -> StoreResult<Option<User>>;

    /// Replace an existing user record.
    ///
    /// Fails with `UserNotFound` if no record exists under the name.
    fn update_user(&self, user: User) -> StoreResult<()>;

    /// Append a photo record to its parent's collection.
    ///
    /// Fails with `UserNotFound` if the parent scope is unknown.
    fn add_photo(&self, photo: Photo) -> StoreResult<()>;

    /// Read a photo record. Returns `Ok(None)` if it does not exist.
    fn get_photo(&self, name: &PhotoName) -> StoreResult<Option<Photo>>;

    /// Remove a photo record. Returns `true` if the record existed.
    fn delete_photo(&self, name: &PhotoName) -> StoreResult<bool>;

    /// The insertion-ordered photo collection of a scope.
    ///
    /// Fails with `UserNotFound` if the scope is unknown. A known scope
    /// with no photos yields an empty collection.
    fn photos_of(&self, scope: &UserName) -> StoreResult<Vec<Photo>>;
}

/// Committed media bytes, one immutable object per photo name.
pub trait MediaStore: Send + Sync {
    /// Write a committed object in a single operation.
    fn put(&self, name: &PhotoName, format: PhotoFormat, data: &[u8]) -> StoreResult<()>;

    /// Read a committed object back. Returns `Ok(None)` if absent.
    fn get(&self, name: &PhotoName) -> StoreResult<Option<(PhotoFormat, Vec<u8>)>>;
}
