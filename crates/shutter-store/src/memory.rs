use std::collections::HashMap;
use std::sync::RwLock;

use shutter_types::{Photo, PhotoName, User, UserName};

use crate::error::{StoreError, StoreResult};
use crate::traits::AlbumStore;

/// In-memory, HashMap-based album store.
///
/// All records are held behind a single `RwLock` for safe concurrent
/// access; records are cloned on read. Intended for tests, demos, and
/// single-process deployments.
pub struct InMemoryAlbumStore {
    inner: RwLock<AlbumState>,
}

#[derive(Default)]
struct AlbumState {
    users: HashMap<UserName, User>,
    photos: HashMap<UserName, Vec<Photo>>,
}

impl InMemoryAlbumStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(AlbumState::default()),
        }
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").users.len()
    }

    /// Number of photo records across all scopes.
    pub fn photo_count(&self) -> usize {
        self.inner
            .read()
            .expect("lock poisoned")
            .photos
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Remove all records.
    pub fn clear(&self) {
        let mut state = self.inner.write().expect("lock poisoned");
        state.users.clear();
        state.photos.clear();
    }
}

impl Default for InMemoryAlbumStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlbumStore for InMemoryAlbumStore {
    fn create_user(&self, user: User) -> StoreResult<()> {
        let mut state = self.inner.write().expect("lock poisoned");
        state.users.insert(user.name.clone(), user);
        Ok(())
    }

    fn get_user(&self, name: &UserName) -> StoreResult<Option<User>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state.users.get(name).cloned())
    }

    fn update_user(&self, user: User) -> StoreResult<()> {
        let mut state = self.inner.write().expect("lock poisoned");
        match state.users.get_mut(&user.name) {
            Some(existing) => {
                *existing = user;
                Ok(())
            }
            None => Err(StoreError::UserNotFound(user.name)),
        }
    }

    fn add_photo(&self, photo: Photo) -> StoreResult<()> {
        let scope = photo.name.parent();
        let mut state = self.inner.write().expect("lock poisoned");
        if !state.users.contains_key(&scope) {
            return Err(StoreError::UserNotFound(scope));
        }
        state.photos.entry(scope).or_default().push(photo);
        Ok(())
    }

    fn get_photo(&self, name: &PhotoName) -> StoreResult<Option<Photo>> {
        let scope = name.parent();
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .photos
            .get(&scope)
            .and_then(|photos| photos.iter().find(|p| p.name == *name).cloned()))
    }

    fn delete_photo(&self, name: &PhotoName) -> StoreResult<bool> {
        let scope = name.parent();
        let mut state = self.inner.write().expect("lock poisoned");
        let Some(photos) = state.photos.get_mut(&scope) else {
            return Ok(false);
        };
        let before = photos.len();
        photos.retain(|p| p.name != *name);
        Ok(photos.len() < before)
    }

    fn photos_of(&self, scope: &UserName) -> StoreResult<Vec<Photo>> {
        let state = self.inner.read().expect("lock poisoned");
        if !state.users.contains_key(scope) {
            return Err(StoreError::UserNotFound(scope.clone()));
        }
        Ok(state.photos.get(scope).cloned().unwrap_or_default())
    }
}

impl std::fmt::Debug for InMemoryAlbumStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAlbumStore")
            .field("user_count", &self.user_count())
            .field("photo_count", &self.photo_count())
            .finish()
    }
}
