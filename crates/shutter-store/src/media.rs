use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use shutter_types::{PhotoFormat, PhotoName};

use crate::error::StoreResult;
use crate::traits::MediaStore;

/// In-memory media store for tests and embedding.
pub struct InMemoryMediaStore {
    objects: RwLock<HashMap<PhotoName, (PhotoFormat, Vec<u8>)>>,
}

impl InMemoryMediaStore {
    /// Create a new empty media store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of committed objects.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaStore for InMemoryMediaStore {
    fn put(&self, name: &PhotoName, format: PhotoFormat, data: &[u8]) -> StoreResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        map.insert(name.clone(), (format, data.to_vec()));
        Ok(())
    }

    fn get(&self, name: &PhotoName) -> StoreResult<Option<(PhotoFormat, Vec<u8>)>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(name).cloned())
    }
}

/// Filesystem media store: one file per committed object.
///
/// Objects land at `<root>/<file_stem>.<extension>`, where the stem is the
/// photo name's filesystem-safe transform and the extension comes from the
/// detected format.
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    /// Open a media store rooted at `root`, creating the directory if
    /// needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory committed objects are written into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &PhotoName, format: PhotoFormat) -> PathBuf {
        self.root
            .join(format!("{}.{}", name.file_stem(), format.extension()))
    }
}

impl MediaStore for FsMediaStore {
    fn put(&self, name: &PhotoName, format: PhotoFormat, data: &[u8]) -> StoreResult<()> {
        let path = self.path_for(name, format);
        fs::write(&path, data)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "committed media object");
        Ok(())
    }

    fn get(&self, name: &PhotoName) -> StoreResult<Option<(PhotoFormat, Vec<u8>)>> {
        // The extension is not recorded anywhere else; probe the known set.
        for format in PhotoFormat::ALL {
            let path = self.path_for(name, format);
            if path.is_file() {
                return Ok(Some((format, fs::read(&path)?)));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for FsMediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsMediaStore")
            .field("root", &self.root)
            .finish()
    }
}
