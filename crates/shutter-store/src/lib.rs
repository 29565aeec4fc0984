//! Storage backends for the Shutter photo-album service.
//!
//! This crate owns the durable collections of the system: user records,
//! per-user photo collections, and the committed media bytes produced by
//! the upload pipeline. It replaces ambient global state with explicit
//! store objects that are constructed once and injected into the service.
//!
//! # Store Boundaries
//!
//! - [`AlbumStore`] — keyed user/photo collections (create/get/update/
//!   delete/append by scope and name)
//! - [`MediaStore`] — committed upload bytes, one object per photo name
//!
//! # Backends
//!
//! - [`InMemoryAlbumStore`] / [`InMemoryMediaStore`] — `HashMap`-based
//!   stores for tests and embedding
//! - [`FsMediaStore`] — one file per committed object, named by the
//!   photo's filesystem-safe stem plus the detected format extension
//!
//! # Design Rules
//!
//! 1. Each key (scope or name) supports atomic create/read/update; no
//!    cross-key transactions are offered.
//! 2. Photo collections preserve insertion order per scope.
//! 3. Media objects are written whole, after validation, never partially.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod media;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use media::{FsMediaStore, InMemoryMediaStore};
pub use memory::InMemoryAlbumStore;
pub use traits::{AlbumStore, MediaStore};
