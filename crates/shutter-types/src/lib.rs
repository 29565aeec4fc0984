//! Foundation types for the Shutter photo-album service.
//!
//! This crate provides the resource naming, content hashing, and record
//! types used throughout the Shutter system. Every other Shutter crate
//! depends on `shutter-types`.
//!
//! # Key Types
//!
//! - [`UserName`] / [`PhotoName`] — validated hierarchical resource names
//! - [`ContentDigest`] — BLAKE3 content hash for upload integrity checks
//! - [`PhotoFormat`] — binary format classification of committed media
//! - [`User`] / [`Photo`] — the album records held by the store

pub mod digest;
pub mod error;
pub mod format;
pub mod name;
pub mod record;

pub use digest::ContentDigest;
pub use error::TypeError;
pub use format::PhotoFormat;
pub use name::{PhotoName, UserName};
pub use record::{Photo, User, UserPatch};
