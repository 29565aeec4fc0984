//! Cursor-based pagination for the Shutter photo-album service.
//!
//! A listing call either starts fresh or resumes from an opaque
//! [`PageToken`]. Tokens resolve to immutable [`PageContext`] records in a
//! process-wide [`CursorTable`]; the [`engine`] computes a deterministic
//! sorted page over a scoped collection and reports whether more results
//! remain. Callers never see internal offsets.
//!
//! # Lifecycle
//!
//! 1. First call: build a fresh context at offset zero.
//! 2. Query: sort the collection, slice the context's window.
//! 3. If more results remain, derive the successor context
//!    (`offset + page_size`) and mint a token for it.
//! 4. The next call resolves that token read-only and repeats.

pub mod context;
pub mod cursor;
pub mod engine;
pub mod error;

pub use context::{PageContext, PhotoOrder};
pub use cursor::{CursorTable, PageToken};
pub use engine::{page_of, PhotoPage};
pub use error::{PagingError, PagingResult};
