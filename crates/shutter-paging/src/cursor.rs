use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use uuid::Uuid;

use crate::context::PageContext;

/// Opaque continuation token handed to a caller.
///
/// Token content is generated independently of the context it stands for
/// (a UUIDv7, not an encoded offset), so callers cannot derive or forge
/// positions.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PageToken(String);

impl PageToken {
    fn mint() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PageToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageToken({})", self.0)
    }
}

/// Process-wide table mapping tokens to their immutable contexts.
///
/// Minted when a listing determines more results remain; resolved
/// read-only by the next call. Tokens are multi-use and do not expire;
/// the table is injected into the service (never global) and exposes
/// `len`/`clear` for operational control.
pub struct CursorTable {
    entries: RwLock<HashMap<PageToken, PageContext>>,
}

impl CursorTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Mint a fresh token bound to `context`.
    pub fn mint(&self, context: PageContext) -> PageToken {
        let token = PageToken::mint();
        let mut entries = self.entries.write().expect("lock poisoned");
        entries.insert(token.clone(), context);
        tracing::debug!(token = %token, "minted page token");
        token
    }

    /// Resolve a token to its context. Read-only: the entry is retained
    /// and repeated resolution yields the same context.
    pub fn resolve(&self, token: &PageToken) -> Option<PageContext> {
        let entries = self.entries.read().expect("lock poisoned");
        entries.get(token).cloned()
    }

    /// Number of live tokens.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no tokens are live.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Drop all live tokens.
    pub fn clear(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }
}

impl Default for CursorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CursorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorTable")
            .field("live_tokens", &self.len())
            .finish()
    }
}
