use std::cmp::Ordering;

use shutter_types::{Photo, UserName};

use crate::error::{PagingError, PagingResult};

/// Ordering applied to a photo collection before slicing a page.
///
/// Both orders are ascending. Ties on the primary key break on the
/// photo's resource name, which is unique, so every scope/order pair has
/// a stable total order across repeated calls absent mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PhotoOrder {
    /// Creation time, oldest first.
    CreatedAt,
    /// Display name, lexicographic.
    #[default]
    DisplayName,
}

impl PhotoOrder {
    /// Map a caller-supplied order key onto an order.
    ///
    /// Unrecognized keys deterministically fall back to display name.
    pub fn from_key(key: &str) -> Self {
        match key {
            "created_at" => Self::CreatedAt,
            _ => Self::DisplayName,
        }
    }

    /// The key this order answers to.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::DisplayName => "display_name",
        }
    }

    /// Sort a collection into this order.
    pub fn sort(&self, photos: &mut [Photo]) {
        photos.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(&self, a: &Photo, b: &Photo) -> Ordering {
        let primary = match self {
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::DisplayName => a.display_name.cmp(&b.display_name),
        };
        primary.then_with(|| a.name.cmp(&b.name))
    }
}

/// Immutable context of one pagination step.
///
/// A context is created once and never mutated; advancing the cursor
/// derives a successor with `offset + page_size`. The fields are private
/// so nothing outside this crate can shift a live cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageContext {
    scope: UserName,
    order: PhotoOrder,
    offset: usize,
    page_size: usize,
}

impl PageContext {
    /// Context for the first page of a listing.
    pub fn first(scope: UserName, order: PhotoOrder, page_size: usize) -> PagingResult<Self> {
        if page_size == 0 {
            return Err(PagingError::InvalidPageSize);
        }
        Ok(Self {
            scope,
            order,
            offset: 0,
            page_size,
        })
    }

    /// Derive the successor context, one page further in.
    pub fn next_page(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            order: self.order,
            offset: self.offset + self.page_size,
            page_size: self.page_size,
        }
    }

    /// The scope being listed.
    pub fn scope(&self) -> &UserName {
        &self.scope
    }

    /// The ordering in effect.
    pub fn order(&self) -> PhotoOrder {
        self.order
    }

    /// Start of this page's window in the sorted collection.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Window length.
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
