use shutter_types::Photo;

use crate::context::PageContext;

/// One computed page of a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoPage {
    /// The `[offset, offset + page_size)` window of the sorted collection.
    pub photos: Vec<Photo>,
    /// Whether results exist beyond this window.
    pub has_more: bool,
}

/// Compute the page a context describes over a scoped collection.
///
/// The collection is sorted into the context's order (stable total order,
/// see [`PhotoOrder`](crate::PhotoOrder)), then sliced. `has_more` is
/// strict: a window ending exactly at the collection's end reports no
/// further results, so no token is minted for an empty final page.
pub fn page_of(mut photos: Vec<Photo>, context: &PageContext) -> PhotoPage {
    let total = photos.len();
    context.order().sort(&mut photos);

    let photos: Vec<Photo> = photos
        .into_iter()
        .skip(context.offset())
        .take(context.page_size())
        .collect();

    PhotoPage {
        photos,
        has_more: total > context.offset() + context.page_size(),
    }
}
