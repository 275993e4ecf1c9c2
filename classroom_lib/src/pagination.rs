//! Reconciliation of cursor-style page envelopes into a [`CollectionView`].
//!
//! The backend only reports `count` plus opaque `next`/`previous` links, so
//! the page size has to be inferred from what came back: a page that has a
//! successor is full, and its length is the page size. The last page may be
//! short, so it never lowers a size learned earlier.

use classroom_api::types::PaginatedResponse;
use serde::Serialize;

/// UI-ready summary of one fetched page.
///
/// `total_pages` is always at least 1 and `current_page` always lies in
/// `1..=total_pages`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CollectionView<I> {
    pub items: Vec<I>,
    pub total_count: u64,
    /// Inferred items per page; 0 until a non-empty page has been seen,
    /// in which case `total_pages` is 1.
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
    pub current_page: u64,
}

impl<I> CollectionView<I> {
    /// View of a collection with nothing in it.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page_size: 0,
            total_pages: 1,
            has_next: false,
            has_prev: false,
            current_page: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `page` can be navigated to from this view.
    pub fn contains_page(&self, page: u64) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

impl<I> Default for CollectionView<I> {
    fn default() -> Self {
        Self::empty()
    }
}

/// `max(1, ceil(total_count / page_size))`, or 1 when the size is unknown.
pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}

/// Page size to remember after seeing `observed` results.
///
/// A page with a successor is authoritative. Otherwise the previously known
/// size is kept unless this page holds more items than it.
pub fn infer_page_size(has_next: bool, observed: u64, prior_page_size: u64) -> u64 {
    if has_next && observed > 0 {
        observed
    } else {
        prior_page_size.max(observed)
    }
}

/// Builds the view for one envelope.
///
/// `requested_page` past the last page is relabelled to the last page; the
/// items are left as the server sent them.
pub fn reconcile<R, I, F>(
    envelope: PaginatedResponse<R>,
    requested_page: u64,
    prior_page_size: u64,
    mut map: F,
) -> CollectionView<I>
where
    F: FnMut(usize, R) -> I,
{
    let has_next = envelope.next.is_some();
    let has_prev = envelope.previous.is_some();
    let observed = envelope.results.len() as u64;

    let page_size = infer_page_size(has_next, observed, prior_page_size);
    let total_pages = total_pages(envelope.count, page_size);
    let current_page = requested_page.clamp(1, total_pages);
    if current_page != requested_page {
        tracing::debug!(
            "Requested page {} outside 1..={}, showing page {}",
            requested_page,
            total_pages,
            current_page
        );
    }

    let items = envelope
        .results
        .into_iter()
        .enumerate()
        .map(|(position, record)| map(position, record))
        .collect();

    CollectionView {
        items,
        total_count: envelope.count,
        page_size,
        total_pages,
        has_next,
        has_prev,
        current_page,
    }
}

/// Recomputes `view` with a page size learned from another page of the
/// same collection. The items are untouched.
pub fn resize<I>(view: CollectionView<I>, learned_page_size: u64, requested_page: u64) -> CollectionView<I> {
    let page_size = infer_page_size(view.has_next, view.len() as u64, learned_page_size);
    let total_pages = total_pages(view.total_count, page_size);
    CollectionView {
        page_size,
        total_pages,
        current_page: requested_page.clamp(1, total_pages),
        ..view
    }
}
