//! Per-collection pager state: current query, remembered page size, last
//! good view, and request sequencing so only the newest response is applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use classroom_api::Query;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::fetcher::{CollectionFetcher, FetchOutcome};
use crate::pagination::CollectionView;

/// Identifies one issued fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Monotonic request counter for one collection.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// What [`CollectionPager::apply`] did with a successful or stale result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The view was replaced.
    Updated,
    /// The requested page was past the end; the view is labelled with the
    /// last page instead.
    Clamped { requested: u64 },
    /// The requested page was gone; page 1 is shown instead.
    Recovered { from: u64 },
    /// A newer fetch was issued meanwhile; nothing changed.
    Stale,
}

/// A fetch that has been issued but not applied yet.
#[derive(Clone, Debug)]
pub struct PendingFetch<Q> {
    pub ticket: Ticket,
    pub query: Q,
    pub prior_page_size: u64,
}

/// State behind one visible, paginated list.
pub struct CollectionPager<R, I, Q> {
    fetcher: CollectionFetcher<R, I>,
    query: Q,
    page_size: u64,
    view: Option<CollectionView<I>>,
    last_error: Option<String>,
    sequence: RequestSequence,
}

impl<R, I, Q> CollectionPager<R, I, Q>
where
    R: DeserializeOwned + Default,
    Q: Query + Clone,
{
    pub fn new(fetcher: CollectionFetcher<R, I>, query: Q) -> Self {
        Self {
            fetcher,
            query,
            page_size: 0,
            view: None,
            last_error: None,
            sequence: RequestSequence::new(),
        }
    }

    pub fn fetcher(&self) -> &CollectionFetcher<R, I> {
        &self.fetcher
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Last successfully applied view, kept across failed fetches.
    pub fn view(&self) -> Option<&CollectionView<I>> {
        self.view.as_ref()
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Issues a ticket and snapshots what to fetch. Any previously issued
    /// ticket becomes stale.
    pub fn begin(&self) -> PendingFetch<Q> {
        PendingFetch {
            ticket: self.sequence.issue(),
            query: self.query.clone(),
            prior_page_size: self.page_size,
        }
    }

    /// Applies the result of the fetch identified by `ticket`.
    ///
    /// Results for stale tickets are dropped, errors included. On error the
    /// previous view stays in place and the message is kept for display.
    /// On clamp or recovery the pager adopts the corrected page without
    /// fetching again.
    pub fn apply(
        &mut self,
        ticket: Ticket,
        result: Result<FetchOutcome<I>, FetchError>,
    ) -> Result<Applied, FetchError> {
        if !self.sequence.is_latest(ticket) {
            tracing::debug!(
                "Discarding stale response for {} ({:?})",
                self.fetcher.path(),
                ticket
            );
            return Ok(Applied::Stale);
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!("Failed to load {}: {}", self.fetcher.path(), err);
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        let applied = if let Some(from) = outcome.recovered_from {
            Applied::Recovered { from }
        } else if outcome.was_clamped() {
            Applied::Clamped {
                requested: outcome.requested_page,
            }
        } else {
            Applied::Updated
        };

        self.page_size = outcome.view.page_size;
        self.query.get_common().page = outcome.view.current_page as i64;
        self.view = Some(outcome.view);
        self.last_error = None;
        Ok(applied)
    }

    /// Fetches the current query and applies the result.
    pub async fn refresh(&mut self) -> Result<Applied, FetchError> {
        let pending = self.begin();
        let result = self
            .fetcher
            .fetch_page(&pending.query, pending.prior_page_size)
            .await;
        self.apply(pending.ticket, result)
    }

    /// [`refresh`](Self::refresh) bounded by `timeout`. On expiry the
    /// collection is left as it was.
    pub async fn refresh_with_timeout(&mut self, timeout: Duration) -> Result<Applied, FetchError> {
        let pending = self.begin();
        let result = self
            .fetcher
            .fetch_page_with_timeout(&pending.query, pending.prior_page_size, timeout)
            .await;
        self.apply(pending.ticket, result)
    }

    /// Moves to `page` if the current view has it. Does not fetch.
    pub fn go_to_page(&mut self, page: i64) -> Result<(), FetchError> {
        let total_pages = self.view.as_ref().map_or(1, |v| v.total_pages);
        if page < 1 || page as u64 > total_pages {
            return Err(FetchError::InvalidQuery(format!(
                "page {} outside 1..={}",
                page, total_pages
            )));
        }
        self.query.get_common().page = page;
        Ok(())
    }

    /// Changes filters. The pager goes back to page 1 and forgets the page
    /// size, since the filtered collection may paginate differently.
    pub fn update_query<F>(&mut self, update: F)
    where
        F: FnOnce(&mut Q),
    {
        update(&mut self.query);
        self.query.get_common().page = 1;
        self.page_size = 0;
    }
}
