//! Paginated collection fetcher shared by every list view.

use std::time::Duration;

use classroom_api::types::PaginatedResponse;
use classroom_api::{Client, Query};
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::pagination::{reconcile, resize, CollectionView};

/// Result of a successful page fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchOutcome<I> {
    pub view: CollectionView<I>,
    /// Page the view was fetched for, after clamping to at least 1.
    pub requested_page: u64,
    /// Set when the requested page was gone (404) and page 1 was loaded
    /// instead; holds the page originally asked for.
    pub recovered_from: Option<u64>,
}

impl<I> FetchOutcome<I> {
    /// The requested page was past the end and the view was relabelled.
    pub fn was_clamped(&self) -> bool {
        self.view.current_page != self.requested_page
    }

    pub fn was_recovered(&self) -> bool {
        self.recovered_from.is_some()
    }
}

/// Fetches pages of one collection and reconciles them into views.
///
/// `R` is the wire record and `I` the item handed to callers; `map` turns
/// one into the other and must not fail.
pub struct CollectionFetcher<R, I> {
    client: Client,
    path: String,
    map: fn(usize, R) -> I,
}

impl<R, I> Clone for CollectionFetcher<R, I> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            map: self.map,
        }
    }
}

impl<R, I> CollectionFetcher<R, I>
where
    R: DeserializeOwned + Default,
{
    pub fn new(client: Client, path: impl Into<String>, map: fn(usize, R) -> I) -> Self {
        Self {
            client,
            path: path.into(),
            map,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches the page named by `query` and reconciles it.
    ///
    /// `prior_page_size` is the size learned from earlier pages (0 if none).
    /// Pages below 1 are fetched as page 1. A 404 for a page past the first
    /// is treated as a stale page: page 1 is fetched once instead and the
    /// outcome records the recovery. Every other failure is returned.
    pub async fn fetch_page<Q>(
        &self,
        query: &Q,
        prior_page_size: u64,
    ) -> Result<FetchOutcome<I>, FetchError>
    where
        Q: Query + Clone,
    {
        let requested = clamp_page(query.page());
        let query = query.clone().with_page(requested as i64);

        match self.fetch_view(&query, requested, prior_page_size).await {
            Ok(view) => Ok(FetchOutcome {
                view,
                requested_page: requested,
                recovered_from: None,
            }),
            Err(err) if err.is_not_found() && requested > 1 => {
                tracing::warn!(
                    "Page {} of {} no longer exists, reloading page 1",
                    requested,
                    self.path
                );
                let query = query.with_page(1);
                let view = self
                    .fetch_view(&query, 1, prior_page_size)
                    .await
                    .map_err(FetchError::from_api)?;
                Ok(FetchOutcome {
                    view,
                    requested_page: 1,
                    recovered_from: Some(requested),
                })
            }
            Err(err) => Err(FetchError::from_api(err)),
        }
    }

    /// [`fetch_page`](Self::fetch_page) for callers that have not seen any
    /// earlier page.
    ///
    /// A short last page says nothing about the page size, so when no size
    /// is known and the page has a predecessor but no successor, page 1 is
    /// fetched once to learn it. If that fails the last page is returned as
    /// inferred from itself.
    pub async fn fetch_page_sized<Q>(
        &self,
        query: &Q,
        prior_page_size: u64,
    ) -> Result<FetchOutcome<I>, FetchError>
    where
        Q: Query + Clone,
    {
        let mut outcome = self.fetch_page(query, prior_page_size).await?;
        let view = &outcome.view;
        if prior_page_size > 0 || !view.has_prev || view.has_next || outcome.was_recovered() {
            return Ok(outcome);
        }

        tracing::debug!("Learning page size of {} from page 1", self.path);
        let first_page = query.clone().with_page(1);
        match self.fetch_view(&first_page, 1, 0).await {
            Ok(first) if first.page_size > 0 => {
                outcome.view = resize(outcome.view, first.page_size, outcome.requested_page);
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!("Could not learn page size of {}: {}", self.path, err);
            }
        }
        Ok(outcome)
    }

    /// [`fetch_page`](Self::fetch_page) bounded by `timeout`.
    pub async fn fetch_page_with_timeout<Q>(
        &self,
        query: &Q,
        prior_page_size: u64,
        timeout: Duration,
    ) -> Result<FetchOutcome<I>, FetchError>
    where
        Q: Query + Clone,
    {
        match tokio::time::timeout(timeout, self.fetch_page(query, prior_page_size)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Fetching {} timed out after {:?}", self.path, timeout);
                Err(FetchError::TimedOut(timeout))
            }
        }
    }

    async fn fetch_view<Q: Query>(
        &self,
        query: &Q,
        requested: u64,
        prior_page_size: u64,
    ) -> Result<CollectionView<I>, classroom_api::Error> {
        let envelope: PaginatedResponse<R> = self.client.get_json(&self.path, Some(query)).await?;
        Ok(reconcile(envelope, requested, prior_page_size, self.map))
    }
}

fn clamp_page(page: i64) -> u64 {
    if page < 1 {
        tracing::debug!("Page {} is below 1, fetching page 1", page);
        1
    } else {
        page as u64
    }
}
