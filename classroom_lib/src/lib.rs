//! Library layer for the classroom admin tools: paginated collection
//! fetching, item mapping, pager state, validation and configuration.
//!
//! Wraps the `classroom_api` request pipeline with the reconciliation logic
//! every list view needs: page-size inference from cursor-style envelopes,
//! page clamping, silent recovery from stale pages, and discarding
//! out-of-order responses.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod items;
pub mod pager;
pub mod pagination;
pub mod validation;

pub use classroom_api;
pub use classroom_api::types;
pub use classroom_api::{
    Client, CourseQuery, MemorySession, PageQuery, Query, QuizQuery, SessionCredentials,
    SessionStore,
};

pub use config::ClientConfig;
pub use error::{ClassroomError, FetchError};
pub use fetcher::{CollectionFetcher, FetchOutcome};
pub use filter::LocalFilter;
pub use pager::{Applied, CollectionPager, PendingFetch, RequestSequence, Ticket};
pub use pagination::{reconcile, resize, CollectionView};
