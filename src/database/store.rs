use async_trait::async_trait;

use crate::error::Result;
use crate::models::listing::{Listing, ListingChanges, NewListing};
use crate::services::listing_query::ListingFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Persistence for listings. Every write is a single atomic statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Stores a new listing; id and timestamps are assigned here.
    async fn insert(&self, listing: NewListing) -> Result<Listing>;

    /// Stores several listings, all or nothing.
    async fn insert_many(&self, listings: Vec<NewListing>) -> Result<Vec<Listing>>;

    async fn fetch(&self, id: i64) -> Result<Option<Listing>>;

    async fn fetch_many(&self, ids: &[i64]) -> Result<Vec<Listing>>;

    /// Matching listings, newest first.
    async fn query(&self, filter: &ListingFilter, page: Option<Page>) -> Result<Vec<Listing>>;

    async fn count(&self, filter: &ListingFilter) -> Result<i64>;

    /// Applies the changes and refreshes `updated_at`; `None` when the id is unknown.
    async fn update(&self, id: i64, changes: ListingChanges) -> Result<Option<Listing>>;

    async fn delete(&self, id: i64) -> Result<bool>;

    /// Returns how many listings were updated.
    async fn set_availability(&self, ids: &[i64], is_available: bool) -> Result<u64>;
}
