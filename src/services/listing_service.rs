use std::collections::HashSet;
use std::sync::Arc;

use crate::database::store::{ListingStore, Page};
use crate::dto::admin_dto::{AdminListingQuery, ADMIN_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::models::listing::{Listing, ListingChanges, NewListing, PropertyType};
use crate::services::listing_query::ListingFilter;

#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn ListingStore>,
}

#[derive(Debug)]
pub struct ListingPage {
    pub items: Vec<Listing>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Listing {} not found", id))
}

/// Keeps the first occurrence of every id.
fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

impl ListingService {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, listing: NewListing) -> Result<Listing> {
        let created = self.store.insert(listing).await?;
        tracing::info!(listing_id = created.id, "listing created");
        Ok(created)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Listing> {
        self.store.fetch(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn list(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        self.store.query(filter, None).await
    }

    pub async fn update(&self, id: i64, changes: ListingChanges) -> Result<Listing> {
        let updated = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(listing_id = id, "listing updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(listing_id = id, "listing deleted");
        Ok(())
    }

    pub fn property_types(&self) -> &'static [PropertyType] {
        &PropertyType::ALL
    }

    pub async fn set_availability(&self, ids: &[i64], is_available: bool) -> Result<u64> {
        let updated = self
            .store
            .set_availability(&unique_ids(ids), is_available)
            .await?;
        tracing::info!(updated, is_available, "listing availability changed");
        Ok(updated)
    }

    pub async fn duplicate(&self, id: i64) -> Result<Listing> {
        let mut copies = self.duplicate_many(&[id]).await?;
        copies.pop().ok_or_else(|| not_found(id))
    }

    /// Copies every listing in `ids`; nothing is copied if any id is unknown.
    pub async fn duplicate_many(&self, ids: &[i64]) -> Result<Vec<Listing>> {
        let unique = unique_ids(ids);
        let originals = self.store.fetch_many(&unique).await?;
        let copies = unique
            .iter()
            .map(|id| {
                originals
                    .iter()
                    .find(|listing| listing.id == *id)
                    .map(Listing::to_copy)
                    .ok_or_else(|| not_found(*id))
            })
            .collect::<Result<Vec<NewListing>>>()?;

        let created = self.store.insert_many(copies).await?;
        tracing::info!(count = created.len(), "listings duplicated");
        Ok(created)
    }

    pub async fn admin_search(&self, query: &AdminListingQuery) -> Result<ListingPage> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = ADMIN_PAGE_SIZE;
        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or_else(|| Error::BadRequest(format!("page {} is out of range", page)))?;
        let filter = ListingFilter::from(query);

        let items = self
            .store
            .query(
                &filter,
                Some(Page {
                    limit: per_page,
                    offset,
                }),
            )
            .await?;
        let total = self.store.count(&filter).await?;
        let total_pages = (total + per_page - 1) / per_page;

        Ok(ListingPage {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }
}
