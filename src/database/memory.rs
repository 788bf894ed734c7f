use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::store::{ListingStore, Page};
use crate::error::Result;
use crate::models::listing::{Listing, ListingChanges, NewListing};
use crate::services::listing_query::{newest_first, ListingFilter};
use crate::utils::time::now;

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    listings: BTreeMap<i64, Listing>,
}

impl Inner {
    fn insert(&mut self, new: NewListing) -> Listing {
        self.last_id += 1;
        let created_at = now();
        let listing = Listing {
            id: self.last_id,
            title: new.title,
            description: new.description,
            property_type: new.property_type,
            price_per_night: new.price_per_night,
            location: new.location,
            max_guests: new.max_guests,
            amenities: new.amenities,
            is_available: new.is_available,
            created_at,
            updated_at: created_at,
        };
        self.listings.insert(listing.id, listing.clone());
        listing
    }

    fn matching(&self, filter: &ListingFilter) -> Vec<Listing> {
        let mut items: Vec<Listing> = self
            .listings
            .values()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect();
        items.sort_by(newest_first);
        items
    }
}

/// Process-local store used when no database is configured, and by tests.
#[derive(Debug, Default)]
pub struct MemoryListingStore {
    inner: RwLock<Inner>,
}

impl MemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn insert(&self, listing: NewListing) -> Result<Listing> {
        Ok(self.inner.write().await.insert(listing))
    }

    async fn insert_many(&self, listings: Vec<NewListing>) -> Result<Vec<Listing>> {
        let mut inner = self.inner.write().await;
        Ok(listings.into_iter().map(|l| inner.insert(l)).collect())
    }

    async fn fetch(&self, id: i64) -> Result<Option<Listing>> {
        Ok(self.inner.read().await.listings.get(&id).cloned())
    }

    async fn fetch_many(&self, ids: &[i64]) -> Result<Vec<Listing>> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.listings.get(id).cloned())
            .collect())
    }

    async fn query(&self, filter: &ListingFilter, page: Option<Page>) -> Result<Vec<Listing>> {
        let items = self.inner.read().await.matching(filter);
        Ok(match page {
            Some(page) => items
                .into_iter()
                .skip(page.offset.max(0) as usize)
                .take(page.limit.max(0) as usize)
                .collect(),
            None => items,
        })
    }

    async fn count(&self, filter: &ListingFilter) -> Result<i64> {
        let inner = self.inner.read().await;
        Ok(inner.listings.values().filter(|l| filter.matches(l)).count() as i64)
    }

    async fn update(&self, id: i64, changes: ListingChanges) -> Result<Option<Listing>> {
        let mut inner = self.inner.write().await;
        let Some(listing) = inner.listings.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(listing);
        listing.updated_at = now().max(listing.updated_at);
        Ok(Some(listing.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.inner.write().await.listings.remove(&id).is_some())
    }

    async fn set_availability(&self, ids: &[i64], is_available: bool) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let touched = now();
        let mut seen = HashSet::new();
        let mut updated = 0;
        for id in ids.iter().filter(|id| seen.insert(**id)) {
            if let Some(listing) = inner.listings.get_mut(id) {
                listing.is_available = is_available;
                listing.updated_at = touched.max(listing.updated_at);
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::PropertyType;
    use rust_decimal::Decimal;

    fn new_listing(title: &str, price: i64, available: bool) -> NewListing {
        NewListing {
            title: title.into(),
            description: "desc".into(),
            property_type: PropertyType::House,
            price_per_night: Decimal::new(price * 100, 2),
            location: "Bergen".into(),
            max_guests: 4,
            amenities: vec!["WiFi".into()],
            is_available: available,
        }
    }

    #[tokio::test]
    async fn insert_assigns_ids_and_timestamps() {
        let store = MemoryListingStore::new();
        let a = store.insert(new_listing("A", 80, true)).await.unwrap();
        let b = store.insert(new_listing("B", 90, true)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
        assert!(b.created_at >= a.created_at);
    }

    #[tokio::test]
    async fn query_orders_newest_first_and_pages() {
        let store = MemoryListingStore::new();
        for i in 0..5 {
            store
                .insert(new_listing(&format!("L{i}"), 50, true))
                .await
                .unwrap();
        }
        let all = store.query(&ListingFilter::default(), None).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);

        let page = store
            .query(
                &ListingFilter::default(),
                Some(Page {
                    limit: 2,
                    offset: 2,
                }),
            )
            .await
            .unwrap();
        let ids: Vec<i64> = page.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(store.count(&ListingFilter::default()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_only() {
        let store = MemoryListingStore::new();
        let created = store.insert(new_listing("A", 80, true)).await.unwrap();
        let updated = store
            .update(
                created.id,
                ListingChanges {
                    title: Some("A2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "A2");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert!(store
            .update(99, ListingChanges::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn set_availability_counts_known_ids() {
        let store = MemoryListingStore::new();
        let a = store.insert(new_listing("A", 80, true)).await.unwrap();
        let b = store.insert(new_listing("B", 80, true)).await.unwrap();
        let updated = store
            .set_availability(&[a.id, b.id, 42], false)
            .await
            .unwrap();
        assert_eq!(updated, 2);
        let filter = ListingFilter {
            is_available: Some(false),
            ..Default::default()
        };
        assert_eq!(store.count(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn set_availability_counts_repeated_ids_once() {
        let store = MemoryListingStore::new();
        let a = store.insert(new_listing("A", 80, true)).await.unwrap();
        let updated = store
            .set_availability(&[a.id, a.id, a.id], false)
            .await
            .unwrap();
        assert_eq!(updated, 1);
    }

    #[tokio::test]
    async fn delete_removes_listing() {
        let store = MemoryListingStore::new();
        let a = store.insert(new_listing("A", 80, true)).await.unwrap();
        assert!(store.delete(a.id).await.unwrap());
        assert!(!store.delete(a.id).await.unwrap());
        assert!(store.fetch(a.id).await.unwrap().is_none());
    }
}
