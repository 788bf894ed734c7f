use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::listing_dto::ListingResponse;
use crate::models::listing::{Listing, PropertyType};
use crate::services::listing_service::ListingPage;

pub const ADMIN_PAGE_SIZE: i64 = 25;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminListingQuery {
    pub page: Option<i64>,
    pub search: Option<String>,
    pub property_type: Option<String>,
    pub is_available: Option<String>,
    pub max_guests: Option<i64>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetAvailabilityPayload {
    #[validate(length(min = 1))]
    pub ids: Vec<i64>,
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DuplicateListingsPayload {
    #[validate(length(min = 1))]
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAvailabilityResponse {
    pub updated: u64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateListingsResponse {
    pub duplicated: usize,
    pub message: String,
    pub items: Vec<ListingResponse>,
}

/// One row of the console list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListingRow {
    pub id: i64,
    pub title: String,
    pub property_type: PropertyType,
    pub price_per_night: Decimal,
    pub location: String,
    pub max_guests: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub amenities: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListingPageResponse {
    pub items: Vec<AdminListingRow>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

pub fn amenities_summary(count: usize) -> String {
    match count {
        0 => "No amenities".to_string(),
        1 => "1 amenity".to_string(),
        n => format!("{} amenities", n),
    }
}

pub fn availability_message(updated: u64, is_available: bool) -> String {
    let state = if is_available { "available" } else { "unavailable" };
    format!("{} listing(s) marked as {}.", updated, state)
}

pub fn duplicate_message(count: usize) -> String {
    format!("{} listing(s) duplicated successfully.", count)
}

impl From<Listing> for AdminListingRow {
    fn from(value: Listing) -> Self {
        let amenities = amenities_summary(value.amenities_count());
        Self {
            id: value.id,
            title: value.title,
            property_type: value.property_type,
            price_per_night: value.price_per_night,
            location: value.location,
            max_guests: value.max_guests,
            is_available: value.is_available,
            created_at: value.created_at,
            amenities,
        }
    }
}

impl From<ListingPage> for AdminListingPageResponse {
    fn from(value: ListingPage) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
