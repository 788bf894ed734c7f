use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::listing::{Listing, ListingChanges, NewListing, PriceRange, PropertyType};
use crate::utils::validation::{
    amenities_list, normalize_price, reject_read_only, validate_amenities, validate_price,
    validate_property_type,
};

/// Body for `POST /listings/` and `PUT /listings/{id}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateListingPayload {
    #[validate(required, length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    #[validate(required, custom(function = "validate_property_type"))]
    pub property_type: Option<String>,
    #[validate(required, custom(function = "validate_price"))]
    pub price_per_night: Option<Decimal>,
    #[validate(required, length(min = 1, max = 100))]
    pub location: Option<String>,
    #[validate(required, range(min = 1))]
    pub max_guests: Option<i32>,
    #[validate(custom(function = "validate_amenities"))]
    pub amenities: Option<JsonValue>,
    pub is_available: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "reject_read_only"))]
    pub id: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "reject_read_only"))]
    pub created_at: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "reject_read_only"))]
    pub updated_at: Option<JsonValue>,
}

/// Body for `PATCH /listings/{id}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateListingPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_property_type"))]
    pub property_type: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price_per_night: Option<Decimal>,
    #[validate(length(min = 1, max = 100))]
    pub location: Option<String>,
    #[validate(range(min = 1))]
    pub max_guests: Option<i32>,
    #[validate(custom(function = "validate_amenities"))]
    pub amenities: Option<JsonValue>,
    pub is_available: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "reject_read_only"))]
    pub id: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "reject_read_only"))]
    pub created_at: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "reject_read_only"))]
    pub updated_at: Option<JsonValue>,
}

fn take_required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::BadRequest(format!("{} is required", field)))
}

fn parse_property_type(value: &str) -> Result<PropertyType> {
    value.parse().map_err(Error::BadRequest)
}

impl CreateListingPayload {
    /// Validates the payload and converts it into an insertable listing.
    pub fn into_new_listing(self) -> Result<NewListing> {
        self.validate()?;

        let property_type =
            parse_property_type(&take_required(self.property_type, "property_type")?)?;
        let price = take_required(self.price_per_night, "price_per_night")?;
        Ok(NewListing {
            title: take_required(self.title, "title")?,
            description: take_required(self.description, "description")?,
            property_type,
            price_per_night: normalize_price(price),
            location: take_required(self.location, "location")?,
            max_guests: take_required(self.max_guests, "max_guests")?,
            amenities: self.amenities.map(amenities_list).unwrap_or_default(),
            is_available: self.is_available.unwrap_or(true),
        })
    }

    /// PUT semantics: omitted `amenities` and `is_available` keep their stored value.
    pub fn into_replacement(self) -> Result<ListingChanges> {
        let keep_amenities = self.amenities.is_none();
        let keep_availability = self.is_available.is_none();
        let mut changes = ListingChanges::from(self.into_new_listing()?);
        if keep_amenities {
            changes.amenities = None;
        }
        if keep_availability {
            changes.is_available = None;
        }
        Ok(changes)
    }
}

impl UpdateListingPayload {
    /// Validates the payload and keeps only the fields it supplies.
    pub fn into_changes(self) -> Result<ListingChanges> {
        self.validate()?;

        let property_type = self
            .property_type
            .as_deref()
            .map(parse_property_type)
            .transpose()?;
        Ok(ListingChanges {
            title: self.title,
            description: self.description,
            property_type,
            price_per_night: self.price_per_night.map(normalize_price),
            location: self.location,
            max_guests: self.max_guests,
            amenities: self.amenities.map(amenities_list),
            is_available: self.is_available,
        })
    }
}

/// Raw list query string; every value stays a string until the filter parses it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ListingQueryParams {
    pub property_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub location: Option<String>,
    pub max_guests: Option<String>,
    pub is_available: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub property_type_display: String,
    pub price_per_night: Decimal,
    pub price_range: PriceRange,
    pub location: String,
    pub max_guests: i32,
    pub amenities: Vec<String>,
    pub amenities_count: usize,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTypeOption {
    pub value: PropertyType,
    pub label: String,
}

impl From<Listing> for ListingResponse {
    fn from(value: Listing) -> Self {
        let price_range = value.price_range();
        let amenities_count = value.amenities_count();
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            property_type: value.property_type,
            property_type_display: value.property_type.label().to_string(),
            price_per_night: value.price_per_night,
            price_range,
            location: value.location,
            max_guests: value.max_guests,
            amenities: value.amenities,
            amenities_count,
            is_available: value.is_available,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<PropertyType> for PropertyTypeOption {
    fn from(value: PropertyType) -> Self {
        Self {
            value,
            label: value.label().to_string(),
        }
    }
}
