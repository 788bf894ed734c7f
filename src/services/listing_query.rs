use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::dto::admin_dto::AdminListingQuery;
use crate::dto::listing_dto::ListingQueryParams;
use crate::error::{Error, Result};
use crate::models::listing::Listing;

/// Criteria combined with logical AND; `None` means no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub property_type: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub location: Option<String>,
    /// Listings hosting at least this many guests (`max_guests` on the wire).
    pub min_guests: Option<i64>,
    /// Exact capacity, used by the admin console.
    pub guests: Option<i64>,
    pub is_available: Option<bool>,
    /// Substring over title, description and location.
    pub search: Option<String>,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
}

/// Only "true", in any case, reads as true.
pub fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn parse_decimal(name: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|_| Error::BadRequest(format!("{} must be a number, got \"{}\"", name, raw)))
}

fn parse_integer(name: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::BadRequest(format!("{} must be an integer, got \"{}\"", name, raw)))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl TryFrom<ListingQueryParams> for ListingFilter {
    type Error = Error;

    fn try_from(params: ListingQueryParams) -> Result<Self> {
        let min_price = params
            .min_price
            .as_deref()
            .map(|raw| parse_decimal("min_price", raw))
            .transpose()?;
        let max_price = params
            .max_price
            .as_deref()
            .map(|raw| parse_decimal("max_price", raw))
            .transpose()?;
        let min_guests = params
            .max_guests
            .as_deref()
            .map(|raw| parse_integer("max_guests", raw))
            .transpose()?;

        Ok(Self {
            property_type: params.property_type,
            min_price,
            max_price,
            location: params.location,
            min_guests,
            is_available: params.is_available.as_deref().map(parse_flag),
            ..Default::default()
        })
    }
}

impl From<&AdminListingQuery> for ListingFilter {
    fn from(query: &AdminListingQuery) -> Self {
        Self {
            property_type: query.property_type.clone(),
            is_available: query.is_available.as_deref().map(parse_flag),
            guests: query.max_guests,
            search: query.search.clone().filter(|s| !s.trim().is_empty()),
            created_from: query.created_after,
            created_to: query.created_before,
            ..Default::default()
        }
    }
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        self.property_type
            .as_deref()
            .map_or(true, |pt| listing.property_type.as_str() == pt)
            && self
                .min_price
                .map_or(true, |min| listing.price_per_night >= min)
            && self
                .max_price
                .map_or(true, |max| listing.price_per_night <= max)
            && self
                .location
                .as_deref()
                .map_or(true, |needle| contains_ignore_case(&listing.location, needle))
            && self
                .min_guests
                .map_or(true, |guests| i64::from(listing.max_guests) >= guests)
            && self
                .guests
                .map_or(true, |guests| i64::from(listing.max_guests) == guests)
            && self
                .is_available
                .map_or(true, |available| listing.is_available == available)
            && self.search.as_deref().map_or(true, |needle| {
                contains_ignore_case(&listing.title, needle)
                    || contains_ignore_case(&listing.description, needle)
                    || contains_ignore_case(&listing.location, needle)
            })
            && self
                .created_from
                .map_or(true, |from| listing.created_at.date_naive() >= from)
            && self
                .created_to
                .map_or(true, |to| listing.created_at.date_naive() <= to)
    }
}

/// Most recently created first, ties broken by the higher id.
pub fn newest_first(a: &Listing, b: &Listing) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
