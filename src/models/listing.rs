use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Condo,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Villa,
        PropertyType::Condo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Villa => "villa",
            PropertyType::Condo => "condo",
        }
    }

    /// Human-readable label shown next to the stored value.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Villa => "Villa",
            PropertyType::Condo => "Condo",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|pt| pt.as_str() == s)
            .ok_or_else(|| format!("\"{}\" is not a valid choice.", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceRange {
    Budget,
    Standard,
    Premium,
    Luxury,
}

impl PriceRange {
    pub fn for_price(price: Decimal) -> Self {
        if price < Decimal::from(100) {
            PriceRange::Budget
        } else if price < Decimal::from(250) {
            PriceRange::Standard
        } else if price < Decimal::from(500) {
            PriceRange::Premium
        } else {
            PriceRange::Luxury
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub price_per_night: Decimal,
    pub location: String,
    pub max_guests: i32,
    pub amenities: Vec<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn amenities_count(&self) -> usize {
        self.amenities.len()
    }

    pub fn price_range(&self) -> PriceRange {
        PriceRange::for_price(self.price_per_night)
    }

    /// Writable fields of this listing with the title marked as a copy.
    pub fn to_copy(&self) -> NewListing {
        NewListing {
            title: copy_title(&self.title),
            description: self.description.clone(),
            property_type: self.property_type,
            price_per_night: self.price_per_night,
            location: self.location.clone(),
            max_guests: self.max_guests,
            amenities: self.amenities.clone(),
            is_available: self.is_available,
        }
    }
}

pub const TITLE_MAX_CHARS: usize = 200;
pub const LOCATION_MAX_CHARS: usize = 100;
const COPY_SUFFIX: &str = " (Copy)";

fn copy_title(title: &str) -> String {
    let room = TITLE_MAX_CHARS - COPY_SUFFIX.chars().count();
    let base: String = title.chars().take(room).collect();
    format!("{}{}", base, COPY_SUFFIX)
}

/// A validated listing ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub price_per_night: Decimal,
    pub location: String,
    pub max_guests: i32,
    pub amenities: Vec<String>,
    pub is_available: bool,
}

/// Field changes for an update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<PropertyType>,
    pub price_per_night: Option<Decimal>,
    pub location: Option<String>,
    pub max_guests: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

impl ListingChanges {
    pub fn apply(self, listing: &mut Listing) {
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(description) = self.description {
            listing.description = description;
        }
        if let Some(property_type) = self.property_type {
            listing.property_type = property_type;
        }
        if let Some(price) = self.price_per_night {
            listing.price_per_night = price;
        }
        if let Some(location) = self.location {
            listing.location = location;
        }
        if let Some(max_guests) = self.max_guests {
            listing.max_guests = max_guests;
        }
        if let Some(amenities) = self.amenities {
            listing.amenities = amenities;
        }
        if let Some(is_available) = self.is_available {
            listing.is_available = is_available;
        }
    }
}

impl From<NewListing> for ListingChanges {
    fn from(value: NewListing) -> Self {
        Self {
            title: Some(value.title),
            description: Some(value.description),
            property_type: Some(value.property_type),
            price_per_night: Some(value.price_per_night),
            location: Some(value.location),
            max_guests: Some(value.max_guests),
            amenities: Some(value.amenities),
            is_available: Some(value.is_available),
        }
    }
}
