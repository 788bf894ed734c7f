use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{types::Json, FromRow, PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::database::store::{ListingStore, Page};
use crate::error::{Error, Result};
use crate::models::listing::{Listing, ListingChanges, NewListing};
use crate::services::listing_query::ListingFilter;

const COLUMNS: &str = "id, title, description, property_type, price_per_night, location, \
                       max_guests, amenities, is_available, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ListingRecord {
    id: i64,
    title: String,
    description: String,
    property_type: String,
    price_per_night: Decimal,
    location: String,
    max_guests: i32,
    amenities: Json<Vec<String>>,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ListingRecord> for Listing {
    type Error = Error;

    fn try_from(record: ListingRecord) -> Result<Self> {
        let property_type = record.property_type.parse().map_err(|e| {
            Error::Internal(format!("listing {} has bad property_type: {}", record.id, e))
        })?;
        Ok(Listing {
            id: record.id,
            title: record.title,
            description: record.description,
            property_type,
            price_per_night: record.price_per_night,
            location: record.location,
            max_guests: record.max_guests,
            amenities: record.amenities.0,
            is_available: record.is_available,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

fn into_listings(records: Vec<ListingRecord>) -> Result<Vec<Listing>> {
    records.into_iter().map(Listing::try_from).collect()
}

/// `%needle%` with LIKE metacharacters escaped.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ListingFilter) {
    qb.push(" WHERE TRUE");
    if let Some(property_type) = &filter.property_type {
        qb.push(" AND property_type = ")
            .push_bind(property_type.clone());
    }
    if let Some(min) = filter.min_price {
        qb.push(" AND price_per_night >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        qb.push(" AND price_per_night <= ").push_bind(max);
    }
    if let Some(location) = &filter.location {
        qb.push(" AND location ILIKE ")
            .push_bind(like_pattern(location));
    }
    if let Some(guests) = filter.min_guests {
        qb.push(" AND max_guests >= ").push_bind(guests);
    }
    if let Some(guests) = filter.guests {
        qb.push(" AND max_guests = ").push_bind(guests);
    }
    if let Some(available) = filter.is_available {
        qb.push(" AND is_available = ").push_bind(available);
    }
    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR location ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(from) = filter.created_from {
        qb.push(" AND (created_at AT TIME ZONE 'UTC')::date >= ")
            .push_bind(from);
    }
    if let Some(to) = filter.created_to {
        qb.push(" AND (created_at AT TIME ZONE 'UTC')::date <= ")
            .push_bind(to);
    }
}

async fn insert_one<'e, E>(executor: E, listing: NewListing) -> Result<Listing>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        r#"
        INSERT INTO listings (
            title, description, property_type, price_per_night,
            location, max_guests, amenities, is_available
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        COLUMNS
    );
    let record = sqlx::query_as::<_, ListingRecord>(&sql)
        .bind(listing.title)
        .bind(listing.description)
        .bind(listing.property_type.as_str())
        .bind(listing.price_per_night)
        .bind(listing.location)
        .bind(listing.max_guests)
        .bind(Json(listing.amenities))
        .bind(listing.is_available)
        .fetch_one(executor)
        .await?;
    Listing::try_from(record)
}

#[derive(Clone)]
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn insert(&self, listing: NewListing) -> Result<Listing> {
        insert_one(&self.pool, listing).await
    }

    async fn insert_many(&self, listings: Vec<NewListing>) -> Result<Vec<Listing>> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(listings.len());
        for listing in listings {
            inserted.push(insert_one(&mut *tx, listing).await?);
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn fetch(&self, id: i64) -> Result<Option<Listing>> {
        let sql = format!("SELECT {} FROM listings WHERE id = $1", COLUMNS);
        let record = sqlx::query_as::<_, ListingRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        record.map(Listing::try_from).transpose()
    }

    async fn fetch_many(&self, ids: &[i64]) -> Result<Vec<Listing>> {
        let sql = format!(
            "SELECT {} FROM listings WHERE id = ANY($1) ORDER BY id",
            COLUMNS
        );
        let records = sqlx::query_as::<_, ListingRecord>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        into_listings(records)
    }

    async fn query(&self, filter: &ListingFilter, page: Option<Page>) -> Result<Vec<Listing>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM listings", COLUMNS));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, id DESC");
        if let Some(page) = page {
            qb.push(" LIMIT ")
                .push_bind(page.limit)
                .push(" OFFSET ")
                .push_bind(page.offset);
        }
        let records = qb
            .build_query_as::<ListingRecord>()
            .fetch_all(&self.pool)
            .await?;
        into_listings(records)
    }

    async fn count(&self, filter: &ListingFilter) -> Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM listings");
        push_filters(&mut qb, filter);
        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn update(&self, id: i64, changes: ListingChanges) -> Result<Option<Listing>> {
        let sql = format!(
            r#"
            UPDATE listings
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                property_type = COALESCE($4, property_type),
                price_per_night = COALESCE($5, price_per_night),
                location = COALESCE($6, location),
                max_guests = COALESCE($7, max_guests),
                amenities = COALESCE($8, amenities),
                is_available = COALESCE($9, is_available),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        let record = sqlx::query_as::<_, ListingRecord>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.description)
            .bind(changes.property_type.map(|pt| pt.as_str()))
            .bind(changes.price_per_night)
            .bind(changes.location)
            .bind(changes.max_guests)
            .bind(changes.amenities.map(Json))
            .bind(changes.is_available)
            .fetch_optional(&self.pool)
            .await?;
        record.map(Listing::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_availability(&self, ids: &[i64], is_available: bool) -> Result<u64> {
        let res = sqlx::query(
            "UPDATE listings SET is_available = $1, updated_at = NOW() WHERE id = ANY($2)",
        )
        .bind(is_available)
        .bind(ids.to_vec())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}
