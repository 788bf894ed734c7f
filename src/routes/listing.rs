use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::listing_dto::{
        CreateListingPayload, ListingQueryParams, ListingResponse, PropertyTypeOption,
        UpdateListingPayload,
    },
    error::Result,
    routes::extract::JsonBody,
    services::listing_query::ListingFilter,
    AppState,
};

#[axum::debug_handler]
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingQueryParams>,
) -> Result<impl IntoResponse> {
    let filter = match ListingFilter::try_from(params) {
        Ok(filter) => filter,
        Err(e) => {
            tracing::debug!(error = %e, "rejected listing filter");
            return Err(e);
        }
    };
    let items = state.listing_service.list(&filter).await?;
    let body: Vec<ListingResponse> = items.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

#[axum::debug_handler]
pub async fn create_listing(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateListingPayload>,
) -> Result<impl IntoResponse> {
    let listing = state
        .listing_service
        .create(payload.into_new_listing()?)
        .await?;
    Ok((StatusCode::CREATED, Json(ListingResponse::from(listing))))
}

#[axum::debug_handler]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let listing = state.listing_service.get_by_id(id).await?;
    Ok(Json(ListingResponse::from(listing)))
}

#[axum::debug_handler]
pub async fn replace_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<CreateListingPayload>,
) -> Result<impl IntoResponse> {
    let listing = state
        .listing_service
        .update(id, payload.into_replacement()?)
        .await?;
    Ok(Json(ListingResponse::from(listing)))
}

#[axum::debug_handler]
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<UpdateListingPayload>,
) -> Result<impl IntoResponse> {
    let listing = state
        .listing_service
        .update(id, payload.into_changes()?)
        .await?;
    Ok(Json(ListingResponse::from(listing)))
}

#[axum::debug_handler]
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.listing_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_property_types(State(state): State<AppState>) -> impl IntoResponse {
    let options: Vec<PropertyTypeOption> = state
        .listing_service
        .property_types()
        .iter()
        .copied()
        .map(Into::into)
        .collect();
    Json(options)
}
