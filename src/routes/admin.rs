use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::admin_dto::{
        availability_message, duplicate_message, AdminListingPageResponse, AdminListingQuery,
        DuplicateListingsPayload, DuplicateListingsResponse, SetAvailabilityPayload,
        SetAvailabilityResponse,
    },
    error::Result,
    routes::extract::JsonBody,
    AppState,
};

#[axum::debug_handler]
pub async fn list_admin_listings(
    State(state): State<AppState>,
    Query(query): Query<AdminListingQuery>,
) -> Result<impl IntoResponse> {
    let page = state.listing_service.admin_search(&query).await?;
    Ok(Json(AdminListingPageResponse::from(page)))
}

#[axum::debug_handler]
pub async fn set_availability(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SetAvailabilityPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let updated = state
        .listing_service
        .set_availability(&payload.ids, payload.is_available)
        .await?;
    Ok(Json(SetAvailabilityResponse {
        updated,
        message: availability_message(updated, payload.is_available),
    }))
}

#[axum::debug_handler]
pub async fn duplicate_listings(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DuplicateListingsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let copies = state.listing_service.duplicate_many(&payload.ids).await?;
    let duplicated = copies.len();
    Ok((
        StatusCode::CREATED,
        Json(DuplicateListingsResponse {
            duplicated,
            message: duplicate_message(duplicated),
            items: copies.into_iter().map(Into::into).collect(),
        }),
    ))
}
