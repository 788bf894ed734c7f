pub mod admin;
pub mod extract;
pub mod health;
pub mod listing;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{
    auth::{authenticated_or_read_only, require_admin},
    cors::api_cors,
    rate_limit::{rps_middleware, RateLimiter},
};
use crate::AppState;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState, rps: u32) -> Router {
    let listings = Router::new()
        .route(
            "/api/listings/",
            get(listing::list_listings).post(listing::create_listing),
        )
        .route(
            "/api/listings/property_types/",
            get(listing::list_property_types),
        )
        .route(
            "/api/listings/:id/",
            get(listing::get_listing)
                .put(listing::replace_listing)
                .patch(listing::update_listing)
                .delete(listing::delete_listing),
        )
        .layer(from_fn_with_state(state.clone(), authenticated_or_read_only));

    let admin = Router::new()
        .route("/api/admin/listings", get(admin::list_admin_listings))
        .route(
            "/api/admin/listings/availability",
            post(admin::set_availability),
        )
        .route(
            "/api/admin/listings/duplicate",
            post(admin::duplicate_listings),
        )
        .layer(from_fn_with_state(state.clone(), require_admin));

    let api = listings
        .merge(admin)
        .layer(from_fn_with_state(RateLimiter::new(rps), rps_middleware));

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
        .layer(api_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
