pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::store::ListingStore;
use crate::services::listing_service::ListingService;

#[derive(Clone)]
pub struct AppState {
    pub listing_service: ListingService,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn ListingStore>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            listing_service: ListingService::new(store),
            jwt_secret: jwt_secret.into(),
        }
    }
}
