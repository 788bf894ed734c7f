pub mod listing_query;
pub mod listing_service;
