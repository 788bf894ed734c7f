#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use listings_backend::{
    database::MemoryListingStore, middleware::auth::Claims, routes::build_router, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test_secret_key";

pub fn test_app() -> Router {
    let state = AppState::new(Arc::new(MemoryListingStore::new()), JWT_SECRET);
    build_router(state, 1000)
}

pub fn token(role: Option<&str>) -> String {
    let claims = Claims {
        sub: "tester".into(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        role: role.map(String::from),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn listing_body(title: &str, location: &str, price: &str, guests: i32) -> JsonValue {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "property_type": "apartment",
        "price_per_night": price,
        "location": location,
        "max_guests": guests,
        "amenities": ["WiFi", "Kitchen"],
    })
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}

/// Creates a listing as an authenticated user and returns its JSON representation.
pub async fn create(app: &Router, body: JsonValue) -> JsonValue {
    let user = token(None);
    let (status, json) = send(app, "POST", "/api/listings/", Some(&user), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json
}

pub fn ids(json: &JsonValue) -> Vec<i64> {
    json.as_array()
        .expect("array body")
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
