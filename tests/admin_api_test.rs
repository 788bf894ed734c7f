mod common;

use axum::http::StatusCode;
use common::{create, ids, listing_body, send, test_app, token};
use serde_json::json;

#[tokio::test]
async fn admin_routes_need_admin_role() {
    let app = test_app();
    let host = token(Some("host"));

    let (status, _) = send(&app, "GET", "/api/admin/listings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/api/admin/listings", Some(&host), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/listings/availability",
        Some(&host),
        Some(json!({ "ids": [1], "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn set_availability_updates_selected_listings() {
    let app = test_app();
    let admin = token(Some("admin"));

    let a = create(&app, listing_body("A", "Rome", "50", 2)).await;
    let b = create(&app, listing_body("B", "Rome", "60", 2)).await;
    let c = create(&app, listing_body("C", "Rome", "70", 2)).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/listings/availability",
        Some(&admin),
        Some(json!({ "ids": [a["id"], b["id"], 999], "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["updated"], 2);
    assert_eq!(body["message"], "2 listing(s) marked as unavailable.");

    let (_, listed) = send(&app, "GET", "/api/listings/?is_available=true", None, None).await;
    assert_eq!(ids(&listed), vec![c["id"].as_i64().unwrap()]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/listings/availability",
        Some(&admin),
        Some(json!({ "ids": [c["id"], c["id"]], "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);
    assert_eq!(body["message"], "1 listing(s) marked as unavailable.");

    let (_, body) = send(
        &app,
        "POST",
        "/api/admin/listings/availability",
        Some(&admin),
        Some(json!({ "ids": [a["id"]], "is_available": true })),
    )
    .await;
    assert_eq!(body["message"], "1 listing(s) marked as available.");

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/listings/availability",
        Some(&admin),
        Some(json!({ "ids": [], "is_available": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["ids"].is_array());
}

#[tokio::test]
async fn duplicate_copies_listings() {
    let app = test_app();
    let admin = token(Some("Admin"));

    let original = create(&app, listing_body("Garden flat", "Bath", "140", 3)).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/listings/duplicate",
        Some(&admin),
        Some(json!({ "ids": [original["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["duplicated"], 1);
    assert_eq!(body["message"], "1 listing(s) duplicated successfully.");

    let copy = &body["items"][0];
    assert_ne!(copy["id"], original["id"]);
    assert_eq!(copy["title"], "Garden flat (Copy)");
    assert_eq!(copy["price_per_night"], original["price_per_night"]);
    assert_eq!(copy["amenities"], original["amenities"]);

    let (_, listed) = send(&app, "GET", "/api/listings/", None, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
    assert_eq!(listed[0]["title"], "Garden flat (Copy)");

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/listings/duplicate",
        Some(&admin),
        Some(json!({ "ids": [original["id"], 4242] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, listed) = send(&app, "GET", "/api/listings/", None, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn console_list_searches_and_pages() {
    let app = test_app();
    let admin = token(Some("admin"));

    for i in 0..27 {
        let mut body = listing_body(&format!("Flat {i}"), "Leeds", "55", 2);
        if i == 3 {
            body["description"] = json!("Converted mill with river views");
            body["amenities"] = json!(["WiFi"]);
        }
        create(&app, body).await;
    }

    let (status, page1) = send(&app, "GET", "/api/admin/listings", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page1["total"], 27);
    assert_eq!(page1["per_page"], 25);
    assert_eq!(page1["total_pages"], 2);
    assert_eq!(page1["items"].as_array().unwrap().len(), 25);
    assert_eq!(page1["items"][0]["title"], "Flat 26");
    assert_eq!(page1["items"][0]["amenities"], "2 amenities");

    let (_, page2) = send(&app, "GET", "/api/admin/listings?page=2", Some(&admin), None).await;
    assert_eq!(page2["page"], 2);
    assert_eq!(page2["items"].as_array().unwrap().len(), 2);

    let (_, found) = send(
        &app,
        "GET",
        "/api/admin/listings?search=RIVER",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(found["total"], 1);
    assert_eq!(found["items"][0]["title"], "Flat 3");
    assert_eq!(found["items"][0]["amenities"], "1 amenity");

    let today = chrono::Utc::now().date_naive();
    let (_, dated) = send(
        &app,
        "GET",
        &format!("/api/admin/listings?created_after={today}&property_type=villa"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(dated["total"], 0);

    let (_, sized) = send(
        &app,
        "GET",
        "/api/admin/listings?max_guests=2",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(sized["total"], 27);
    let (_, sized) = send(
        &app,
        "GET",
        "/api/admin/listings?max_guests=3",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(sized["total"], 0);
}

#[tokio::test]
async fn console_rejects_unreachable_page() {
    let app = test_app();
    let admin = token(Some("admin"));
    create(&app, listing_body("Only", "York", "40", 1)).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/admin/listings?page={}", i64::MAX),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn bulk_payload_type_errors_are_field_level() {
    let app = test_app();
    let admin = token(Some("admin"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/listings/availability",
        Some(&admin),
        Some(json!({ "ids": [1], "is_available": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["is_available"].is_array(), "{body}");
}
