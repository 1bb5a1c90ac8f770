mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let res = app.get("/health").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_seeded_accommodations() {
    let app = TestApp::new().await;

    let res = app.get("/api/accommodations").await;
    assert_eq!(res.status(), StatusCode::OK);

    let list = parse_body(res).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 3);

    let dorm = list.iter().find(|a| a["type"] == "dorm").expect("dorm missing");
    assert_eq!(dorm["name"], "Shared Dormitory");
    assert_eq!(dorm["pricePerNight"], "45.00");
    assert_eq!(dorm["maxGuests"], 1);
    assert_eq!(dorm["available"], true);
    assert_eq!(dorm["amenities"], json!(["WiFi", "Shared Bath", "Lockers", "Common Area"]));

    let chalet = list.iter().find(|a| a["type"] == "chalet").expect("chalet missing");
    assert_eq!(chalet["pricePerNight"], "180.00");
    assert!(chalet["imageUrl"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let app = TestApp::new().await;

    let seeded = glencity_booking::infra::seed::seed_catalog(app.state.catalog_repo.as_ref()).await.unwrap();
    assert!(!seeded);
    assert_eq!(app.count_rows("accommodations").await, 3);
    assert_eq!(app.count_rows("activities").await, 6);
}

#[tokio::test]
async fn test_get_accommodation_by_id() {
    let app = TestApp::new().await;
    let id = app.catalog_id("accommodations", "Premium Camping Spot").await;

    let res = app.get(&format!("/api/accommodations/{}", id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["type"], "camping");
    assert_eq!(body["maxGuests"], 4);

    let missing = app.get("/api/accommodations/9999").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(missing).await["error"], "Accommodation not found");

    let garbage = app.get("/api/accommodations/abc").await;
    assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activities_listing_and_lookup() {
    let app = TestApp::new().await;

    let res = app.get("/api/activities").await;
    assert_eq!(res.status(), StatusCode::OK);
    let list = parse_body(res).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 6);

    let kayak = list.iter().find(|a| a["name"] == "Lake Kayaking").expect("kayaking missing");
    assert_eq!(kayak["price"], "55.00");
    assert_eq!(kayak["category"], "water");

    let id = kayak["id"].as_i64().unwrap();
    let res = app.get(&format!("/api/activities/{}", id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["name"], "Lake Kayaking");

    let missing = app.get("/api/activities/9999").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(missing).await["error"], "Activity not found");
}

#[tokio::test]
async fn test_check_availability() {
    let app = TestApp::new().await;

    let res = app.send_json("POST", "/api/check-availability", json!({
        "checkIn": "2024-07-01", "checkOut": "2024-07-04"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["available"], true);
    assert_eq!(body["accommodations"].as_array().unwrap().len(), 3);

    let res = app.send_json("POST", "/api/check-availability", json!({
        "checkIn": "2024-07-01", "checkOut": "2024-07-04", "accommodationType": "chalet"
    })).await;
    let body = parse_body(res).await;
    let accommodations = body["accommodations"].as_array().unwrap();
    assert_eq!(accommodations.len(), 1);
    assert_eq!(accommodations[0]["type"], "chalet");

    let res = app.send_json("POST", "/api/check-availability", json!({
        "checkIn": "2024-07-04", "checkOut": "2024-07-01"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send_json("POST", "/api/check-availability", json!({
        "accommodationType": "treehouse"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
