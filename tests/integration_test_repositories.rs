mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::{booking_payload, parse_body, TestApp};
use glencity_booking::domain::models::booking::{Booking, BookingStatus, GuestInfo, NewActivityBooking, NewBooking};
use glencity_booking::error::AppError;
use rust_decimal::Decimal;
use serde_json::json;

fn new_booking(accommodation_id: i64, activity_id: i64) -> NewBooking {
    NewBooking {
        guest: GuestInfo {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "555".into(),
        },
        accommodation_id,
        check_in: Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(),
        check_out: Utc.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap(),
        guests: 1,
        total_price: Decimal::new(24500, 2),
        status: BookingStatus::Confirmed,
        created_at: Utc::now(),
        activities: vec![NewActivityBooking {
            activity_id,
            quantity: 2,
            scheduled_date: None,
            price: Decimal::new(5500, 2),
        }],
    }
}

#[tokio::test]
async fn test_failed_activity_insert_rolls_back_booking() {
    let app = TestApp::new().await;
    let dorm_id = app.catalog_id("accommodations", "Shared Dormitory").await;

    let result = app.state.booking_repo.create(&new_booking(dorm_id, 9999)).await;
    assert!(result.is_err());
    assert_eq!(app.count_rows("bookings").await, 0);
    assert_eq!(app.count_rows("activity_bookings").await, 0);

    let kayak_id = app.catalog_id("activities", "Lake Kayaking").await;
    let created = app.state.booking_repo.create(&new_booking(dorm_id, kayak_id)).await.unwrap();
    assert_eq!(created.booking.total_price.to_string(), "245.00");

    let snapshots = app.state.booking_repo.list_activity_bookings(created.booking.id).await.unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].booking_id, created.booking.id);
    assert_eq!(snapshots[0].price.to_string(), "55.00");
}

#[tokio::test]
async fn test_activity_price_is_snapshotted() {
    let app = TestApp::new().await;
    let dorm_id = app.catalog_id("accommodations", "Shared Dormitory").await;
    let kayak_id = app.catalog_id("activities", "Lake Kayaking").await;

    let mut payload = booking_payload("ada@example.com", dorm_id, "2024-07-01", "2024-07-04", 1);
    payload["activities"] = json!([{"activityId": kayak_id, "quantity": 2}]);
    let created = parse_body(app.send_json("POST", "/api/bookings", payload).await).await;
    let id = created["id"].as_i64().unwrap();

    sqlx::query("UPDATE activities SET price = '80.00' WHERE id = ?")
        .bind(kayak_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let fetched = parse_body(app.get(&format!("/api/bookings/{}", id)).await).await;
    assert_eq!(fetched["totalPrice"], "245.00");
    assert_eq!(fetched["activityBookings"][0]["price"], "55.00");
    assert_eq!(fetched["activityBookings"][0]["activity"]["price"], "80.00");
}

#[tokio::test]
async fn test_corrupt_amenities_surface_as_server_error() {
    let app = TestApp::new().await;
    let chalet_id = app.catalog_id("accommodations", "Luxury Mountain Chalet").await;

    sqlx::query("UPDATE accommodations SET amenities = 'not json' WHERE id = ?")
        .bind(chalet_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let res = app.get(&format!("/api/accommodations/{}", chalet_id)).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let err = app.state.catalog_repo.find_accommodation(chalet_id).await.unwrap_err();
    assert!(matches!(err, AppError::DataCorruption(_)));
}

#[tokio::test]
async fn test_update_missing_booking_returns_none() {
    let app = TestApp::new().await;

    let result = app.state.booking_repo
        .update(9999, Box::new(|booking: &mut Booking| -> Result<(), AppError> {
            booking.guest_name = "Nobody".into();
            Ok(())
        }))
        .await
        .unwrap();
    assert!(result.is_none());
    assert_eq!(app.count_rows("bookings").await, 0);
}

#[tokio::test]
async fn test_rejected_mutation_leaves_row_untouched() {
    let app = TestApp::new().await;
    let dorm_id = app.catalog_id("accommodations", "Shared Dormitory").await;
    let kayak_id = app.catalog_id("activities", "Lake Kayaking").await;
    let created = app.state.booking_repo.create(&new_booking(dorm_id, kayak_id)).await.unwrap();
    let id = created.booking.id;

    let err = app.state.booking_repo
        .update(id, Box::new(|booking: &mut Booking| -> Result<(), AppError> {
            booking.guest_name = "Half Written".into();
            Err(AppError::Validation("rejected".into()))
        }))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = app.state.booking_repo.find_booking(id).await.unwrap().unwrap();
    assert_eq!(stored.guest_name, "Ada");
}
