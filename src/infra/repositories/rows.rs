//! Raw rows as both backends hand them back. Money comes out as decimal text and amenities as
//! JSON text; turning them into domain values is where stored corruption is detected.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::domain::models::{
    accommodation::{decode_amenities, Accommodation, AccommodationType},
    activity::Activity,
    booking::{ActivityBooking, ActivityBookingWithActivity, Booking, BookingStatus},
    money,
};
use crate::error::AppError;

#[derive(Debug, FromRow)]
pub struct AccommodationRow {
    pub id: i64,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub price_per_night: String,
    pub max_guests: i32,
    pub amenities: String,
    pub image_url: String,
    pub available: bool,
}

impl TryFrom<AccommodationRow> for Accommodation {
    type Error = AppError;

    fn try_from(row: AccommodationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            kind: AccommodationType::from_stored(&row.kind)?,
            name: row.name,
            description: row.description,
            price_per_night: money::parse_stored("accommodations.price_per_night", &row.price_per_night)?,
            max_guests: row.max_guests,
            amenities: decode_amenities(&row.amenities)?,
            image_url: row.image_url,
            available: row.available,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct ActivityRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
    pub available: bool,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = AppError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: money::parse_stored("activities.price", &row.price)?,
            category: row.category,
            image_url: row.image_url,
            available: row.available,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct BookingRow {
    pub id: i64,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub accommodation_id: i64,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: i32,
    pub total_price: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            guest_name: row.guest_name,
            guest_email: row.guest_email,
            guest_phone: row.guest_phone,
            accommodation_id: row.accommodation_id,
            check_in: row.check_in,
            check_out: row.check_out,
            guests: row.guests,
            total_price: money::parse_stored("bookings.total_price", &row.total_price)?,
            status: BookingStatus::from_stored(&row.status)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct ActivityBookingRow {
    pub id: i64,
    pub booking_id: i64,
    pub activity_id: i64,
    pub quantity: i32,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub price: String,
}

impl TryFrom<ActivityBookingRow> for ActivityBooking {
    type Error = AppError;

    fn try_from(row: ActivityBookingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            booking_id: row.booking_id,
            activity_id: row.activity_id,
            quantity: row.quantity,
            scheduled_date: row.scheduled_date,
            price: money::parse_stored("activity_bookings.price", &row.price)?,
        })
    }
}

/// One `activity_bookings` row joined with its `activities` row (columns prefixed `activity_`).
#[derive(Debug, FromRow)]
pub struct ActivityBookingDetailRow {
    #[sqlx(flatten)]
    pub activity_booking: ActivityBookingRow,
    pub activity_name: String,
    pub activity_description: String,
    pub activity_price: String,
    pub activity_category: String,
    pub activity_image_url: String,
    pub activity_available: bool,
}

impl TryFrom<ActivityBookingDetailRow> for ActivityBookingWithActivity {
    type Error = AppError;

    fn try_from(row: ActivityBookingDetailRow) -> Result<Self, Self::Error> {
        let activity_booking = ActivityBooking::try_from(row.activity_booking)?;
        let activity = Activity {
            id: activity_booking.activity_id,
            name: row.activity_name,
            description: row.activity_description,
            price: money::parse_stored("activities.price", &row.activity_price)?,
            category: row.activity_category,
            image_url: row.activity_image_url,
            available: row.activity_available,
        };
        Ok(Self { activity_booking, activity })
    }
}
