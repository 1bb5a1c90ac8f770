use crate::domain::{
    models::{
        accommodation::Accommodation,
        booking::{ActivityBooking, ActivityBookingWithActivity, Booking, BookingWithDetails, NewBooking},
    },
    ports::{BookingMutation, BookingRepository},
};
use crate::error::AppError;
use crate::infra::repositories::{
    postgres_catalog_repo::ACCOMMODATION_COLUMNS,
    rows::{AccommodationRow, ActivityBookingDetailRow, ActivityBookingRow, BookingRow},
};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::warn;

const BOOKING_COLUMNS: &str =
    "id, guest_name, guest_email, guest_phone, accommodation_id, check_in, check_out, guests, total_price::TEXT AS total_price, status, created_at";
const ACTIVITY_BOOKING_COLUMNS: &str =
    "id, booking_id, activity_id, quantity, scheduled_date, price::TEXT AS price";
const ACTIVITY_DETAIL_QUERY: &str =
    "SELECT ab.id, ab.booking_id, ab.activity_id, ab.quantity, ab.scheduled_date, ab.price::TEXT AS price,
            a.name AS activity_name, a.description AS activity_description, a.price::TEXT AS activity_price,
            a.category AS activity_category, a.image_url AS activity_image_url, a.available AS activity_available
     FROM activity_bookings ab
     INNER JOIN activities a ON a.id = ab.activity_id
     WHERE ab.booking_id = $1
     ORDER BY ab.id ASC";

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn hydrate(conn: &mut PgConnection, booking: Booking) -> Result<Option<BookingWithDetails>, AppError> {
    let accommodation = sqlx::query_as::<_, AccommodationRow>(&format!("SELECT {} FROM accommodations WHERE id = $1", ACCOMMODATION_COLUMNS))
        .bind(booking.accommodation_id)
        .fetch_optional(&mut *conn).await.map_err(AppError::Database)?
        .map(Accommodation::try_from).transpose()?;

    if accommodation.is_none() {
        warn!("Booking {} references missing accommodation {}", booking.id, booking.accommodation_id);
        return Ok(None);
    }

    let activity_bookings = sqlx::query_as::<_, ActivityBookingDetailRow>(ACTIVITY_DETAIL_QUERY)
        .bind(booking.id)
        .fetch_all(&mut *conn).await.map_err(AppError::Database)?
        .into_iter()
        .map(ActivityBookingWithActivity::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BookingWithDetails::assemble(booking, accommodation, activity_bookings))
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &NewBooking) -> Result<BookingWithDetails, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "INSERT INTO bookings (guest_name, guest_email, guest_phone, accommodation_id, check_in, check_out, guests, total_price, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {}",
            BOOKING_COLUMNS
        ))
            .bind(&booking.guest.name).bind(&booking.guest.email).bind(&booking.guest.phone)
            .bind(booking.accommodation_id).bind(booking.check_in).bind(booking.check_out)
            .bind(booking.guests).bind(booking.total_price).bind(booking.status.as_str())
            .bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        let created = Booking::try_from(row)?;

        for activity in &booking.activities {
            sqlx::query("INSERT INTO activity_bookings (booking_id, activity_id, quantity, scheduled_date, price) VALUES ($1, $2, $3, $4, $5)")
                .bind(created.id).bind(activity.activity_id).bind(activity.quantity)
                .bind(activity.scheduled_date).bind(activity.price)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }

        let details = hydrate(&mut *tx, created).await?
            .ok_or_else(|| AppError::Validation(format!("Unknown accommodation: {}", booking.accommodation_id)))?;

        if details.activity_bookings.len() != booking.activities.len() {
            return Err(AppError::Conflict("An activity was removed while the booking was being made".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(details)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookingWithDetails>, AppError> {
        let mut conn = self.pool.acquire().await.map_err(AppError::Database)?;
        let booking = sqlx::query_as::<_, BookingRow>(&format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *conn).await.map_err(AppError::Database)?
            .map(Booking::try_from).transpose()?;

        match booking {
            Some(booking) => hydrate(&mut *conn, booking).await,
            None => Ok(None),
        }
    }

    async fn find_booking(&self, id: i64) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRow>(&format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(Booking::try_from).transpose()
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<BookingWithDetails>, AppError> {
        let mut conn = self.pool.acquire().await.map_err(AppError::Database)?;
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE guest_email = $1 ORDER BY created_at ASC, id ASC",
            BOOKING_COLUMNS
        ))
            .bind(email)
            .fetch_all(&mut *conn).await.map_err(AppError::Database)?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(details) = hydrate(&mut *conn, Booking::try_from(row)?).await? {
                bookings.push(details);
            }
        }
        Ok(bookings)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, BookingRow>(&format!("SELECT {} FROM bookings ORDER BY created_at ASC, id ASC", BOOKING_COLUMNS))
            .fetch_all(&self.pool).await.map_err(AppError::Database)?
            .into_iter().map(Booking::try_from).collect()
    }

    async fn list_activity_bookings(&self, booking_id: i64) -> Result<Vec<ActivityBooking>, AppError> {
        sqlx::query_as::<_, ActivityBookingRow>(&format!(
            "SELECT {} FROM activity_bookings WHERE booking_id = $1 ORDER BY id ASC",
            ACTIVITY_BOOKING_COLUMNS
        ))
            .bind(booking_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?
            .into_iter().map(ActivityBooking::try_from).collect()
    }

    async fn update(&self, id: i64, mutate: BookingMutation) -> Result<Option<Booking>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let Some(mut booking) = sqlx::query_as::<_, BookingRow>(&format!("SELECT {} FROM bookings WHERE id = $1 FOR UPDATE", BOOKING_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .map(Booking::try_from).transpose()?
        else {
            return Ok(None);
        };

        let read_status = booking.status;
        mutate(&mut booking)?;

        let updated = sqlx::query_as::<_, BookingRow>(&format!(
            "UPDATE bookings SET guest_name=$1, guest_email=$2, guest_phone=$3, check_in=$4, check_out=$5, guests=$6, total_price=$7, status=$8
             WHERE id=$9 AND status=$10
             RETURNING {}",
            BOOKING_COLUMNS
        ))
            .bind(&booking.guest_name).bind(&booking.guest_email).bind(&booking.guest_phone)
            .bind(booking.check_in).bind(booking.check_out).bind(booking.guests)
            .bind(booking.total_price).bind(booking.status.as_str())
            .bind(id).bind(read_status.as_str())
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .map(Booking::try_from).transpose()?
            .ok_or_else(|| AppError::Conflict(format!("Booking {} changed while it was being updated", id)))?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(Some(updated))
    }
}
