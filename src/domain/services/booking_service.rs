use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use crate::domain::{
    models::{
        activity::Activity,
        booking::{Booking, BookingDashboard, BookingPatch, BookingWithDetails, NewBooking, NewBookingParams},
    },
    ports::{BookingMutation, BookingRepository, CatalogRepository},
};
use crate::error::AppError;

pub struct BookingService {
    catalog: Arc<dyn CatalogRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { catalog, bookings }
    }

    /// Resolves the stay against the current catalog, prices it, and writes it atomically.
    pub async fn create_booking(&self, params: NewBookingParams) -> Result<BookingWithDetails, AppError> {
        let accommodation = self.catalog.find_accommodation(params.accommodation_id).await?
            .ok_or_else(|| AppError::Validation(format!("Unknown accommodation: {}", params.accommodation_id)))?;

        let mut activities: Vec<Activity> = Vec::with_capacity(params.activities.len());
        for selection in &params.activities {
            if activities.iter().any(|a| a.id == selection.activity_id) {
                continue;
            }
            let activity = self.catalog.find_activity(selection.activity_id).await?
                .ok_or_else(|| AppError::Validation(format!("Unknown activity: {}", selection.activity_id)))?;
            activities.push(activity);
        }

        let new_booking = NewBooking::new(params, &accommodation, &activities)?;
        let created = self.bookings.create(&new_booking).await?;

        info!(
            booking_id = created.booking.id,
            accommodation_id = created.accommodation.id,
            activities = created.activity_bookings.len(),
            total = %created.booking.total_price,
            "Booking created"
        );
        Ok(created)
    }

    pub async fn get_booking(&self, id: i64) -> Result<BookingWithDetails, AppError> {
        self.bookings.find_by_id(id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }

    pub async fn bookings_for_email(&self, email: &str) -> Result<Vec<BookingWithDetails>, AppError> {
        self.bookings.list_by_email(email).await
    }

    pub async fn dashboard(&self, email: &str, now: DateTime<Utc>) -> Result<BookingDashboard, AppError> {
        let bookings = self.bookings.list_by_email(email).await?;
        Ok(BookingDashboard::split(bookings, now))
    }

    pub async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        self.bookings.list_all().await
    }

    /// Applies `patch` to the booking as it stands when the repository locks it, so a status
    /// change made by another request in the meantime is validated rather than overwritten.
    pub async fn update_booking(&self, id: i64, patch: BookingPatch) -> Result<Booking, AppError> {
        let current = self.bookings.find_booking(id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        // accommodation_id is never patched, so this lookup cannot go stale.
        let accommodation = if patch.guests.is_some() {
            let found = self.catalog.find_accommodation(current.accommodation_id).await?;
            if found.is_none() {
                warn!("Booking {} references missing accommodation {}", current.id, current.accommodation_id);
            }
            found
        } else {
            None
        };

        let mutation: BookingMutation = Box::new(move |booking: &mut Booking| patch.apply(booking, accommodation.as_ref()));
        let updated = self.bookings.update(id, mutation).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        info!(booking_id = updated.id, status = %updated.status, "Booking updated");
        Ok(updated)
    }
}
