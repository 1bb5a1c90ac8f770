use crate::domain::models::{
    accommodation::{Accommodation, NewAccommodation},
    activity::{Activity, NewActivity},
    booking::{ActivityBooking, Booking, BookingWithDetails, NewBooking},
};
use crate::error::AppError;
use async_trait::async_trait;

/// Edit applied to the freshly locked row inside `BookingRepository::update`. An `Err` aborts the
/// update and leaves the row untouched.
pub type BookingMutation = Box<dyn FnOnce(&mut Booking) -> Result<(), AppError> + Send>;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_accommodations(&self) -> Result<Vec<Accommodation>, AppError>;
    async fn find_accommodation(&self, id: i64) -> Result<Option<Accommodation>, AppError>;
    async fn create_accommodation(&self, accommodation: &NewAccommodation) -> Result<Accommodation, AppError>;
    async fn count_accommodations(&self) -> Result<i64, AppError>;

    async fn list_activities(&self) -> Result<Vec<Activity>, AppError>;
    async fn find_activity(&self, id: i64) -> Result<Option<Activity>, AppError>;
    async fn create_activity(&self, activity: &NewActivity) -> Result<Activity, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Writes the booking and all of its activity bookings in one transaction and returns the
    /// hydrated view read back inside that transaction.
    async fn create(&self, booking: &NewBooking) -> Result<BookingWithDetails, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<BookingWithDetails>, AppError>;
    async fn find_booking(&self, id: i64) -> Result<Option<Booking>, AppError>;
    async fn list_by_email(&self, email: &str) -> Result<Vec<BookingWithDetails>, AppError>;
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;
    async fn list_activity_bookings(&self, booking_id: i64) -> Result<Vec<ActivityBooking>, AppError>;
    /// Locks the booking, applies `mutate` to its current state and writes the result, all in
    /// one transaction. `None` when the booking does not exist.
    async fn update(&self, id: i64, mutate: BookingMutation) -> Result<Option<Booking>, AppError>;
}
