use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::domain::models::{accommodation::Accommodation, activity::Activity, money};
use crate::domain::services::pricing;
use crate::error::AppError;

/// Lifecycle of a stay.
///
/// `confirmed -> checked-in -> checked-out`, and `confirmed | checked-in -> cancelled`.
/// `checked-out` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked-in",
            BookingStatus::CheckedOut => "checked-out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_stored(raw: &str) -> Result<Self, AppError> {
        raw.parse()
            .map_err(|_| AppError::DataCorruption(format!("bookings.status holds unknown value {:?}", raw)))
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        self == next
            || matches!(
                (self, next),
                (Confirmed, CheckedIn) | (CheckedIn, CheckedOut) | (Confirmed, Cancelled) | (CheckedIn, Cancelled)
            )
    }

    pub fn transition_to(self, next: BookingStatus) -> Result<BookingStatus, AppError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AppError::Conflict(format!("Cannot change booking status from {} to {}", self, next)))
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "checked-in" => Ok(BookingStatus::CheckedIn),
            "checked-out" => Ok(BookingStatus::CheckedOut),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(AppError::Validation(format!("Unknown booking status: {}", other))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub accommodation_id: i64,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: i32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// A stay is current until its check-out passes, unless it was cancelled.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.check_out >= now && self.status != BookingStatus::Cancelled
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBooking {
    pub id: i64,
    pub booking_id: i64,
    pub activity_id: i64,
    pub quantity: i32,
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Unit price of the activity when the booking was made.
    pub price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActivityBookingWithActivity {
    #[serde(flatten)]
    pub activity_booking: ActivityBooking,
    pub activity: Activity,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub accommodation: Accommodation,
    pub activity_bookings: Vec<ActivityBookingWithActivity>,
}

impl BookingWithDetails {
    /// Returns `None` when the referenced accommodation is gone; an orphaned booking is never
    /// handed out.
    pub fn assemble(
        booking: Booking,
        accommodation: Option<Accommodation>,
        activity_bookings: Vec<ActivityBookingWithActivity>,
    ) -> Option<Self> {
        let accommodation = accommodation.filter(|a| a.id == booking.accommodation_id)?;
        Some(Self { booking, accommodation, activity_bookings })
    }
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct BookingDashboard {
    pub current: Vec<BookingWithDetails>,
    pub past: Vec<BookingWithDetails>,
}

impl BookingDashboard {
    pub fn split(bookings: Vec<BookingWithDetails>, now: DateTime<Utc>) -> Self {
        let (current, past) = bookings.into_iter().partition(|b| b.booking.is_current(now));
        Self { current, past }
    }
}

#[derive(Debug, Clone)]
pub struct GuestInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct ActivitySelection {
    pub activity_id: i64,
    pub quantity: i32,
    pub scheduled_date: Option<DateTime<Utc>>,
}

pub struct NewBookingParams {
    pub guest: GuestInfo,
    pub accommodation_id: i64,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: i32,
    pub activities: Vec<ActivitySelection>,
}

#[derive(Debug, Clone)]
pub struct NewActivityBooking {
    pub activity_id: i64,
    pub quantity: i32,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub price: Decimal,
}

/// A validated, priced booking that has not been written yet.
///
/// Built only through [`NewBooking::new`], which checks the stay against the catalog records the
/// caller resolved and snapshots the total and every activity price.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub guest: GuestInfo,
    pub accommodation_id: i64,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: i32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub activities: Vec<NewActivityBooking>,
}

impl NewBooking {
    /// `activities` must hold the catalog record for every selection, matched by id.
    pub fn new(params: NewBookingParams, accommodation: &Accommodation, activities: &[Activity]) -> Result<Self, AppError> {
        if params.accommodation_id != accommodation.id {
            return Err(AppError::Validation(format!("Unknown accommodation: {}", params.accommodation_id)));
        }
        validate_guests(params.guests, accommodation)?;

        let nights = pricing::nights(params.check_in, params.check_out);
        if nights <= 0 {
            return Err(AppError::Validation("Check-out must be after check-in".into()));
        }

        let mut priced = Vec::with_capacity(params.activities.len());
        let mut snapshots = Vec::with_capacity(params.activities.len());
        for selection in &params.activities {
            if selection.quantity < 1 {
                return Err(AppError::Validation(format!(
                    "Quantity for activity {} must be at least 1",
                    selection.activity_id
                )));
            }
            let activity = activities
                .iter()
                .find(|a| a.id == selection.activity_id)
                .ok_or_else(|| AppError::Validation(format!("Unknown activity: {}", selection.activity_id)))?;

            priced.push((activity, selection.quantity));
            snapshots.push(NewActivityBooking {
                activity_id: activity.id,
                quantity: selection.quantity,
                scheduled_date: selection.scheduled_date,
                price: money::normalize(activity.price),
            });
        }

        let total_price = pricing::total(accommodation, nights, priced);

        Ok(Self {
            guest: params.guest,
            accommodation_id: accommodation.id,
            check_in: params.check_in,
            check_out: params.check_out,
            guests: params.guests,
            total_price,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            activities: snapshots,
        })
    }
}

fn validate_guests(guests: i32, accommodation: &Accommodation) -> Result<(), AppError> {
    if guests < 1 {
        return Err(AppError::Validation("Guests must be at least 1".into()));
    }
    if guests > accommodation.max_guests {
        return Err(AppError::Validation(format!(
            "{} sleeps at most {} guest(s)",
            accommodation.name, accommodation.max_guests
        )));
    }
    Ok(())
}

/// Field-level changes to an existing booking. `id`, `accommodation_id` and `created_at` are not
/// representable here.
#[derive(Debug, Clone, Default)]
pub struct BookingPatch {
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub guests: Option<i32>,
    pub status: Option<BookingStatus>,
    pub total_price: Option<Decimal>,
}

impl BookingPatch {
    /// Applies the patch and re-checks the stay. The stored total is only replaced when the patch
    /// carries one explicitly.
    pub fn apply(self, booking: &mut Booking, accommodation: Option<&Accommodation>) -> Result<(), AppError> {
        if let Some(status) = self.status {
            booking.status = booking.status.transition_to(status)?;
        }
        if let Some(name) = self.guest_name { booking.guest_name = name; }
        if let Some(email) = self.guest_email { booking.guest_email = email; }
        if let Some(phone) = self.guest_phone { booking.guest_phone = phone; }
        if let Some(check_in) = self.check_in { booking.check_in = check_in; }
        if let Some(check_out) = self.check_out { booking.check_out = check_out; }

        if let Some(guests) = self.guests {
            match accommodation {
                Some(acc) => validate_guests(guests, acc)?,
                None if guests < 1 => return Err(AppError::Validation("Guests must be at least 1".into())),
                None => {}
            }
            booking.guests = guests;
        }

        if let Some(total) = self.total_price {
            booking.total_price = money::ensure_non_negative("totalPrice", total)?;
        }

        if pricing::nights(booking.check_in, booking.check_out) <= 0 {
            return Err(AppError::Validation("Check-out must be after check-in".into()));
        }
        Ok(())
    }
}
