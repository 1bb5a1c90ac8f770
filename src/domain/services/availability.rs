use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::models::accommodation::{Accommodation, AccommodationType};
use crate::domain::services::pricing;
use crate::error::AppError;

#[derive(Debug, Clone, Default)]
pub struct AvailabilityQuery {
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub kind: Option<AccommodationType>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResult {
    pub available: bool,
    pub accommodations: Vec<Accommodation>,
}

/// Lists bookable accommodations, optionally narrowed to one type.
///
/// Existing bookings are not consulted, so the answer is always `available: true`.
pub fn check_availability(
    accommodations: Vec<Accommodation>,
    query: &AvailabilityQuery,
) -> Result<AvailabilityResult, AppError> {
    if let (Some(check_in), Some(check_out)) = (query.check_in, query.check_out)
        && pricing::nights(check_in, check_out) <= 0 {
        return Err(AppError::Validation("Check-out must be after check-in".into()));
    }

    let accommodations = accommodations
        .into_iter()
        .filter(|acc| acc.available)
        .filter(|acc| query.kind.is_none_or(|kind| acc.kind == kind))
        .collect();

    Ok(AvailabilityResult { available: true, accommodations })
}
