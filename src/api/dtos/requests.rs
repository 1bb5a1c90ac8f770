use rust_decimal::Decimal;
use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};
use crate::domain::models::{
    accommodation::AccommodationType,
    booking::{ActivitySelection, BookingPatch, BookingStatus, GuestInfo, NewBookingParams},
};
use crate::domain::services::{availability::AvailabilityQuery, calendar::{parse_optional_stay_date, parse_stay_date}};
use crate::error::AppError;

fn default_quantity() -> i32 {
    1
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("must not be blank")));
    }
    Ok(())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySelectionRequest {
    pub activity_id: i64,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 50, message = "Quantity must be between 1 and 50"))]
    pub quantity: i32,
    pub scheduled_date: Option<String>,
}

/// Body of `POST /api/bookings`. Any `totalPrice` or `status` the client sends is ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(custom(function = "non_blank"))]
    pub guest_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub guest_email: String,
    #[validate(custom(function = "non_blank"))]
    pub guest_phone: String,
    pub accommodation_id: i64,
    pub check_in: String,
    pub check_out: String,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests: i32,
    #[serde(default)]
    #[validate(nested)]
    pub activities: Vec<ActivitySelectionRequest>,
}

impl CreateBookingRequest {
    pub fn into_params(self) -> Result<NewBookingParams, AppError> {
        let check_in = parse_stay_date("checkIn", &self.check_in)?;
        let check_out = parse_stay_date("checkOut", &self.check_out)?;

        let activities = self.activities
            .into_iter()
            .map(|a| {
                Ok(ActivitySelection {
                    activity_id: a.activity_id,
                    quantity: a.quantity,
                    scheduled_date: parse_optional_stay_date("scheduledDate", a.scheduled_date.as_deref())?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(NewBookingParams {
            guest: GuestInfo {
                name: self.guest_name.trim().to_string(),
                email: self.guest_email.trim().to_string(),
                phone: self.guest_phone.trim().to_string(),
            },
            accommodation_id: self.accommodation_id,
            check_in,
            check_out,
            guests: self.guests,
            activities,
        })
    }
}

/// Body of `PATCH /api/bookings/{id}`. Unknown fields (`id`, `createdAt`, ...) are dropped.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[validate(custom(function = "non_blank"))]
    pub guest_name: Option<String>,
    #[validate(email(message = "A valid email address is required"))]
    pub guest_email: Option<String>,
    #[validate(custom(function = "non_blank"))]
    pub guest_phone: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests: Option<i32>,
    pub status: Option<String>,
    pub total_price: Option<Decimal>,
}

impl UpdateBookingRequest {
    pub fn into_patch(self) -> Result<BookingPatch, AppError> {
        Ok(BookingPatch {
            guest_name: trimmed(self.guest_name),
            guest_email: trimmed(self.guest_email),
            guest_phone: trimmed(self.guest_phone),
            check_in: self.check_in.as_deref().map(|raw| parse_stay_date("checkIn", raw)).transpose()?,
            check_out: self.check_out.as_deref().map(|raw| parse_stay_date("checkOut", raw)).transpose()?,
            guests: self.guests,
            status: self.status.as_deref().map(str::parse::<BookingStatus>).transpose()?,
            total_price: self.total_price,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    pub fn required(self) -> Result<String, AppError> {
        self.email
            .filter(|e| !e.trim().is_empty())
            .ok_or(AppError::Validation("Email parameter is required".into()))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailabilityRequest {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub accommodation_type: Option<String>,
}

impl CheckAvailabilityRequest {
    pub fn into_query(self) -> Result<AvailabilityQuery, AppError> {
        let kind = match self.accommodation_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<AccommodationType>()?),
        };
        Ok(AvailabilityQuery {
            check_in: parse_optional_stay_date("checkIn", self.check_in.as_deref())?,
            check_out: parse_optional_stay_date("checkOut", self.check_out.as_deref())?,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_defaults_to_one() {
        let req: CreateBookingRequest = serde_json::from_value(json!({
            "guestName": "Ada", "guestEmail": "ada@example.com", "guestPhone": "555",
            "accommodationId": 1, "checkIn": "2024-07-01", "checkOut": "2024-07-04", "guests": 2,
            "activities": [{"activityId": 3}],
            "totalPrice": "0.01"
        })).unwrap();
        assert!(req.validate().is_ok());

        let params = req.into_params().unwrap();
        assert_eq!(params.activities[0].quantity, 1);
        assert!(params.activities[0].scheduled_date.is_none());
    }

    #[test]
    fn test_field_errors_are_reported_per_field() {
        let req: CreateBookingRequest = serde_json::from_value(json!({
            "guestName": "", "guestEmail": "not-an-email", "guestPhone": "555",
            "accommodationId": 1, "checkIn": "2024-07-01", "checkOut": "2024-07-04", "guests": 0,
            "activities": [{"activityId": 3, "quantity": 0}]
        })).unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.errors();
        assert_eq!(fields.len(), 4);
        assert!(fields.contains_key("guests"));
        assert!(fields.contains_key("activities"));
    }

    #[test]
    fn test_blank_guest_details_are_rejected() {
        let req: CreateBookingRequest = serde_json::from_value(json!({
            "guestName": "   ", "guestEmail": "ada@example.com", "guestPhone": "\t",
            "accommodationId": 1, "checkIn": "2024-07-01", "checkOut": "2024-07-04", "guests": 1
        })).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 2);

        let req = UpdateBookingRequest { guest_phone: Some("  ".into()), ..Default::default() };
        assert!(req.validate().is_err());

        let req = UpdateBookingRequest { guest_name: Some("  Ada King ".into()), ..Default::default() };
        assert!(req.validate().is_ok());
        assert_eq!(req.into_patch().unwrap().guest_name.as_deref(), Some("Ada King"));
    }

    #[test]
    fn test_quantity_is_bounded() {
        let selection = |quantity: i32| ActivitySelectionRequest { activity_id: 1, quantity, scheduled_date: None };
        assert!(selection(50).validate().is_ok());
        assert!(selection(51).validate().is_err());
        assert!(selection(i32::MAX).validate().is_err());
    }

    #[test]
    fn test_patch_rejects_unknown_status() {
        let req = UpdateBookingRequest { status: Some("archived".into()), ..Default::default() };
        assert!(matches!(req.into_patch(), Err(AppError::Validation(_))));

        let req = UpdateBookingRequest { status: Some("cancelled".into()), ..Default::default() };
        assert_eq!(req.into_patch().unwrap().status, Some(BookingStatus::Cancelled));
    }

    #[test]
    fn test_email_query_required() {
        assert!(EmailQuery { email: None }.required().is_err());
        assert!(EmailQuery { email: Some("  ".into()) }.required().is_err());
        assert_eq!(EmailQuery { email: Some("a@b.co".into()) }.required().unwrap(), "a@b.co");
    }

    #[test]
    fn test_availability_type_parsing() {
        let req = CheckAvailabilityRequest { accommodation_type: Some("dorm".into()), ..Default::default() };
        assert_eq!(req.into_query().unwrap().kind, Some(AccommodationType::Dorm));

        let req = CheckAvailabilityRequest { accommodation_type: Some("".into()), ..Default::default() };
        assert!(req.into_query().unwrap().kind.is_none());

        let req = CheckAvailabilityRequest { accommodation_type: Some("treehouse".into()), ..Default::default() };
        assert!(req.into_query().is_err());
    }
}
