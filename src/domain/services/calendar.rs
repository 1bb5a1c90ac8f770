use chrono::{DateTime, NaiveDate, Utc};
use crate::error::AppError;

/// Accepts either a calendar date (`2024-07-01`, taken as midnight UTC) or a full RFC 3339
/// timestamp, which is what the booking form and API clients send respectively.
pub fn parse_stay_date(field: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if raw.contains('T') {
        let dt = DateTime::parse_from_rfc3339(raw)
            .map_err(|_| AppError::Validation(format!("{} must be YYYY-MM-DD or an RFC 3339 timestamp", field)))?;
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{} must be YYYY-MM-DD or an RFC 3339 timestamp", field)))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Validation(format!("{} is not a valid date", field)))
}

pub fn parse_optional_stay_date(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_stay_date(field, value).map(Some),
    }
}
