use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    Chalet,
    Dorm,
    Camping,
}

impl AccommodationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationType::Chalet => "chalet",
            AccommodationType::Dorm => "dorm",
            AccommodationType::Camping => "camping",
        }
    }

    /// Reading back a type this service did not write is corruption, not bad input.
    pub fn from_stored(raw: &str) -> Result<Self, AppError> {
        raw.parse()
            .map_err(|_| AppError::DataCorruption(format!("accommodations.type holds unknown value {:?}", raw)))
    }
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccommodationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chalet" => Ok(AccommodationType::Chalet),
            "dorm" => Ok(AccommodationType::Dorm),
            "camping" => Ok(AccommodationType::Camping),
            other => Err(AppError::Validation(format!("Unknown accommodation type: {}", other))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: AccommodationType,
    pub name: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub max_guests: i32,
    pub amenities: Vec<String>,
    pub image_url: String,
    pub available: bool,
}

#[derive(Debug, Clone)]
pub struct NewAccommodation {
    pub kind: AccommodationType,
    pub name: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub max_guests: i32,
    pub amenities: Vec<String>,
    pub image_url: String,
    pub available: bool,
}

/// Amenities are persisted as a JSON array in a text column.
pub fn encode_amenities(amenities: &[String]) -> Result<String, AppError> {
    serde_json::to_string(amenities).map_err(|e| AppError::InternalWithMsg(format!("Failed to encode amenities: {}", e)))
}

pub fn decode_amenities(raw: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::DataCorruption(format!("accommodations.amenities is not a JSON string list ({}): {:?}", e, raw)))
}
