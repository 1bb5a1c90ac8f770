use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use crate::error::AppError;

/// Money is carried with two fractional digits everywhere (`180.00`, not `180`).
pub const MONEY_SCALE: u32 = 2;

pub fn normalize(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Parses a decimal that was written by this service. Anything unparseable means the row was
/// tampered with or written by something else.
pub fn parse_stored(column: &str, raw: &str) -> Result<Decimal, AppError> {
    Decimal::from_str(raw.trim())
        .map(normalize)
        .map_err(|e| AppError::DataCorruption(format!("{} holds non-decimal value {:?}: {}", column, raw, e)))
}

pub fn ensure_non_negative(field: &str, amount: Decimal) -> Result<Decimal, AppError> {
    if amount < Decimal::ZERO {
        return Err(AppError::Validation(format!("{} must not be negative", field)));
    }
    Ok(normalize(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn test_normalize_pads_scale() {
        assert_eq!(normalize(d("180")).to_string(), "180.00");
        assert_eq!(normalize(d("0.005")).to_string(), "0.01");
        assert_eq!(normalize(d("12.344")).to_string(), "12.34");
    }

    #[test]
    fn test_parse_stored_rejects_garbage() {
        assert_eq!(parse_stored("price", "45.00").unwrap(), d("45.00"));
        assert!(matches!(parse_stored("price", "forty-five"), Err(AppError::DataCorruption(_))));
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(ensure_non_negative("totalPrice", d("-1.00")).is_err());
        assert_eq!(ensure_non_negative("totalPrice", d("0")).unwrap().to_string(), "0.00");
    }
}
