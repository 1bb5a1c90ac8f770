use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use crate::domain::models::{accommodation::Accommodation, activity::Activity, money};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole nights between the two instants, rounded up. Zero or negative means the range is not a
/// stay and must be rejected by the caller.
pub fn nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let millis = (check_out - check_in).num_milliseconds();
    if millis > 0 {
        (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    } else {
        millis / MILLIS_PER_DAY
    }
}

pub fn accommodation_cost(accommodation: &Accommodation, nights: i64) -> Decimal {
    money::normalize(accommodation.price_per_night * Decimal::from(nights))
}

pub fn activity_cost(activity: &Activity, quantity: i32) -> Decimal {
    money::normalize(activity.price * Decimal::from(quantity))
}

pub fn total<'a, I>(accommodation: &Accommodation, nights: i64, selections: I) -> Decimal
where
    I: IntoIterator<Item = (&'a Activity, i32)>,
{
    let activities: Decimal = selections
        .into_iter()
        .map(|(activity, quantity)| activity_cost(activity, quantity))
        .sum();
    money::normalize(accommodation_cost(accommodation, nights) + activities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::accommodation::AccommodationType;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn d(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    fn lodging(price: &str) -> Accommodation {
        Accommodation {
            id: 1,
            kind: AccommodationType::Chalet,
            name: "Chalet".into(),
            description: ".".into(),
            price_per_night: d(price),
            max_guests: 6,
            amenities: vec![],
            image_url: ".".into(),
            available: true,
        }
    }

    fn activity(id: i64, price: &str) -> Activity {
        Activity {
            id,
            name: format!("Activity {}", id),
            description: ".".into(),
            price: d(price),
            category: "adventure".into(),
            image_url: ".".into(),
            available: true,
        }
    }

    #[test]
    fn test_nights_rounds_partial_days_up() {
        let check_in = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(nights(check_in, Utc.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap()), 3);
        assert_eq!(nights(check_in, Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()), 1);
        assert_eq!(nights(check_in, Utc.with_ymd_and_hms(2024, 7, 2, 0, 0, 1).unwrap()), 2);
        assert_eq!(nights(check_in, check_in), 0);
        assert!(nights(check_in, Utc.with_ymd_and_hms(2024, 6, 28, 0, 0, 0).unwrap()) < 0);
    }

    #[test]
    fn test_chalet_with_horse_riding() {
        let riding = activity(1, "75.00");
        let total = total(&lodging("180.00"), 3, [(&riding, 1)]);
        assert_eq!(total, d("615.00"));
        assert_eq!(total.to_string(), "615.00");
    }

    #[test]
    fn test_dorm_with_two_kayak_sessions() {
        let kayak = activity(5, "55.00");
        assert_eq!(total(&lodging("45.00"), 3, [(&kayak, 2)]), d("245.00"));
    }

    #[test]
    fn test_no_drift_on_repeated_cents() {
        let snack = activity(9, "0.10");
        let selections: Vec<(&Activity, i32)> = (0..30).map(|_| (&snack, 1)).collect();
        assert_eq!(total(&lodging("0.00"), 1, selections), d("3.00"));
        assert_eq!(accommodation_cost(&lodging("33.33"), 3).to_string(), "99.99");
    }

    #[test]
    fn test_activity_cost_scales_with_quantity() {
        assert_eq!(activity_cost(&activity(2, "90.00"), 4), d("360.00"));
        assert_eq!(total(&lodging("25.00"), 2, std::iter::empty::<(&Activity, i32)>()), d("50.00"));
    }
}
