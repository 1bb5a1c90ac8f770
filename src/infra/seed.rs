use rust_decimal::Decimal;
use tracing::info;
use crate::domain::{
    models::{
        accommodation::{AccommodationType, NewAccommodation},
        activity::NewActivity,
    },
    ports::CatalogRepository,
};
use crate::error::AppError;

fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn amenities(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_accommodations() -> Vec<NewAccommodation> {
    vec![
        NewAccommodation {
            kind: AccommodationType::Chalet,
            name: "Luxury Mountain Chalet".into(),
            description: "Spacious wooden chalets with full amenities, private bathrooms, and stunning mountain views.".into(),
            price_per_night: price(18000),
            max_guests: 6,
            amenities: amenities(&["WiFi", "Private Bath", "Fireplace", "Kitchen", "Mountain View"]),
            image_url: "https://images.unsplash.com/photo-1582268611958-ebfd161ef9cf?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=500".into(),
            available: true,
        },
        NewAccommodation {
            kind: AccommodationType::Dorm,
            name: "Shared Dormitory".into(),
            description: "Comfortable bunk beds in shared accommodations, perfect for solo travelers and groups.".into(),
            price_per_night: price(4500),
            max_guests: 1,
            amenities: amenities(&["WiFi", "Shared Bath", "Lockers", "Common Area"]),
            image_url: "https://images.unsplash.com/photo-1555854877-bab0e564b8d5?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=500".into(),
            available: true,
        },
        NewAccommodation {
            kind: AccommodationType::Camping,
            name: "Premium Camping Spot".into(),
            description: "Designated camping areas with fire pits and access to shared facilities for the true outdoor experience.".into(),
            price_per_night: price(2500),
            max_guests: 4,
            amenities: amenities(&["Fire Pit", "Shared Facilities", "Parking", "Picnic Table"]),
            image_url: "https://images.unsplash.com/photo-1504851149312-7a075b496cc7?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=500".into(),
            available: true,
        },
    ]
}

pub fn default_activities() -> Vec<NewActivity> {
    let activity = |name: &str, description: &str, cents: i64, category: &str, image: &str| NewActivity {
        name: name.into(),
        description: description.into(),
        price: price(cents),
        category: category.into(),
        image_url: format!("https://images.unsplash.com/{}?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=300", image),
        available: true,
    };

    vec![
        activity("Horse Riding", "Explore mountain trails on horseback with experienced guides.", 7500, "adventure", "photo-1553284965-83fd3e82fa5a"),
        activity("Quad Biking", "Thrilling off-road adventures through forest trails.", 9000, "adventure", "photo-1558618047-3c8c76ca7d13"),
        activity("Team Building", "Professional facilitated team activities and challenges.", 12000, "group", "photo-1552664730-d307ca884978"),
        activity("Guided Hiking", "Discover hidden trails and scenic viewpoints with local guides.", 4500, "nature", "photo-1551632811-561732d1e306"),
        activity("Lake Kayaking", "Peaceful paddling on crystal clear mountain lakes.", 5500, "water", "photo-1544551763-46a013bb70d5"),
        activity("Meal Package", "Full-day dining with locally sourced ingredients.", 3500, "dining", "photo-1555939594-58d7cb561ad1"),
    ]
}

/// Fills an empty catalog. Does nothing once any accommodation exists.
pub async fn seed_catalog(catalog: &dyn CatalogRepository) -> Result<bool, AppError> {
    if catalog.count_accommodations().await? > 0 {
        info!("Catalog already seeded");
        return Ok(false);
    }

    for accommodation in default_accommodations() {
        catalog.create_accommodation(&accommodation).await?;
    }
    for activity in default_activities() {
        catalog.create_activity(&activity).await?;
    }

    info!("Catalog seeded with default accommodations and activities");
    Ok(true)
}
