use crate::domain::{
    models::{
        accommodation::{encode_amenities, Accommodation, NewAccommodation},
        activity::{Activity, NewActivity},
        money,
    },
    ports::CatalogRepository,
};
use crate::error::AppError;
use crate::infra::repositories::rows::{AccommodationRow, ActivityRow};
use async_trait::async_trait;
use sqlx::PgPool;

pub(crate) const ACCOMMODATION_COLUMNS: &str =
    "id, type, name, description, price_per_night::TEXT AS price_per_night, max_guests, amenities, image_url, available";
const ACTIVITY_COLUMNS: &str =
    "id, name, description, price::TEXT AS price, category, image_url, available";

pub struct PostgresCatalogRepo {
    pool: PgPool,
}

impl PostgresCatalogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepo {
    async fn list_accommodations(&self) -> Result<Vec<Accommodation>, AppError> {
        sqlx::query_as::<_, AccommodationRow>(&format!("SELECT {} FROM accommodations ORDER BY id ASC", ACCOMMODATION_COLUMNS))
            .fetch_all(&self.pool).await.map_err(AppError::Database)?
            .into_iter().map(Accommodation::try_from).collect()
    }

    async fn find_accommodation(&self, id: i64) -> Result<Option<Accommodation>, AppError> {
        sqlx::query_as::<_, AccommodationRow>(&format!("SELECT {} FROM accommodations WHERE id = $1", ACCOMMODATION_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(Accommodation::try_from).transpose()
    }

    async fn create_accommodation(&self, accommodation: &NewAccommodation) -> Result<Accommodation, AppError> {
        let row = sqlx::query_as::<_, AccommodationRow>(&format!(
            "INSERT INTO accommodations (type, name, description, price_per_night, max_guests, amenities, image_url, available)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            ACCOMMODATION_COLUMNS
        ))
            .bind(accommodation.kind.as_str()).bind(&accommodation.name).bind(&accommodation.description)
            .bind(money::normalize(accommodation.price_per_night)).bind(accommodation.max_guests)
            .bind(encode_amenities(&accommodation.amenities)?).bind(&accommodation.image_url).bind(accommodation.available)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Accommodation::try_from(row)
    }

    async fn count_accommodations(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accommodations")
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        sqlx::query_as::<_, ActivityRow>(&format!("SELECT {} FROM activities ORDER BY id ASC", ACTIVITY_COLUMNS))
            .fetch_all(&self.pool).await.map_err(AppError::Database)?
            .into_iter().map(Activity::try_from).collect()
    }

    async fn find_activity(&self, id: i64) -> Result<Option<Activity>, AppError> {
        sqlx::query_as::<_, ActivityRow>(&format!("SELECT {} FROM activities WHERE id = $1", ACTIVITY_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(Activity::try_from).transpose()
    }

    async fn create_activity(&self, activity: &NewActivity) -> Result<Activity, AppError> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            "INSERT INTO activities (name, description, price, category, image_url, available)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            ACTIVITY_COLUMNS
        ))
            .bind(&activity.name).bind(&activity.description).bind(money::normalize(activity.price))
            .bind(&activity.category).bind(&activity.image_url).bind(activity.available)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Activity::try_from(row)
    }
}
