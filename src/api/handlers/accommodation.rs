use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::resource_id::ResourceId;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_accommodations(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let accommodations = state.catalog_repo.list_accommodations().await?;
    Ok(Json(accommodations))
}

pub async fn get_accommodation(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, AppError> {
    let accommodation = state.catalog_repo.find_accommodation(id).await?
        .ok_or(AppError::NotFound("Accommodation not found".into()))?;
    Ok(Json(accommodation))
}
