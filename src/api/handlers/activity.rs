use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::resource_id::ResourceId;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let activities = state.catalog_repo.list_activities().await?;
    Ok(Json(activities))
}

pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, AppError> {
    let activity = state.catalog_repo.find_activity(id).await?
        .ok_or(AppError::NotFound("Activity not found".into()))?;
    Ok(Json(activity))
}
