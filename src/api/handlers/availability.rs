use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CheckAvailabilityRequest;
use crate::api::extractors::validated_json::ValidatedJson;
use crate::domain::services::availability::check_availability;
use crate::error::AppError;
use std::sync::Arc;

pub async fn check(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CheckAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let query = payload.into_query()?;
    let accommodations = state.catalog_repo.list_accommodations().await?;
    let result = check_availability(accommodations, &query)?;
    Ok(Json(result))
}
