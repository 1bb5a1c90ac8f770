use axum::{extract::{Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateBookingRequest, EmailQuery, UpdateBookingRequest};
use crate::api::extractors::{resource_id::ResourceId, validated_json::ValidatedJson};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let params = payload.into_params()?;
    let created = state.booking_service.create_booking(params).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let email = query.required()?;
    let bookings = state.booking_service.bookings_for_email(&email).await?;
    Ok(Json(bookings))
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let email = query.required()?;
    let dashboard = state.booking_service.dashboard(&email, Utc::now()).await?;
    Ok(Json(dashboard))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.get_booking(id).await?;
    Ok(Json(booking))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
    ValidatedJson(payload): ValidatedJson<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patch = payload.into_patch()?;
    let updated = state.booking_service.update_booking(id, patch).await?;
    Ok(Json(updated))
}

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_all().await?;
    info!("Admin listed {} bookings", bookings.len());
    Ok(Json(bookings))
}
