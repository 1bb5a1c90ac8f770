use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{accommodation, activity, availability, booking, health};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Catalog
        .route("/api/accommodations", get(accommodation::list_accommodations))
        .route("/api/accommodations/{id}", get(accommodation::get_accommodation))
        .route("/api/activities", get(activity::list_activities))
        .route("/api/activities/{id}", get(activity::get_activity))
        .route("/api/check-availability", post(availability::check))

        // Guest Booking Flow
        .route("/api/bookings", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/bookings/dashboard", get(booking::dashboard))
        .route("/api/bookings/{id}", get(booking::get_booking).patch(booking::update_booking))

        // Admin
        .route("/api/admin/bookings", get(booking::list_all_bookings))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
