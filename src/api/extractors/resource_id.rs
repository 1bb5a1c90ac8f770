use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use crate::error::AppError;

/// Numeric `{id}` path segment. Non-numeric ids are rejected with a JSON 400.
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Validation("Missing id".into()))?;

        raw.trim()
            .parse::<i64>()
            .map(ResourceId)
            .map_err(|_| AppError::Validation(format!("Invalid id: {}", raw)))
    }
}
