//! HTTP mapping for domain errors.
//!
//! Authorization and not-found failures share one body so the message never
//! tells a caller whether an id exists. The status differs, but a not-found
//! status is only reachable with a valid credential.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domains::errors::DomainError;
use tracing::error;

/// Body sent for every failure that must stay opaque to the caller.
pub const GENERIC_FAILURE: &str = "operation failed";

/// Convenient result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized => StatusCode::FORBIDDEN,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let body = match self.0 {
            DomainError::Validation(message) => message,
            DomainError::StorageUnavailable(detail) => {
                error!(%detail, "request failed on storage");
                GENERIC_FAILURE.to_string()
            }
            DomainError::Unauthorized | DomainError::NotFound(_) => GENERIC_FAILURE.to_string(),
        };
        (status, body).into_response()
    }
}
