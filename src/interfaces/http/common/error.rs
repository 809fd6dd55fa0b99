//! Domain error → HTTP response mapping

use axum::{http::StatusCode, Json};
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

/// Error half of every handler's return type.
pub type ApiError<T = ()> = (StatusCode, Json<ApiResponse<T>>);

pub fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Crypto(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Storage failures are logged and replaced by a generic message.
pub fn domain_error_response<T>(e: DomainError) -> ApiError<T> {
    let status = status_for(&e);
    let message = match e {
        DomainError::Storage(detail) => {
            error!(%detail, "Request failed in storage");
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}
