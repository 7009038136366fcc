//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Every error response is JSON of the form
//! `{"message": "..."}`. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ServiceError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A service operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// No usable credential was presented.
    #[error("{0}")]
    Unauthorized(String),

    /// Credential did not verify.
    #[error("{0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err {
                ServiceError::Capability(_) => StatusCode::FORBIDDEN,
                ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                ServiceError::Listing(_)
                | ServiceError::CityNotAllowed(_)
                | ServiceError::PickupPointExists
                | ServiceError::PickupPointNotFound
                | ServiceError::AlreadyOpen
                | ServiceError::NoActiveReception
                | ServiceError::NothingToDelete => StatusCode::BAD_REQUEST,
            },
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Internal(_) | Self::Service(ServiceError::Store(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose internal error details to clients
        let message = if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
            self.to_string()
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use pvz_core::{CapabilityError, Operation, Role};

    use super::*;
    use crate::db::RepositoryError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn get_message(err: AppError) -> String {
        let body = to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["message"].as_str().unwrap().to_owned()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Unauthorized("Missing token".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("Invalid role".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::BadRequest("Invalid input".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_service_error_status_codes() {
        let forbidden = ServiceError::Capability(CapabilityError::Forbidden {
            role: Role::Employee,
            operation: Operation::CreatePickupPoint,
        });
        assert_eq!(get_status(forbidden.into()), StatusCode::FORBIDDEN);

        for err in [
            ServiceError::CityNotAllowed("Omsk".to_string()),
            ServiceError::PickupPointExists,
            ServiceError::PickupPointNotFound,
            ServiceError::AlreadyOpen,
            ServiceError::NoActiveReception,
            ServiceError::NothingToDelete,
        ] {
            assert_eq!(get_status(err.into()), StatusCode::BAD_REQUEST);
        }

        let store = ServiceError::Store(RepositoryError::NotFound);
        assert_eq!(
            get_status(store.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_messages() {
        assert_eq!(
            get_message(ServiceError::AlreadyOpen.into()).await,
            "already an open reception"
        );
        assert_eq!(
            get_message(ServiceError::NothingToDelete.into()).await,
            "no products to delete or no active receptions"
        );
        assert_eq!(
            get_message(ServiceError::CityNotAllowed("Omsk".to_string()).into()).await,
            "city not allowed"
        );
        assert_eq!(
            get_message(AppError::Unauthorized("Missing token".to_string())).await,
            "Missing token"
        );
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let err = AppError::Internal("connection refused on 10.0.0.3".to_string());
        assert_eq!(get_message(err).await, "Internal server error");
    }
}
