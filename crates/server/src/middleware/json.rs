//! JSON body extractor with API-shaped rejections.

use axum::{
    extract::{FromRequest, Request, rejection::JsonRejection},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `Json<T>` whose rejection is a 400 `{"message": "Invalid input"}`.
///
/// Malformed JSON, a wrong content type, a bad uuid or an unknown enum value
/// all end up here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_input(&rejection)),
        }
    }
}

fn invalid_input(rejection: &JsonRejection) -> AppError {
    tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
    AppError::BadRequest("Invalid input".to_string())
}
