//! Bearer-token extractor for protected routes.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use pvz_core::Role;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that resolves the caller's role from `Authorization: Bearer`.
///
/// A missing header or a non-Bearer scheme is rejected with 401
/// (`Missing token`); a token the credential authority does not recognise is
/// rejected with 403 (`Invalid role`). Whether the role may perform the
/// requested operation is decided by the service, not here.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Caller(role): Caller) -> impl IntoResponse {
///     format!("Hello, {role}!")
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Role);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Missing token".to_string()))?;

        let role = state.credentials().verify(token).map_err(|_| {
            tracing::debug!("Rejected unrecognised bearer token");
            AppError::Forbidden("Invalid role".to_string())
        })?;

        Ok(Self(role))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim())
}
