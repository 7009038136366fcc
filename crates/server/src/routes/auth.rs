//! Token issuance.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use pvz_core::capability;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// `POST /dummyLogin` body.
#[derive(Debug, Deserialize)]
pub struct DummyLoginRequest {
    pub role: String,
}

/// `POST /dummyLogin` response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a bearer token for the requested role.
///
/// Any malformed body or unknown role is a 400 `Invalid role`.
pub async fn dummy_login(
    State(state): State<AppState>,
    body: std::result::Result<Json<DummyLoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let invalid_role = || AppError::BadRequest("Invalid role".to_string());

    let Json(request) = body.map_err(|_| invalid_role())?;
    let role = capability::resolve(&request.role).map_err(|_| invalid_role())?;

    tracing::debug!(role = %role, "Issued dummy token");
    Ok(Json(TokenResponse {
        token: state.credentials().issue(role),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::routes::test_support::{app, body_json, json_request};

    #[tokio::test]
    async fn test_issues_token_per_role() {
        for role in ["moderator", "employee"] {
            let response = app()
                .oneshot(json_request(
                    "POST",
                    "/dummyLogin",
                    None,
                    &format!(r#"{{"role":"{role}"}}"#),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["token"], role);
        }
    }

    #[tokio::test]
    async fn test_rejects_unknown_role() {
        let response = app()
            .oneshot(json_request("POST", "/dummyLogin", None, r#"{"role":"admin"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Invalid role");
    }

    #[tokio::test]
    async fn test_rejects_malformed_body() {
        let response = app()
            .oneshot(json_request("POST", "/dummyLogin", None, "{"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Invalid role");
    }
}
