//! Reception open/close handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use pvz_core::{Operation, PickupPointId};

use super::{MessageResponse, parse_pvz_id};
use crate::error::{AppError, Result};
use crate::middleware::{ApiJson, Caller};
use crate::models::Reception;
use crate::services::ServiceError;
use crate::state::AppState;

/// `POST /receptions` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenReceptionRequest {
    pub pvz_id: PickupPointId,
}

/// Open a reception at a pickup point.
pub async fn open(
    State(state): State<AppState>,
    Caller(role): Caller,
    body: std::result::Result<ApiJson<OpenReceptionRequest>, AppError>,
) -> Result<(StatusCode, Json<Reception>)> {
    role.authorize(Operation::OpenReception)
        .map_err(ServiceError::from)?;
    let ApiJson(request) = body?;

    let reception = state.receptions().open(role, request.pvz_id).await?;
    Ok((StatusCode::CREATED, Json(reception)))
}

/// Close the pickup point's open reception.
pub async fn close_last(
    State(state): State<AppState>,
    Caller(role): Caller,
    Path(pvz_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    role.authorize(Operation::CloseReception)
        .map_err(ServiceError::from)?;
    let pvz_id = parse_pvz_id(&pvz_id)?;

    state.receptions().close(role, pvz_id).await?;
    Ok(Json(MessageResponse {
        message: "reception has been closed",
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::routes::test_support::{app, body_json, json_request};

    #[tokio::test]
    async fn test_open_forbidden_for_moderator() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/receptions",
                Some("moderator"),
                r#"{"pvzId":"11111111-1111-1111-1111-111111111111"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_open_rejects_missing_pvz_id() {
        let response = app()
            .oneshot(json_request("POST", "/receptions", Some("employee"), "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Invalid input");
    }

    #[tokio::test]
    async fn test_close_rejects_bad_path_id() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/pvz/not-a-uuid/close_last_reception",
                Some("employee"),
                "",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_close_requires_token() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/pvz/11111111-1111-1111-1111-111111111111/close_last_reception",
                None,
                "",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
