//! Pickup-point registration and listing.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use pvz_core::{DateRange, Operation, PageRequest, PickupPointId};

use crate::error::{AppError, Result};
use crate::middleware::{ApiJson, Caller};
use crate::models::{NewPickupPoint, PickupPoint, PickupPointListing};
use crate::services::ServiceError;
use crate::state::AppState;

/// `POST /pvz` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePvzRequest {
    pub id: PickupPointId,
    pub registration_date: DateTime<Utc>,
    pub city: String,
}

/// `GET /pvz` query string. Values are parsed by hand so every malformed
/// parameter produces the same 400 body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPvzQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListPvzQuery {
    /// Validate into a date range and a page request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for unparsable values and
    /// `ServiceError::Listing` for out-of-range ones.
    pub fn parse(&self) -> Result<(DateRange, PageRequest)> {
        let start = parse_date(self.start_date.as_deref())?;
        let end = parse_date(self.end_date.as_deref())?;
        let page = parse_number(self.page.as_deref())?;
        let limit = parse_number(self.limit.as_deref())?;

        let range = DateRange::new(start, end).map_err(ServiceError::from)?;
        let page = PageRequest::new(page, limit).map_err(ServiceError::from)?;
        Ok((range, page))
    }
}

fn invalid_query() -> AppError {
    AppError::BadRequest("Invalid query parameters".to_string())
}

fn parse_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| invalid_query()),
    }
}

fn parse_number(raw: Option<&str>) -> Result<Option<i64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|_| invalid_query()),
    }
}

/// Register a pickup point.
pub async fn create(
    State(state): State<AppState>,
    Caller(role): Caller,
    body: std::result::Result<ApiJson<CreatePvzRequest>, AppError>,
) -> Result<(StatusCode, Json<PickupPoint>)> {
    role.authorize(Operation::CreatePickupPoint)
        .map_err(ServiceError::from)?;
    let ApiJson(request) = body?;

    let point = state
        .registry()
        .create(
            role,
            NewPickupPoint {
                id: request.id,
                registration_date: request.registration_date,
                city: request.city,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(point)))
}

/// List pickup points with nested receptions and products.
pub async fn list(
    State(state): State<AppState>,
    Caller(role): Caller,
    query: std::result::Result<Query<ListPvzQuery>, QueryRejection>,
) -> Result<Json<Vec<PickupPointListing>>> {
    role.authorize(Operation::ListPickupPoints)
        .map_err(ServiceError::from)?;
    let Query(query) = query.map_err(|_| invalid_query())?;
    let (range, page) = query.parse()?;

    let listing = state.registry().list(role, range, page).await?;
    Ok(Json(listing))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support::{app, body_json, json_request};

    fn query(
        start: Option<&str>,
        end: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> ListPvzQuery {
        ListPvzQuery {
            start_date: start.map(str::to_owned),
            end_date: end.map(str::to_owned),
            page: page.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    #[test]
    fn test_query_defaults() {
        let (range, page) = ListPvzQuery::default().parse().unwrap();
        assert_eq!(range, DateRange::unbounded());
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_query_clamps_limit() {
        let (_, page) = query(None, None, Some("2"), Some("100")).parse().unwrap();
        assert_eq!(page.limit(), 30);
        assert_eq!(page.offset(), 30);
    }

    #[test]
    fn test_query_parses_rfc3339_dates() {
        let (range, _) = query(
            Some("2025-04-21T00:00:00Z"),
            Some("2025-04-21T23:59:59+03:00"),
            None,
            None,
        )
        .parse()
        .unwrap();

        assert_eq!(range.start().unwrap().to_rfc3339(), "2025-04-21T00:00:00+00:00");
        assert_eq!(range.end().unwrap().to_rfc3339(), "2025-04-21T20:59:59+00:00");
    }

    #[test]
    fn test_query_rejects_bad_values() {
        assert!(query(Some("yesterday"), None, None, None).parse().is_err());
        assert!(query(None, None, Some("one"), None).parse().is_err());
        assert!(query(None, None, Some("0"), None).parse().is_err());
        assert!(query(None, None, None, Some("-5")).parse().is_err());
        assert!(
            query(Some("2025-04-22T00:00:00Z"), Some("2025-04-21T00:00:00Z"), None, None)
                .parse()
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_create_requires_token() {
        let response = app()
            .oneshot(json_request("POST", "/pvz", None, "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Missing token");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_token() {
        let response = app()
            .oneshot(json_request("POST", "/pvz", Some("admin"), "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["message"], "Invalid role");
    }

    #[tokio::test]
    async fn test_create_forbidden_for_employee() {
        let body = r#"{"id":"11111111-1111-1111-1111-111111111111","registrationDate":"2025-04-24T18:00:00Z","city":"Москва"}"#;
        let response = app()
            .oneshot(json_request("POST", "/pvz", Some("employee"), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_body() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/pvz",
                Some("moderator"),
                r#"{"id":"not-a-uuid","registrationDate":"2025-04-24T18:00:00Z","city":"Москва"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Invalid input");
    }

    #[tokio::test]
    async fn test_create_rejects_city_before_store() {
        let body = r#"{"id":"11111111-1111-1111-1111-111111111111","registrationDate":"2025-04-24T18:00:00Z","city":"Новосибирск"}"#;
        let response = app()
            .oneshot(json_request("POST", "/pvz", Some("moderator"), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "city not allowed");
    }

    #[tokio::test]
    async fn test_list_rejects_bad_query() {
        let response = app()
            .oneshot(json_request("GET", "/pvz?page=0", Some("employee"), ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
