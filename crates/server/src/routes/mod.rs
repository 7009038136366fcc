//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                             - Liveness check
//! GET  /health/ready                       - Readiness check (database)
//!
//! # Auth
//! POST /dummyLogin                         - Issue a token for a role
//!
//! # Pickup points
//! POST /pvz                                - Register a pickup point (moderator)
//! GET  /pvz                                - Nested listing (employee, moderator)
//!
//! # Receptions (employee)
//! POST /receptions                         - Open a reception
//! POST /pvz/{pvz_id}/close_last_reception  - Close the open reception
//!
//! # Products (employee)
//! POST /products                           - Add a product
//! POST /pvz/{pvz_id}/delete_last_product   - Remove the newest product
//! ```

pub mod auth;
pub mod health;
pub mod products;
pub mod pvz;
pub mod receptions;

use std::str::FromStr;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use pvz_core::PickupPointId;

use crate::error::AppError;
use crate::state::AppState;

/// Create the application routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/dummyLogin", post(auth::dummy_login))
        .route("/pvz", post(pvz::create).get(pvz::list))
        .route("/receptions", post(receptions::open))
        .route(
            "/pvz/{pvz_id}/close_last_reception",
            post(receptions::close_last),
        )
        .route("/products", post(products::add))
        .route(
            "/pvz/{pvz_id}/delete_last_product",
            post(products::delete_last),
        )
}

/// `{"message": "..."}` success body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Parse a pickup-point id taken from the URL path.
fn parse_pvz_id(raw: &str) -> Result<PickupPointId, AppError> {
    PickupPointId::from_str(raw).map_err(|_| AppError::BadRequest("Invalid input".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, Response, header},
    };
    use sqlx::postgres::PgPoolOptions;

    use pvz_core::AllowedCities;

    use crate::services::StaticRoleAuthority;
    use crate::state::AppState;

    /// Router over a pool that never connects; only paths that fail before
    /// touching the database may be exercised.
    pub fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/pvz_test")
            .unwrap();
        let state = AppState::new(
            pool,
            AllowedCities::default(),
            Arc::new(StaticRoleAuthority),
        );
        super::routes().with_state(state)
    }

    pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_owned())).unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
