//! End-to-end tests for the PVZ service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server against a migrated database
//! PVZ_RUN_MIGRATIONS=true cargo run -p pvz-server
//!
//! # Run the (ignored by default) HTTP tests
//! PVZ_BASE_URL=http://localhost:8080 cargo test -p pvz-integration-tests -- --ignored
//! ```
//!
//! [`ApiClient`] wraps `reqwest` with the API's endpoints so tests read as the
//! flow they exercise.

use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde_json::{Value, json};
use uuid::Uuid;

use pvz_core::{ProductType, Role};

/// Base URL of the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("PVZ_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Thin HTTP client for the PVZ API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(base_url())
    }
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /dummyLogin` with a raw role string.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn dummy_login(&self, role: &str) -> reqwest::Result<Response> {
        self.client
            .post(self.url("/dummyLogin"))
            .json(&json!({ "role": role }))
            .send()
            .await
    }

    /// Log in as `role` and return the issued token.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request fails or the response is not
    /// a token.
    pub async fn token(&self, role: Role) -> reqwest::Result<String> {
        let body: Value = self
            .dummy_login(role.as_str())
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body["token"].as_str().unwrap_or_default().to_owned())
    }

    /// `POST /pvz`.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn create_pvz(
        &self,
        token: &str,
        id: Uuid,
        city: &str,
        registration_date: DateTime<Utc>,
    ) -> reqwest::Result<Response> {
        self.client
            .post(self.url("/pvz"))
            .bearer_auth(token)
            .json(&json!({
                "id": id,
                "registrationDate": registration_date,
                "city": city,
            }))
            .send()
            .await
    }

    /// `GET /pvz` with raw query parameters. Values are sent unescaped.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn list_pvz(&self, token: &str, query: &[(&str, &str)]) -> reqwest::Result<Response> {
        let query: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let path = if query.is_empty() {
            "/pvz".to_string()
        } else {
            format!("/pvz?{}", query.join("&"))
        };
        self.client
            .get(self.url(&path))
            .bearer_auth(token)
            .send()
            .await
    }

    /// `POST /receptions`.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn open_reception(&self, token: &str, pvz_id: Uuid) -> reqwest::Result<Response> {
        self.client
            .post(self.url("/receptions"))
            .bearer_auth(token)
            .json(&json!({ "pvzId": pvz_id }))
            .send()
            .await
    }

    /// `POST /pvz/{pvz_id}/close_last_reception`.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn close_reception(&self, token: &str, pvz_id: Uuid) -> reqwest::Result<Response> {
        self.client
            .post(self.url(&format!("/pvz/{pvz_id}/close_last_reception")))
            .bearer_auth(token)
            .send()
            .await
    }

    /// `POST /products`.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn add_product(
        &self,
        token: &str,
        pvz_id: Uuid,
        product_type: ProductType,
    ) -> reqwest::Result<Response> {
        self.client
            .post(self.url("/products"))
            .bearer_auth(token)
            .json(&json!({ "pvzId": pvz_id, "type": product_type }))
            .send()
            .await
    }

    /// `POST /pvz/{pvz_id}/delete_last_product`.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn delete_last_product(&self, token: &str, pvz_id: Uuid) -> reqwest::Result<Response> {
        self.client
            .post(self.url(&format!("/pvz/{pvz_id}/delete_last_product")))
            .bearer_auth(token)
            .send()
            .await
    }

    /// Send a request with an arbitrary `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request cannot be sent.
    pub async fn get_with_authorization(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> reqwest::Result<Response> {
        let mut request = self.client.get(self.url(path));
        if let Some(value) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }
        request.send().await
    }
}
