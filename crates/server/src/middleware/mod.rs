//! HTTP middleware and extractors.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! Authentication is not a layer: protected handlers take a [`Caller`]
//! extractor, so `/dummyLogin` and the health checks stay open.

pub mod auth;
pub mod json;
pub mod request_id;

pub use auth::Caller;
pub use json::ApiJson;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
