//! Product add / delete-last handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use pvz_core::{Operation, PickupPointId, ProductType};

use super::{MessageResponse, parse_pvz_id};
use crate::error::{AppError, Result};
use crate::middleware::{ApiJson, Caller};
use crate::models::Product;
use crate::services::ServiceError;
use crate::state::AppState;

/// `POST /products` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub pvz_id: PickupPointId,
}

/// Add a product to the open reception.
pub async fn add(
    State(state): State<AppState>,
    Caller(role): Caller,
    body: std::result::Result<ApiJson<AddProductRequest>, AppError>,
) -> Result<(StatusCode, Json<Product>)> {
    role.authorize(Operation::AddProduct)
        .map_err(ServiceError::from)?;
    let ApiJson(request) = body?;

    let product = state
        .ledger()
        .add(role, request.pvz_id, request.product_type)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Remove the most recently added product of the open reception.
pub async fn delete_last(
    State(state): State<AppState>,
    Caller(role): Caller,
    Path(pvz_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    role.authorize(Operation::DeleteLastProduct)
        .map_err(ServiceError::from)?;
    let pvz_id = parse_pvz_id(&pvz_id)?;

    state.ledger().delete_last(role, pvz_id).await?;
    Ok(Json(MessageResponse {
        message: "Last product deleted successfully",
    }))
}
