//! Product ledger: products stack up in the active reception and come off
//! newest first.

use sqlx::PgPool;
use tracing::{debug, info, instrument};

use pvz_core::{Operation, PickupPointId, ProductType, Role};

use super::ServiceError;
use crate::db::ProductRepository;
use crate::models::Product;

/// Records and removes products at a pickup point.
pub struct ProductLedger<'a> {
    products: ProductRepository<'a>,
}

impl<'a> ProductLedger<'a> {
    /// Create a new product ledger.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// Add a product to the point's reception in progress.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Capability` if `role` may not add products.
    /// Returns `ServiceError::NoActiveReception` if nothing is in progress.
    #[instrument(skip(self), fields(pvz_id = %pvz_id))]
    pub async fn add(
        &self,
        role: Role,
        pvz_id: PickupPointId,
        product_type: ProductType,
    ) -> Result<Product, ServiceError> {
        role.authorize(Operation::AddProduct)?;

        let Some(product) = self.products.append(pvz_id, product_type).await? else {
            debug!("No reception to add to");
            return Err(ServiceError::NoActiveReception);
        };

        info!(
            product_id = %product.id,
            reception_id = %product.reception_id,
            "Product added"
        );
        Ok(product)
    }

    /// Remove the most recently added product of the reception in progress.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Capability` if `role` may not delete products.
    /// Returns `ServiceError::NothingToDelete` if nothing is in progress or the
    /// reception is empty.
    #[instrument(skip(self), fields(pvz_id = %pvz_id))]
    pub async fn delete_last(
        &self,
        role: Role,
        pvz_id: PickupPointId,
    ) -> Result<Product, ServiceError> {
        role.authorize(Operation::DeleteLastProduct)?;

        let Some(product) = self.products.remove_last(pvz_id).await? else {
            debug!("Nothing to delete");
            return Err(ServiceError::NothingToDelete);
        };

        info!(product_id = %product.id, "Product removed");
        Ok(product)
    }
}
