//! Product repository: the per-reception LIFO stack.

use sqlx::PgPool;

use pvz_core::{PickupPointId, ProductType};

use super::{RepositoryError, active_reception, lock_pickup_point};
use crate::models::Product;

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a product against the point's active reception.
    ///
    /// Returns `None` if the point has no reception in progress.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails.
    pub async fn append(
        &self,
        pvz_id: PickupPointId,
        product_type: ProductType,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !lock_pickup_point(&mut tx, pvz_id).await? {
            return Ok(None);
        }

        let Some(reception_id) = active_reception(&mut tx, pvz_id).await? else {
            return Ok(None);
        };

        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (reception_id, date_time, type)
            VALUES ($1, clock_timestamp(), $2)
            RETURNING id, date_time, type, reception_id
            ",
        )
        .bind(reception_id)
        .bind(product_type)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(product))
    }

    /// Delete the most recently added product of the point's active reception.
    ///
    /// Returns `None` if there is no reception in progress or it has no
    /// products; the two cases are not distinguished.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails.
    pub async fn remove_last(
        &self,
        pvz_id: PickupPointId,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !lock_pickup_point(&mut tx, pvz_id).await? {
            return Ok(None);
        }

        let Some(reception_id) = active_reception(&mut tx, pvz_id).await? else {
            return Ok(None);
        };

        let removed = sqlx::query_as::<_, Product>(
            r"
            DELETE FROM products
            WHERE id = (
                SELECT id FROM products
                WHERE reception_id = $1
                ORDER BY date_time DESC
                LIMIT 1
            )
            RETURNING id, date_time, type, reception_id
            ",
        )
        .bind(reception_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(removed)
    }
}
