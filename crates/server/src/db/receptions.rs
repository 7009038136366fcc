//! Reception repository: opening and closing intake sessions.

use sqlx::PgPool;

use pvz_core::PickupPointId;

use super::{RepositoryError, active_reception, conflict_on_unique, lock_pickup_point};
use crate::models::Reception;

/// Repository for reception database operations.
pub struct ReceptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReceptionRepository<'a> {
    /// Create a new reception repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Open a new `in_progress` reception for a pickup point.
    ///
    /// The point row is locked before the open-reception check, so the check
    /// and the insert happen atomically with respect to every other mutation
    /// on the same point.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the pickup point does not exist.
    /// Returns `RepositoryError::Conflict` if a reception is already in progress.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn open(&self, pvz_id: PickupPointId) -> Result<Reception, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !lock_pickup_point(&mut tx, pvz_id).await? {
            return Err(RepositoryError::NotFound);
        }

        if active_reception(&mut tx, pvz_id).await?.is_some() {
            return Err(RepositoryError::Conflict(
                "reception already in progress".to_owned(),
            ));
        }

        let reception = sqlx::query_as::<_, Reception>(
            r"
            INSERT INTO receptions (pvz_id, date_time, status)
            VALUES ($1, clock_timestamp(), 'in_progress')
            RETURNING id, date_time, pvz_id, status
            ",
        )
        .bind(pvz_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "reception already in progress"))?;

        tx.commit().await?;

        Ok(reception)
    }

    /// Close the latest `in_progress` reception of a pickup point.
    ///
    /// Returns `None` (and changes nothing) if no reception is in progress,
    /// including when the point does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails.
    pub async fn close_latest(
        &self,
        pvz_id: PickupPointId,
    ) -> Result<Option<Reception>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !lock_pickup_point(&mut tx, pvz_id).await? {
            return Ok(None);
        }

        let closed = sqlx::query_as::<_, Reception>(
            r"
            UPDATE receptions
            SET status = 'closed'
            WHERE id = (
                SELECT id FROM receptions
                WHERE pvz_id = $1 AND status = 'in_progress'
                ORDER BY date_time DESC
                LIMIT 1
                FOR UPDATE
            )
            RETURNING id, date_time, pvz_id, status
            ",
        )
        .bind(pvz_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(closed)
    }
}
