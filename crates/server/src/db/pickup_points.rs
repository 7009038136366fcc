//! Pickup-point repository: registration and the nested listing read.

use sqlx::PgPool;
use uuid::Uuid;

use pvz_core::{DateRange, PageRequest};

use super::{RepositoryError, conflict_on_unique};
use crate::models::{
    NewPickupPoint, PickupPoint, PickupPointListing, Product, Reception, assemble_listing,
};

/// Repository for pickup-point database operations.
pub struct PickupPointRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PickupPointRepository<'a> {
    /// Create a new pickup-point repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pickup point and return the row as stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id is already registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, point: &NewPickupPoint) -> Result<PickupPoint, RepositoryError> {
        sqlx::query_as::<_, PickupPoint>(
            r"
            INSERT INTO pvz (id, registration_date, city)
            VALUES ($1, $2, $3)
            RETURNING id, registration_date, city
            ",
        )
        .bind(point.id)
        .bind(point.registration_date)
        .bind(&point.city)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "pickup point already exists"))
    }

    /// Read one page of pickup points with their receptions and products.
    ///
    /// Points are filtered by registration date and receptions by their own
    /// timestamp, both against `range`; products are never filtered. The three
    /// reads share one `REPEATABLE READ` snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn list(
        &self,
        range: DateRange,
        page: PageRequest,
    ) -> Result<Vec<PickupPointListing>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let points = sqlx::query_as::<_, PickupPoint>(
            r"
            SELECT id, registration_date, city
            FROM pvz
            WHERE ($1::timestamptz IS NULL OR registration_date >= $1::timestamptz)
              AND ($2::timestamptz IS NULL OR registration_date <= $2::timestamptz)
            ORDER BY registration_date DESC, id
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(range.start())
        .bind(range.end())
        .bind(i64::from(page.limit()))
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await?;

        if points.is_empty() {
            tx.commit().await?;
            return Ok(Vec::new());
        }

        let point_ids: Vec<Uuid> = points.iter().map(|p| p.id.as_uuid()).collect();
        let receptions = sqlx::query_as::<_, Reception>(
            r"
            SELECT id, date_time, pvz_id, status
            FROM receptions
            WHERE pvz_id = ANY($1)
              AND ($2::timestamptz IS NULL OR date_time >= $2::timestamptz)
              AND ($3::timestamptz IS NULL OR date_time <= $3::timestamptz)
            ORDER BY date_time, id
            ",
        )
        .bind(&point_ids)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&mut *tx)
        .await?;

        let reception_ids: Vec<Uuid> = receptions.iter().map(|r| r.id.as_uuid()).collect();
        let products = if reception_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, Product>(
                r"
                SELECT id, date_time, type, reception_id
                FROM products
                WHERE reception_id = ANY($1)
                ORDER BY date_time, id
                ",
            )
            .bind(&reception_ids)
            .fetch_all(&mut *tx)
            .await?
        };

        tx.commit().await?;

        Ok(assemble_listing(points, receptions, products))
    }
}
