//! Database operations for the pickup-point `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `pvz` - Registered pickup points
//! - `receptions` - Intake sessions (`in_progress` / `closed`)
//! - `products` - Items recorded against a reception
//!
//! # Concurrency
//!
//! Every mutating operation on a pickup point starts its transaction by
//! locking that point's `pvz` row (`SELECT ... FOR UPDATE`). Operations on one
//! point therefore serialize, operations on different points never contend,
//! and the check-then-write pairs in the repositories run as one unit. The
//! partial unique index `receptions_one_in_progress_idx` backs the
//! one-open-reception rule at the schema level.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p pvz-cli -- migrate
//! ```
//! or at server startup when `PVZ_RUN_MIGRATIONS=true`.

pub mod pickup_points;
pub mod products;
pub mod receptions;

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgConnection, PgPool};
use thiserror::Error;

use pvz_core::{PickupPointId, ReceptionId};

pub use pickup_points::PickupPointRepository;
pub use products::ProductRepository;
pub use receptions::ReceptionRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate id, second open reception).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Map a unique-index violation to `RepositoryError::Conflict`.
fn conflict_on_unique(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(what.to_owned());
    }
    RepositoryError::Database(err)
}

/// Lock a pickup point's row for the rest of the transaction.
///
/// Returns `false` if the point does not exist.
async fn lock_pickup_point(
    conn: &mut PgConnection,
    pvz_id: PickupPointId,
) -> Result<bool, sqlx::Error> {
    let row: Option<(PickupPointId,)> =
        sqlx::query_as("SELECT id FROM pvz WHERE id = $1 FOR UPDATE")
            .bind(pvz_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(row.is_some())
}

/// Find the latest `in_progress` reception of a point.
///
/// Call only after [`lock_pickup_point`] so the answer stays valid until
/// commit.
async fn active_reception(
    conn: &mut PgConnection,
    pvz_id: PickupPointId,
) -> Result<Option<ReceptionId>, sqlx::Error> {
    let row: Option<(ReceptionId,)> = sqlx::query_as(
        r"
        SELECT id FROM receptions
        WHERE pvz_id = $1 AND status = 'in_progress'
        ORDER BY date_time DESC
        LIMIT 1
        ",
    )
    .bind(pvz_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.map(|(id,)| id))
}
