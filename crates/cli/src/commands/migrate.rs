//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! pvz-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! Connection settings are read exactly as the server reads them:
//! `PVZ_DATABASE_URL`, then `DATABASE_URL`, then the `DB_*` parts.
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded into the
//! binary at build time:
//! ```text
//! migrations/
//! ├── 20250421000001_create_pvz.sql
//! ├── 20250421000002_create_receptions.sql
//! └── 20250421000003_create_products.sql
//! ```

use pvz_server::config::ServerConfig;
use pvz_server::db;

use super::CommandError;

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if configuration is incomplete, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(config.database.connect_options()?, 1).await?;

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;

    pool.close().await;
    tracing::info!("Migrations complete!");
    Ok(())
}
