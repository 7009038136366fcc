//! CLI subcommand implementations.

pub mod migrate;
pub mod token;

use thiserror::Error;

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] pvz_server::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Role(#[from] pvz_core::CapabilityError),
}
