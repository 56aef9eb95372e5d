//! CLI subcommand implementations.

pub mod migrate;
pub mod settings;

use std::path::{Path, PathBuf};

use product_icon_server::config::{ConfigError, ServerConfig};
use product_icon_server::db::{self, RepositoryError};
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Repository(#[from] RepositoryError),

    /// Output could not be encoded.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve the database path: explicit flag first, then server configuration.
///
/// # Errors
///
/// Returns `CommandError::Config` if the environment configuration is invalid.
pub fn database_path(explicit: Option<&Path>) -> Result<PathBuf, CommandError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(ServerConfig::from_env()?.database_path),
    }
}

/// Open the store and make sure the schema is current.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated.
pub async fn open_store(path: &Path) -> Result<SqlitePool, CommandError> {
    tracing::info!(path = %path.display(), "Opening settings database");
    let pool = db::create_pool(path).await?;
    db::run_migrations(&pool).await?;
    Ok(pool)
}
