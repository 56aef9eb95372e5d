//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! # Migrate the database named by DATABASE_PATH (or the default)
//! picon migrate
//!
//! # Migrate a specific file
//! picon --database /data/app.db migrate
//! ```
//!
//! The server also applies migrations on startup; this command exists for
//! preparing a database ahead of a deploy.

use std::path::Path;

use product_icon_server::db;

use super::CommandError;

/// Run pending migrations against the settings database.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run(path: &Path) -> Result<(), CommandError> {
    tracing::info!(path = %path.display(), "Connecting to settings database...");
    let pool = db::create_pool(path).await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations complete!");
    Ok(())
}
