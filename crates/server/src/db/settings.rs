//! Settings repository for database operations.
//!
//! One row per shop. Absence of a row is a normal outcome and is returned as
//! `Ok(None)`, never as an error. Writes are a single upsert statement, so
//! concurrent saves for the same shop are last-commit-wins and never mix
//! fields from two writes.

use chrono::Utc;
use sqlx::SqlitePool;

use product_icon_core::{IconSettings, SettingsId, ShopSettings};

use super::RepositoryError;

/// Repository for per-shop settings.
pub struct SettingsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the full settings record for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, shop: &str) -> Result<Option<ShopSettings>, RepositoryError> {
        let row = sqlx::query_as::<_, ShopSettings>(
            r"
            SELECT id, shop, icon_url, icon_position, created_at
            FROM settings
            WHERE shop = ?
            ",
        )
        .bind(shop)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Get only the rendering fields for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_icon(&self, shop: &str) -> Result<Option<IconSettings>, RepositoryError> {
        let row = sqlx::query_as::<_, IconSettings>(
            r"
            SELECT icon_url, icon_position
            FROM settings
            WHERE shop = ?
            ",
        )
        .bind(shop)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Insert or replace the icon settings for a shop.
    ///
    /// An existing row keeps its `id` and `created_at`; both mutable fields
    /// are overwritten. The shop string is not validated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert(
        &self,
        shop: &str,
        icon_url: &str,
        icon_position: &str,
    ) -> Result<SettingsId, RepositoryError> {
        let id = sqlx::query_scalar::<_, SettingsId>(
            r"
            INSERT INTO settings (shop, icon_url, icon_position, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (shop) DO UPDATE SET
                icon_url = excluded.icon_url,
                icon_position = excluded.icon_position
            RETURNING id
            ",
        )
        .bind(shop)
        .bind(icon_url)
        .bind(icon_position)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// List every stored record, ordered by shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ShopSettings>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShopSettings>(
            r"
            SELECT id, shop, icon_url, icon_position, created_at
            FROM settings
            ORDER BY shop
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, run_migrations};

    async fn test_pool() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_get_absent_shop_returns_none() {
        let pool = test_pool().await;
        let repo = SettingsRepository::new(&pool);

        assert!(repo.get("nobody").await.unwrap().is_none());
        assert!(repo.get_icon("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let pool = test_pool().await;
        let repo = SettingsRepository::new(&pool);

        let id = repo
            .upsert("s1", "https://x/i.png", "bottom-left")
            .await
            .unwrap();
        let record = repo.get("s1").await.unwrap().unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.shop, "s1");
        assert_eq!(record.icon_url, "https://x/i.png");
        assert_eq!(record.icon_position, "bottom-left");
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let pool = test_pool().await;
        let repo = SettingsRepository::new(&pool);

        let first = repo.upsert("s1", "https://x/a.png", "top-left").await.unwrap();
        let created_at = repo.get("s1").await.unwrap().unwrap().created_at;
        let second = repo
            .upsert("s1", "https://x/b.png", "bottom-right")
            .await
            .unwrap();

        let record = repo.get("s1").await.unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(record.created_at, created_at);
        assert_eq!(record.icon_url, "https://x/b.png");
        assert_eq!(record.icon_position, "bottom-right");
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_shops_are_isolated() {
        let pool = test_pool().await;
        let repo = SettingsRepository::new(&pool);

        repo.upsert("a", "https://x/a.png", "top-left").await.unwrap();

        assert!(repo.get("b").await.unwrap().is_none());
        let a = repo.get_icon("a").await.unwrap().unwrap();
        assert_eq!(a.icon_url, "https://x/a.png");
    }

    #[tokio::test]
    async fn test_unrecognized_position_is_stored_verbatim() {
        let pool = test_pool().await;
        let repo = SettingsRepository::new(&pool);

        repo.upsert("s1", "https://x/i.png", "middle").await.unwrap();

        let icon = repo.get_icon("s1").await.unwrap().unwrap();
        assert_eq!(icon.icon_position, "middle");
    }

    #[tokio::test]
    async fn test_empty_shop_is_accepted() {
        let pool = test_pool().await;
        let repo = SettingsRepository::new(&pool);

        repo.upsert("", "", "top-right").await.unwrap();

        assert!(repo.get("").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_across_shops() {
        let pool = test_pool().await;
        let repo = SettingsRepository::new(&pool);

        let a = repo.upsert("a", "", "top-right").await.unwrap();
        let b = repo.upsert("b", "", "top-right").await.unwrap();

        assert_ne!(a, b);
    }
}
