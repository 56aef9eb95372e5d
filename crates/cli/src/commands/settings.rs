//! Direct settings access, bypassing the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! picon settings get my-shop
//! picon settings set my-shop --icon-url https://cdn.example.com/badge.png --position bottom-left
//! picon settings list
//! ```
//!
//! Output is JSON in the same shapes the API returns.

use std::io::Write;

use product_icon_core::{IconPosition, SaveSettingsResponse, SettingsResponse};
use product_icon_server::db::SettingsRepository;
use sqlx::SqlitePool;

use super::CommandError;

/// Write the settings for a shop (defaulted when absent).
///
/// # Errors
///
/// Returns an error if the lookup or the write fails.
pub async fn get(
    pool: &SqlitePool,
    shop: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let record = SettingsRepository::new(pool).get(shop).await?;
    write_json(out, &SettingsResponse::from(record))
}

/// Upsert the settings for a shop.
///
/// Positions outside the known four are stored as given, with a warning.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub async fn set(
    pool: &SqlitePool,
    shop: &str,
    icon_url: &str,
    position: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if position.parse::<IconPosition>().is_err() {
        tracing::warn!(
            position,
            "Unrecognized position; it will render as {}",
            IconPosition::default()
        );
    }

    let id = SettingsRepository::new(pool)
        .upsert(shop, icon_url, position)
        .await?;
    write_json(out, &SaveSettingsResponse { success: true, id })
}

/// Write every stored record.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list(pool: &SqlitePool, out: &mut impl Write) -> Result<(), CommandError> {
    let records = SettingsRepository::new(pool).list().await?;
    write_json(out, &records)
}

fn write_json<T: serde::Serialize + ?Sized>(
    out: &mut impl Write,
    value: &T,
) -> Result<(), CommandError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use product_icon_server::db::{create_memory_pool, run_migrations};

    async fn test_pool() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn parse(out: &[u8]) -> serde_json::Value {
        serde_json::from_slice(out).unwrap()
    }

    #[tokio::test]
    async fn test_get_unsaved_shop_prints_defaults() {
        let pool = test_pool().await;
        let mut out = Vec::new();

        get(&pool, "nobody", &mut out).await.unwrap();

        assert_eq!(
            parse(&out),
            serde_json::json!({"icon_url": "", "icon_position": "top-right"})
        );
        assert!(out.ends_with(b"\n"));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let pool = test_pool().await;

        let mut saved = Vec::new();
        set(&pool, "s1", "https://x/a.png", "bottom-left", &mut saved)
            .await
            .unwrap();
        let saved = parse(&saved);
        assert_eq!(saved["success"], true);

        let mut read = Vec::new();
        get(&pool, "s1", &mut read).await.unwrap();
        let read = parse(&read);

        assert_eq!(read["id"], saved["id"]);
        assert_eq!(read["shop"], "s1");
        assert_eq!(read["icon_url"], "https://x/a.png");
        assert_eq!(read["icon_position"], "bottom-left");
        assert!(read["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_set_keeps_unrecognized_position() {
        let pool = test_pool().await;

        set(&pool, "s1", "", "middle", &mut Vec::<u8>::new()).await.unwrap();

        let mut read = Vec::new();
        get(&pool, "s1", &mut read).await.unwrap();
        assert_eq!(parse(&read)["icon_position"], "middle");
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_shop() {
        let pool = test_pool().await;
        set(&pool, "beta", "", "top-left", &mut Vec::<u8>::new())
            .await
            .unwrap();
        set(&pool, "alpha", "", "top-right", &mut Vec::<u8>::new())
            .await
            .unwrap();

        let mut out = Vec::new();
        list(&pool, &mut out).await.unwrap();
        let rows = parse(&out);
        let shops: Vec<&str> = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["shop"].as_str().unwrap())
            .collect();

        assert_eq!(shops, ["alpha", "beta"]);
    }
}
