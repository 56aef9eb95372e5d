//! Settings read/write handlers used by the admin page.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::instrument;

use product_icon_core::{SaveSettingsRequest, SaveSettingsResponse, SettingsResponse};

use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireWriteAccess;
use crate::state::AppState;

/// Read the settings for a shop.
///
/// A shop with nothing saved reads as `{icon_url: "", icon_position: "top-right"}`.
///
/// # Errors
///
/// Returns `AppError::Database` if the lookup fails.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(shop): Path<String>,
) -> Result<Json<SettingsResponse>> {
    let record = state.settings().get(&shop).await?;
    Ok(Json(SettingsResponse::from(record)))
}

/// Insert or replace the settings for a shop.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if a write token is configured and not
/// presented, `AppError::BadRequest` for an unparseable body, and
/// `AppError::Database` if the upsert fails.
#[instrument(skip_all)]
pub async fn save(
    _access: RequireWriteAccess,
    State(state): State<AppState>,
    payload: std::result::Result<Json<SaveSettingsRequest>, JsonRejection>,
) -> Result<Json<SaveSettingsResponse>> {
    let Json(body) = payload?;

    add_breadcrumb("settings", "Saving icon settings", &body.shop);

    let id = state
        .settings()
        .upsert(&body.shop, &body.icon_url, &body.icon_position)
        .await?;

    tracing::info!(
        shop = %body.shop,
        settings_id = %id,
        icon_position = %body.icon_position,
        "Icon settings saved"
    );

    Ok(Json(SaveSettingsResponse { success: true, id }))
}
