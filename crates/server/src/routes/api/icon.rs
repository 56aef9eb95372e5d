//! Public icon lookup for the storefront widget.
//!
//! Fetched from merchant storefronts on arbitrary origins, so the route allows
//! anonymous cross-origin GETs.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::Method,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::instrument;

use product_icon_core::IconSettings;

use crate::error::Result;
use crate::state::AppState;

/// CORS policy for the public lookup: any origin, GET only, no credentials.
fn public_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
}

/// Build the icon router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/icon/{shop}", get(show))
        .layer(public_cors())
}

/// Icon URL and position for a shop, defaulted when nothing is saved.
///
/// # Errors
///
/// Returns `AppError::Database` if the lookup fails.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(shop): Path<String>,
) -> Result<Json<IconSettings>> {
    let icon = state.settings().get_icon(&shop).await?;
    Ok(Json(icon.unwrap_or_default()))
}
