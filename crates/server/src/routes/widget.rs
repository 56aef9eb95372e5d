//! Scripts embedded into merchant storefronts.
//!
//! - `/product-icon.js` is the storefront widget. It is rendered with the
//!   position table from [`position_css_table`] so its fallback matches the
//!   admin preview.
//! - `/config.js` hands the platform API key to client-side embedding code.

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use product_icon_core::position_css_table;

use crate::error::{AppError, Result};
use crate::state::AppState;

const JAVASCRIPT: &str = "application/javascript; charset=utf-8";

/// Build the widget router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product-icon.js", get(widget_script))
        .route("/config.js", get(config_script))
}

/// Storefront widget script template.
#[derive(Template)]
#[template(path = "product-icon.js", escape = "none")]
pub struct WidgetScriptTemplate {
    pub positions_json: String,
}

impl Default for WidgetScriptTemplate {
    fn default() -> Self {
        Self {
            positions_json: position_css_table().to_string(),
        }
    }
}

/// Serve the storefront widget.
///
/// # Errors
///
/// Returns `AppError::Internal` if the template fails to render.
pub async fn widget_script() -> Result<Response> {
    let body = WidgetScriptTemplate::default()
        .render()
        .map_err(|e| AppError::Internal(format!("widget render failed: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, JAVASCRIPT),
            (header::CACHE_CONTROL, "public, max-age=300"),
        ],
        body,
    )
        .into_response())
}

/// Render the client config script body.
///
/// # Errors
///
/// Returns `serde_json::Error` if the key cannot be encoded.
pub fn render_config_script(api_key: Option<&str>) -> serde_json::Result<String> {
    Ok(format!(
        "window.SHOPIFY_API_KEY = {};\n",
        serde_json::to_string(&api_key)?
    ))
}

/// Serve the client config script.
///
/// # Errors
///
/// Returns `AppError::Internal` if the key cannot be encoded.
pub async fn config_script(State(state): State<AppState>) -> Result<Response> {
    let body = render_config_script(state.config().shopify_api_key.as_deref())
        .map_err(|e| AppError::Internal(format!("config script encode failed: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, JAVASCRIPT),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
        .into_response())
}
