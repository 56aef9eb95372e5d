//! Admin page: a settings editor for one shop.
//!
//! The page is rendered with the position options and the position → CSS
//! table taken from [`IconPosition`], so the live preview and the storefront
//! widget place the icon identically. Current settings are loaded and saved
//! by `static/js/admin.js` through the settings API.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::Query, middleware::from_fn, routing::get};
use serde::Deserialize;
use tracing::instrument;

use product_icon_core::{DEFAULT_SHOP, IconPosition, position_css_table};

use crate::middleware::admin_security_headers_middleware;
use crate::state::AppState;

/// Build the admin page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(page))
        .route_layer(from_fn(admin_security_headers_middleware))
}

/// Query parameters accepted by the admin page.
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub shop: Option<String>,
}

/// One entry in the position selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Admin page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminPageTemplate {
    pub shop: String,
    pub positions: Vec<PositionOption>,
    pub positions_json: String,
}

impl AdminPageTemplate {
    /// Build the page for a shop, falling back to the demo shop.
    #[must_use]
    pub fn for_shop(shop: Option<String>) -> Self {
        let shop = shop
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SHOP.to_string());

        let positions = IconPosition::ALL
            .iter()
            .map(|p| PositionOption {
                value: p.as_str(),
                label: p.label(),
                selected: *p == IconPosition::default(),
            })
            .collect();

        Self {
            shop,
            positions,
            positions_json: position_css_table().to_string(),
        }
    }
}

/// Render the admin page.
#[instrument]
pub async fn page(Query(query): Query<AdminQuery>) -> AdminPageTemplate {
    AdminPageTemplate::for_shop(query.shop)
}
