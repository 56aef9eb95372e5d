//! HTTP route handlers for the settings service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Admin page (settings editor for one shop)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database reachable)
//!
//! # Storefront embedding
//! GET  /product-icon.js        - Storefront widget script
//! GET  /config.js              - Client-side platform config (API key)
//!
//! # Settings API
//! GET  /api/settings/{shop}    - Full settings (defaulted when absent)
//! POST /api/settings           - Upsert settings for a shop
//! GET  /api/icon/{shop}        - Public icon lookup (CORS: any origin)
//!
//! # Assets
//! GET  /static/*               - Admin page script and stylesheet
//! ```

pub mod admin;
pub mod api;
pub mod health;
pub mod widget;

use std::time::Duration;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create all routes for the service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(admin::router())
        .merge(widget::router())
        .nest("/api", api::router())
}

/// Build the complete application: routes, static assets, tracing, request IDs.
///
/// Sentry layers are added by the binary on top of this router.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        #[allow(clippy::cast_possible_truncation)] // request latency fits in u64 ms
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
