//! JSON API route handlers.

pub mod icon;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the API router (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", post(settings::save))
        .route("/settings/{shop}", get(settings::show))
        .merge(icon::router())
}
