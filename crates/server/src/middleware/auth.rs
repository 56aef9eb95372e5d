//! Write access for settings.
//!
//! The shop in a request is a client-supplied string and is not tied to any
//! verified session. When `ADMIN_API_TOKEN` is configured, writes must carry
//! it as a bearer token; when it is not, writes are open.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use sha2::{Digest, Sha256};

use crate::config::admin_token_bytes;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that succeeds when the caller may write settings.
///
/// # Example
///
/// ```rust,ignore
/// async fn save(_access: RequireWriteAccess, ...) -> Result<...> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireWriteAccess;

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Compare fixed-size digests so the comparison time does not depend on
/// how much of the raw token matched.
fn token_matches(expected: &[u8], provided: &str) -> bool {
    Sha256::digest(expected) == Sha256::digest(provided.as_bytes())
}

impl FromRequestParts<AppState> for RequireWriteAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = admin_token_bytes(state.config()) else {
            return Ok(Self);
        };

        match bearer_token(parts) {
            Some(provided) if token_matches(expected, provided) => Ok(Self),
            Some(_) => {
                tracing::warn!("Rejected settings write with invalid token");
                Err(AppError::Unauthorized("invalid token".to_string()))
            }
            None => Err(AppError::Unauthorized("missing bearer token".to_string())),
        }
    }
}
