//! HTTP middleware stack for the settings service.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Per-route: CORS on the public icon lookup, security headers on the
//!    admin page, write-token check on settings writes (extractor)

pub mod auth;
pub mod request_id;
pub mod security_headers;

pub use auth::RequireWriteAccess;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use security_headers::admin_security_headers_middleware;
