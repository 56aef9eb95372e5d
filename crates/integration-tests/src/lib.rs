//! Integration tests for the product icon service.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p product-icon-integration-tests
//! ```
//!
//! Every test builds the full application router against its own in-memory
//! `SQLite` store, so tests need no external services and never share state.
//!
//! # Test Categories
//!
//! - `settings_api` - settings read/write round trips and write access
//! - `icon_api` - public icon lookup and CORS
//! - `pages` - admin page, widget scripts, static assets, health
//! - `concurrency` - parallel writes over a real socket
//! - `widget_script`, `admin_script` - the served scripts executed against a
//!   stubbed DOM (see [`script`])

pub mod script;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use product_icon_server::config::ServerConfig;
use product_icon_server::db::{self, RepositoryError};
use product_icon_server::routes;
use product_icon_server::state::AppState;

/// A fully wired application plus handles on its state.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// A response with its body fully collected.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Body decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the body is not JSON.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }

    /// Body decoded as UTF-8, lossily.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// A header value as a string, if present and valid.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Configuration for tests: local defaults with static assets resolved from
/// the server crate.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        static_dir: server_static_dir(),
        ..ServerConfig::default()
    }
}

fn server_static_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../server/static")
}

/// Build the application on a fresh, migrated in-memory store.
///
/// # Errors
///
/// Returns `RepositoryError` if the store cannot be opened or migrated.
pub async fn test_app(config: ServerConfig) -> Result<TestApp, RepositoryError> {
    let pool = db::create_memory_pool().await?;
    db::run_migrations(&pool).await?;
    Ok(app_with_pool(config, pool))
}

/// Build the application on an existing (already migrated) pool.
#[must_use]
pub fn app_with_pool(config: ServerConfig, pool: SqlitePool) -> TestApp {
    let state = AppState::new(config, pool);
    TestApp {
        router: routes::app(state.clone()),
        state,
    }
}

impl TestApp {
    /// Send one request through the router and collect the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be collected.
    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse, axum::Error> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await?.to_bytes();

        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }

    /// `GET` a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the body collected.
    pub async fn get(&self, uri: &str) -> Result<TestResponse, Box<dyn std::error::Error>> {
        let request = Request::get(uri).body(Body::empty())?;
        Ok(self.send(request).await?)
    }

    /// `POST` a raw body to `/api/settings`, with an optional bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the body collected.
    pub async fn post_settings(
        &self,
        body: impl Into<Body>,
        token: Option<&str>,
    ) -> Result<TestResponse, Box<dyn std::error::Error>> {
        let mut builder = Request::post("/api/settings").header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        Ok(self.send(builder.body(body.into())?).await?)
    }

    /// `POST` a settings payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the body collected.
    pub async fn save(
        &self,
        shop: &str,
        icon_url: &str,
        icon_position: &str,
    ) -> Result<TestResponse, Box<dyn std::error::Error>> {
        let payload = serde_json::json!({
            "shop": shop,
            "icon_url": icon_url,
            "icon_position": icon_position,
        });
        self.post_settings(payload.to_string(), None).await
    }
}

/// Serve the application on an ephemeral local port.
///
/// # Errors
///
/// Returns `std::io::Error` if no local port can be bound.
pub async fn serve(app: TestApp) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, app.router).await });
    Ok(addr)
}
