//! Security headers for the admin page.
//!
//! Only the admin HTML gets these. The widget script and the icon lookup are
//! consumed from merchant storefronts on other origins, so they must stay
//! embeddable and cannot carry same-origin resource policies.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Content security policy for the admin page.
///
/// Icon URLs point at arbitrary merchant-chosen hosts and are stored without
/// validation, so `img-src` allows any http or https origin for the preview.
/// Everything executable is first-party. Framing is allowed so
/// the page can be embedded in the platform admin.
const ADMIN_CSP: &str = "default-src 'none'; \
     script-src 'self'; \
     style-src 'self'; \
     img-src 'self' http: https: data:; \
     connect-src 'self'; \
     object-src 'none'; \
     base-uri 'self'; \
     form-action 'self'";

/// Add security headers to admin page responses.
///
/// Headers applied:
/// - `Content-Security-Policy` - see [`ADMIN_CSP`]
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: no-referrer`
/// - `Cache-Control: no-store, max-age=0`
/// - `Permissions-Policy` - deny sensitive features
pub async fn admin_security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(CONTENT_SECURITY_POLICY, HeaderValue::from_static(ADMIN_CSP));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "camera=(), geolocation=(), microphone=(), payment=(), usb=()",
        ),
    );

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, middleware::from_fn, routing::get};
    use tower::ServiceExt;

    fn directive(name: &str) -> &'static str {
        ADMIN_CSP
            .split(';')
            .map(str::trim)
            .find(|d| d.starts_with(name))
            .unwrap()
    }

    #[test]
    fn test_preview_images_load_from_any_web_origin() {
        let img_src = directive("img-src");
        assert!(img_src.split_whitespace().any(|s| s == "http:"));
        assert!(img_src.split_whitespace().any(|s| s == "https:"));
    }

    #[test]
    fn test_scripts_are_first_party_only() {
        assert_eq!(directive("script-src"), "script-src 'self'");
        assert_eq!(directive("object-src"), "object-src 'none'");
    }

    #[tokio::test]
    async fn test_headers_applied_to_response() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(from_fn(admin_security_headers_middleware));

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let headers = response.headers();

        assert_eq!(headers.get(CONTENT_SECURITY_POLICY).unwrap(), ADMIN_CSP);
        assert_eq!(headers.get(X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(headers.get(REFERRER_POLICY).unwrap(), "no-referrer");
        assert!(headers.get("permissions-policy").is_some());
    }
}
