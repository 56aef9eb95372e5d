//! Admin page script behaviour: load, live preview, save and messages.

#![allow(clippy::unwrap_used)]

use product_icon_core::position_css_table;
use product_icon_integration_tests::script::ScriptSandbox;
use product_icon_integration_tests::{TestApp, test_app, test_config};
use serde_json::{Value, json};

const REPORT: &str = "{
    fetches: __log.fetches,
    url: __dom.elements['icon-url'].value,
    position: __dom.elements['icon-position'].value,
    preview: {
        hidden: __dom.elements['preview-icon'].hidden,
        src: __dom.elements['preview-icon'].src,
        style: __dom.elements['preview-icon'].style.props,
    },
    success: { hidden: __dom.elements['success-message'].hidden },
    error: {
        hidden: __dom.elements['error-message'].hidden,
        text: __dom.elements['error-message'].textContent,
    },
    timers: __log.timers.map((t) => t.delay),
    prevented: !!__log.prevented,
}";

const SUBMIT: &str = "__dom.elements['settings-form'].listeners.submit({
    preventDefault() { __log.prevented = true; },
});";

async fn admin_source(app: &TestApp) -> String {
    app.get("/static/js/admin.js").await.unwrap().text()
}

/// Load the admin script for `acme` with `setup` applied first.
fn load_admin(source: &str, search: &str, setup: &str) -> ScriptSandbox {
    let table = serde_json::to_string(&position_css_table().to_string()).unwrap();
    let search = serde_json::to_string(search).unwrap();

    let mut sandbox = ScriptSandbox::new().unwrap();
    sandbox
        .eval(&format!("__adminPage('acme', {table}, {search});"))
        .unwrap();
    sandbox.eval(setup).unwrap();
    sandbox.eval(source).unwrap();
    sandbox.settle();
    sandbox
}

fn respond_settings(body: &Value) -> String {
    format!("__respond('/api/settings/acme', 200, {body});")
}

fn offsets(report: &Value) -> Value {
    let style = &report["preview"]["style"];
    json!({
        "top": style["top"],
        "right": style["right"],
        "bottom": style["bottom"],
        "left": style["left"],
    })
}

// =============================================================================
// Load and preview
// =============================================================================

#[tokio::test]
async fn test_loads_saved_settings_into_form_and_preview() {
    let app = test_app(test_config()).await.unwrap();
    app.save("acme", "https://x/a.png", "bottom-right")
        .await
        .unwrap();
    let saved = app.get("/api/settings/acme").await.unwrap().json().unwrap();
    let source = admin_source(&app).await;

    let mut sandbox = load_admin(&source, "", &respond_settings(&saved));
    let report = sandbox.report(REPORT).unwrap();

    assert_eq!(report["fetches"][0]["url"], "/api/settings/acme");
    assert_eq!(report["url"], "https://x/a.png");
    assert_eq!(report["position"], "bottom-right");
    assert_eq!(report["preview"]["hidden"], false);
    assert_eq!(report["preview"]["src"], "https://x/a.png");
    assert_eq!(
        offsets(&report),
        json!({"top": null, "right": "10px", "bottom": "10px", "left": null})
    );
}

#[tokio::test]
async fn test_unsaved_shop_hides_preview() {
    let app = test_app(test_config()).await.unwrap();
    let defaults = app.get("/api/settings/acme").await.unwrap().json().unwrap();
    let source = admin_source(&app).await;

    let mut sandbox = load_admin(&source, "", &respond_settings(&defaults));
    let report = sandbox.report(REPORT).unwrap();

    assert_eq!(report["url"], "");
    assert_eq!(report["position"], "top-right");
    assert_eq!(report["preview"]["hidden"], true);
}

#[tokio::test]
async fn test_unknown_stored_position_previews_top_right() {
    let app = test_app(test_config()).await.unwrap();
    let source = admin_source(&app).await;

    let mut sandbox = load_admin(
        &source,
        "",
        &respond_settings(&json!({"icon_url": "https://x/a.png", "icon_position": "middle"})),
    );
    let report = sandbox.report(REPORT).unwrap();

    assert_eq!(report["position"], "top-right");
    assert_eq!(
        offsets(&report),
        json!({"top": "10px", "right": "10px", "bottom": null, "left": null})
    );
}

#[tokio::test]
async fn test_position_change_moves_preview() {
    let app = test_app(test_config()).await.unwrap();
    let source = admin_source(&app).await;

    let mut sandbox = load_admin(
        &source,
        "",
        &respond_settings(&json!({"icon_url": "https://x/a.png", "icon_position": "bottom-right"})),
    );
    sandbox
        .eval(
            "__dom.elements['icon-position'].value = 'top-left';
             __dom.elements['icon-position'].listeners.change();",
        )
        .unwrap();
    let report = sandbox.report(REPORT).unwrap();

    // Old offsets are cleared, not merged.
    assert_eq!(
        offsets(&report),
        json!({"top": "10px", "right": null, "bottom": null, "left": "10px"})
    );
}

#[tokio::test]
async fn test_load_failure_shows_error() {
    let app = test_app(test_config()).await.unwrap();
    let source = admin_source(&app).await;

    let mut sandbox = load_admin(&source, "", "__dom.failFetch = true;");
    let report = sandbox.report(REPORT).unwrap();

    assert_eq!(report["error"]["hidden"], false);
    assert_eq!(report["error"]["text"], "Could not load current settings.");
}

// =============================================================================
// Save
// =============================================================================

#[tokio::test]
async fn test_save_posts_form_and_flashes_success() {
    let app = test_app(test_config()).await.unwrap();
    let source = admin_source(&app).await;

    let mut sandbox = load_admin(
        &source,
        "",
        &format!(
            "{}
             __respond('/api/settings', 200, {{ success: true, id: 1 }});",
            respond_settings(&json!({"icon_url": "", "icon_position": "top-right"}))
        ),
    );
    sandbox
        .eval(
            "__dom.elements['icon-url'].value = 'https://x/new.png';
             __dom.elements['icon-position'].value = 'bottom-left';",
        )
        .unwrap();
    sandbox.eval(SUBMIT).unwrap();
    sandbox.settle();
    let report = sandbox.report(REPORT).unwrap();

    assert_eq!(report["prevented"], true);
    let post = &report["fetches"][1];
    assert_eq!(post["url"], "/api/settings");
    assert_eq!(post["method"], "POST");
    assert_eq!(
        post["body"],
        json!({"shop": "acme", "icon_url": "https://x/new.png", "icon_position": "bottom-left"})
    );
    assert!(post["headers"].get("Authorization").is_none());
    assert_eq!(report["success"]["hidden"], false);
    assert_eq!(report["timers"], json!([3000]));

    sandbox.eval("__flushTimers();").unwrap();
    let report = sandbox.report(REPORT).unwrap();
    assert_eq!(report["success"]["hidden"], true);
}

#[tokio::test]
async fn test_save_forwards_token_as_bearer() {
    let app = test_app(test_config()).await.unwrap();
    let source = admin_source(&app).await;

    let mut sandbox = load_admin(
        &source,
        "?shop=acme&token=abc123",
        "__respond('/api/settings', 200, { success: true, id: 1 });",
    );
    sandbox.eval(SUBMIT).unwrap();
    sandbox.settle();
    let report = sandbox.report(REPORT).unwrap();

    let post = &report["fetches"][1];
    assert_eq!(post["headers"]["Authorization"], "Bearer abc123");
}

#[tokio::test]
async fn test_rejected_save_shows_server_error() {
    let app = test_app(test_config()).await.unwrap();
    let source = admin_source(&app).await;

    let mut sandbox = load_admin(
        &source,
        "",
        "__respond('/api/settings', 401, { error: 'Unauthorized: missing bearer token' });",
    );
    sandbox.eval(SUBMIT).unwrap();
    sandbox.settle();
    let report = sandbox.report(REPORT).unwrap();

    assert_eq!(report["success"]["hidden"], true);
    assert_eq!(report["error"]["hidden"], false);
    assert_eq!(
        report["error"]["text"],
        "Save failed: Unauthorized: missing bearer token"
    );
}
