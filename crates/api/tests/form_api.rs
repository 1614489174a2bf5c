//! Integration tests for the public form placements and the client script.

mod common;

use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::StatusCode;
use common::{body_string, build_test_app, cookie_pair, get, get_with, post_form};

// ---------------------------------------------------------------------------
// Test: GET /form renders the page and starts a session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn form_page_sets_session_cookie_and_loads_script() {
    let (app, _store) = build_test_app();
    let response = get(app, "/form").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let cookie = cookie_pair(&response).unwrap();
    assert!(cookie.starts_with("leadform_session="));

    let html = body_string(response).await;
    assert!(html.contains(r#"<script src="/assets/lead-form.js" defer></script>"#));
    assert!(html.contains(r#""ajaxUrl": "/ajax""#));
    assert!(html.contains(r#"id="wpl_lead_form""#));
    assert!(html.contains(r#"maxlength="70""#));
}

#[tokio::test]
async fn returning_visitor_keeps_session() {
    let (app, _store) = build_test_app();
    let response = get_with(app, "/form", &[("cookie", "leadform_session=abc123")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn query_options_configure_form() {
    let (app, _store) = build_test_app();
    let response = get(app, "/form?label-name=Your+name&max-name=120&rows-message=0").await;

    let html = body_string(response).await;
    assert!(html.contains(">Your name</label>"));
    assert!(html.contains(r#"maxlength="120""#));
    assert!(html.contains(r#"rows="5""#));
}

// ---------------------------------------------------------------------------
// Test: POST /embed expands directives
// ---------------------------------------------------------------------------

#[tokio::test]
async fn embed_expands_directives_in_content() {
    let (app, _store) = build_test_app();
    let content = r#"<p>Talk to us</p>[leads-form label-email="Work email"]"#;
    let response = post_form(app, "/embed", &[("content", content)], None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<p>Talk to us</p><!-- leads-form start -->"));
    assert!(html.contains(">Work email</label>"));
    assert!(!html.contains("[leads-form"));
}

#[tokio::test]
async fn embed_leaves_plain_content_alone() {
    let (app, _store) = build_test_app();
    let response = post_form(app, "/embed", &[("content", "<p>No form here</p>")], None, None).await;

    let html = body_string(response).await;
    assert!(html.contains("<p>No form here</p>"));
    assert!(!html.contains("wpl_lead_form"));
}

// ---------------------------------------------------------------------------
// Test: client script
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_script_is_served_as_javascript() {
    let (app, _store) = build_test_app();
    let response = get(app, "/assets/lead-form.js").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/javascript"));

    let script = body_string(response).await;
    assert!(script.contains("Please wait!"));
    assert!(script.contains("lead_save"));
}
