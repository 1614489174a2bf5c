//! Integration tests for background submissions at `POST /ajax`.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Response, StatusCode};
use common::{body_json, build_test_app, build_test_app_with, post_form, public_form_session};
use leadform_core::store::memory::MemoryRecordStore;
use leadform_core::store::RecordStore;
use leadform_core::submission::MSG_STORED;

fn jane<'a>(token: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![
        ("action", "lead_save"),
        ("wpl_leads_nonce_field", token),
        ("wpl_name", "Jane Doe"),
        ("wpl_email", "jane@example.com"),
        ("wpl_budget", "500-1000"),
        ("wpl_message", "Call me\nafter 5pm"),
    ]
}

fn assert_json(response: &Response<Body>) {
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content type {content_type}"
    );
}

// ---------------------------------------------------------------------------
// Test: a valid submission stores one stamped lead
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_submission_stores_lead() {
    let (app, store) = build_test_app();
    let (cookie, token) = public_form_session(app.clone()).await;

    let response = post_form(app, "/ajax", &jane(&token), Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_json(&response);

    let json = body_json(response).await;
    assert_eq!(json["status"], 1);
    assert_eq!(json["msg"], MSG_STORED);

    let leads = store.list(10, 0).await.unwrap();
    assert_eq!(leads.len(), 1);
    let lead = &leads[0];
    assert_eq!(lead.name, "Jane Doe");
    assert_eq!(lead.email.as_deref(), Some("jane@example.com"));
    assert_eq!(lead.budget.as_deref(), Some("500-1000"));
    assert_eq!(lead.message.as_deref(), Some("Call me\nafter 5pm"));
    assert_eq!(lead.phone, None);
    assert_eq!(lead.status, "publish");
    assert!(lead.creation_time.is_some());
}

// ---------------------------------------------------------------------------
// Test: markup and unknown budgets are sanitized before storage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submitted_values_are_sanitized() {
    let (app, store) = build_test_app();
    let (cookie, token) = public_form_session(app.clone()).await;

    let fields = [
        ("action", "lead_save"),
        ("wpl_leads_nonce_field", token.as_str()),
        ("wpl_name", "  <b>Jane</b>   Doe "),
        ("wpl_email", "not-an-email"),
        ("wpl_budget", "a lot"),
    ];
    let json = body_json(post_form(app, "/ajax", &fields, Some(&cookie), None).await).await;
    assert_eq!(json["status"], 1);

    let lead = &store.list(1, 0).await.unwrap()[0];
    assert_eq!(lead.name, "Jane Doe");
    assert_eq!(lead.email, None);
    assert_eq!(lead.budget, None);
}

// ---------------------------------------------------------------------------
// Test: token failures never reach the store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_fails_security_check() {
    let (app, store) = build_test_app();
    let (cookie, _token) = public_form_session(app.clone()).await;

    let fields = [
        ("action", "lead_save"),
        ("wpl_name", "Jane Doe"),
        ("wpl_email", "jane@example.com"),
    ];
    let response = post_form(app, "/ajax", &fields, Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_json(&response);

    let json = body_json(response).await;
    assert_eq!(json["status"], 0);
    assert_eq!(json["msg"], "Security check issue");
    assert_eq!(store.create_calls(), 0);
}

#[tokio::test]
async fn token_from_another_session_fails_security_check() {
    let (app, store) = build_test_app();
    let (_cookie, token) = public_form_session(app.clone()).await;
    let (other_cookie, _) = public_form_session(app.clone()).await;

    let json = body_json(post_form(app, "/ajax", &jane(&token), Some(&other_cookie), None).await).await;
    assert_eq!(json["status"], 0);
    assert_eq!(json["msg"], "Security check issue");
    assert_eq!(store.create_calls(), 0);
}

#[tokio::test]
async fn submission_without_session_cookie_fails_security_check() {
    let (app, store) = build_test_app();
    let (_cookie, token) = public_form_session(app.clone()).await;

    let json = body_json(post_form(app, "/ajax", &jane(&token), None, None).await).await;
    assert_eq!(json["status"], 0);
    assert!(store.is_empty());
}

// ---------------------------------------------------------------------------
// Test: required name
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_name_is_rejected_without_write() {
    let (app, store) = build_test_app();
    let (cookie, token) = public_form_session(app.clone()).await;

    let fields = [
        ("action", "lead_save"),
        ("wpl_leads_nonce_field", token.as_str()),
        ("wpl_name", "   "),
        ("wpl_email", "jane@example.com"),
    ];
    let json = body_json(post_form(app, "/ajax", &fields, Some(&cookie), None).await).await;
    assert_eq!(json["status"], 0);
    assert_eq!(json["msg"], "Please enter name and email!");
    assert_eq!(store.create_calls(), 0);
}

// ---------------------------------------------------------------------------
// Test: store failures are reported verbatim
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_rejection_is_reported() {
    let (app, store) = build_test_app_with(MemoryRecordStore::rejecting("Disk quota exceeded"));
    let (cookie, token) = public_form_session(app.clone()).await;

    let json = body_json(post_form(app, "/ajax", &jane(&token), Some(&cookie), None).await).await;
    assert_eq!(json["status"], 0);
    assert_eq!(json["msg"], "Disk quota exceeded");
    assert_eq!(store.create_calls(), 1);
    assert!(store.is_empty());
}

// ---------------------------------------------------------------------------
// Test: action dispatch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_action_returns_400_with_status_body() {
    let (app, store) = build_test_app();
    let (cookie, token) = public_form_session(app.clone()).await;

    let mut fields = jane(&token);
    fields[0] = ("action", "lead_delete");
    let response = post_form(app, "/ajax", &fields, Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json(&response);

    let json = body_json(response).await;
    assert_eq!(json["status"], 0);
    assert_eq!(json["msg"], "Unknown action");
    assert!(store.is_empty());
}

#[tokio::test]
async fn missing_action_returns_400() {
    let (app, _store) = build_test_app();
    let response = post_form(app, "/ajax", &[("wpl_name", "Jane")], None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json(&response);
}
