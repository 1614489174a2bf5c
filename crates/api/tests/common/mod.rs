#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use leadform_api::auth::jwt::{generate_access_token, JwtConfig};
use leadform_api::config::{NonceConfig, ServerConfig};
use leadform_api::router::build_app_router;
use leadform_api::state::AppState;
use leadform_core::nonce::DEFAULT_LIFETIME_SECS;
use leadform_core::store::memory::MemoryRecordStore;
use tower::ServiceExt;

pub const TEST_NONCE_SECRET: &str = "test-nonce-secret";
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-that-is-long-enough";

/// Build a test `ServerConfig` with fixed secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        nonce: NonceConfig {
            secret: TEST_NONCE_SECRET.to_string(),
            lifetime_secs: DEFAULT_LIFETIME_SECS,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over an in-memory record store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app() -> (Router, Arc<MemoryRecordStore>) {
    build_test_app_with(MemoryRecordStore::new())
}

pub fn build_test_app_with(store: MemoryRecordStore) -> (Router, Arc<MemoryRecordStore>) {
    let config = test_config();
    let store = Arc::new(store);
    let state = AppState::new(config.clone(), store.clone());
    (build_app_router(state, &config), store)
}

/// Bearer header value for a user with `role`.
pub fn bearer(user_id: i64, role: &str) -> String {
    let token = generate_access_token(user_id, role, &test_config().jwt).unwrap();
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with(app: Router, uri: &str, headers: &[(&str, &str)]) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn delete_with(app: Router, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a form-encoded body, optionally with a session cookie and bearer.
pub async fn post_form(
    app: Router,
    uri: &str,
    pairs: &[(&str, &str)],
    cookie: Option<&str>,
    authorization: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    if let Some(authorization) = authorization {
        builder = builder.header(AUTHORIZATION, authorization);
    }
    send(app, builder.body(Body::from(form_body(pairs))).unwrap()).await
}

fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(s: &str) -> String {
    s.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` of the cookie set by a response, if any.
pub fn cookie_pair(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Value of the hidden input `field` in rendered form HTML.
pub fn hidden_value(html: &str, field: &str) -> String {
    let marker = format!(r#"name="{field}""#);
    let start = html.find(&marker).expect("field present");
    let rest = &html[start..];
    let value_start = rest.find(r#"value=""#).expect("value attribute") + r#"value=""#.len();
    let value_end = rest[value_start..].find('"').unwrap();
    rest[value_start..value_start + value_end].to_string()
}

/// Load the public form and return `(session cookie, token)`.
pub async fn public_form_session(app: Router) -> (String, String) {
    let response = get(app, "/form").await;
    let cookie = cookie_pair(&response).expect("new visitors get a session cookie");
    let html = body_string(response).await;
    (cookie, hidden_value(&html, "wpl_leads_nonce_field"))
}
