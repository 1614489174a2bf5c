//! Anonymous visitor sessions for the public form.
//!
//! Public form tokens are scoped to a random session id carried in the
//! [`SESSION_COOKIE`] cookie. A visitor without the cookie gets a fresh id;
//! handlers that render a form must then send it back with
//! [`VisitorSession::set_cookie`].

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use leadform_core::nonce::new_session_id;

/// Name of the visitor session cookie.
pub const SESSION_COOKIE: &str = "leadform_session";

/// The visitor's session, read from the request cookie or newly minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorSession {
    pub id: String,
    /// Whether the id was minted for this request.
    pub is_new: bool,
}

impl VisitorSession {
    /// Headers that persist a newly minted session in the browser. Empty
    /// when the visitor already had one.
    pub fn set_cookie(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if self.is_new {
            let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                headers.insert(SET_COOKIE, value);
            }
        }
        headers
    }
}

/// Find a non-empty cookie called `name` in a request's `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Find the session cookie value in a request's `Cookie` headers.
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, SESSION_COOKIE)
}

impl<S: Send + Sync> FromRequestParts<S> for VisitorSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match session_from_headers(&parts.headers) {
            Some(id) => VisitorSession { id, is_new: false },
            None => VisitorSession {
                id: new_session_id(),
                is_new: true,
            },
        })
    }
}
