//! JWT-based authentication extractor for the admin handlers.
//!
//! API clients send the access token as a Bearer `Authorization` header.
//! Browsers submitting the rendered edit form cannot, so loading the edit
//! form also stores the token in the [`ADMIN_COOKIE`] cookie, scoped to
//! `/admin`. The header wins when both are present.

use axum::extract::FromRequestParts;
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use leadform_core::error::CoreError;
use leadform_core::submission::Actor;
use leadform_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::session::cookie_value;
use crate::state::AppState;

/// Name of the cookie carrying the admin access token.
pub const ADMIN_COOKIE: &str = "leadform_admin";

/// Authenticated user extracted from a JWT access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (e.g. `"admin"`, `"editor"`).
    pub role: String,
    /// The validated access token.
    pub token: String,
}

impl AuthUser {
    /// The user as seen by the submission pipeline.
    pub fn actor(&self) -> Actor<'_> {
        Actor {
            user_id: self.user_id,
            role: &self.role,
        }
    }

    /// Headers that let the browser present this user's token on admin form
    /// posts.
    pub fn set_cookie(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let cookie = format!(
            "{ADMIN_COOKIE}={}; Path=/admin; HttpOnly; SameSite=Strict",
            self.token
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            headers.insert(SET_COOKIE, value);
        }
        headers
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// The raw access token of a request: the Bearer header, else the cookie.
fn request_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(header) = parts.headers.get("authorization") {
        let header = header
            .to_str()
            .map_err(|_| unauthorized("Invalid Authorization header"))?;
        return header
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or_else(|| {
                unauthorized("Invalid Authorization format. Expected: Bearer <token>")
            });
    }

    cookie_value(&parts.headers, ADMIN_COOKIE)
        .ok_or_else(|| unauthorized("Missing Authorization header"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = request_token(parts)?;

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            token,
        })
    }
}
