//! Static client-side assets.

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;

/// Browser script driving background submission of the public form.
pub const LEAD_FORM_JS: &str = include_str!("../../assets/lead-form.js");

/// Serve the lead form client script.
pub async fn lead_form_js() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (CACHE_CONTROL, "public, max-age=3600"),
        ],
        LEAD_FORM_JS,
    )
}
