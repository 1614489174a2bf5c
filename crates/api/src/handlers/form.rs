//! Handlers that place the public lead form on a page.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Form;
use leadform_core::client::TRANSPORT_ERROR_MSG;
use leadform_core::directive::expand_directives;
use leadform_core::form::{escape_html, render_public_form, FormAttributes, FormConfig};
use leadform_core::lead::SAVE_ACTION;
use serde::Deserialize;

use crate::session::VisitorSession;
use crate::state::AppState;

/// Path the client script posts submissions to.
pub const AJAX_URL: &str = "/ajax";

/// Wrap form markup in a minimal page that loads the client script.
fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Contact</title>
<script>window.leadform = {{ "ajaxUrl": "{ajax_url}", "errorMsg": "{error_msg}" }};</script>
<script src="/assets/lead-form.js" defer></script>
</head>
<body>
{body}
</body>
</html>
"#,
        ajax_url = AJAX_URL,
        error_msg = escape_html(TRANSPORT_ERROR_MSG),
    )
}

// ---------------------------------------------------------------------------
// GET /form
// ---------------------------------------------------------------------------

/// Render the public form configured by query-string options.
///
/// Accepts the same options as the `[leads-form]` directive, e.g.
/// `/form?label-name=Your+name&max-name=100`.
pub async fn show_form(
    State(state): State<AppState>,
    session: VisitorSession,
    Query(attrs): Query<FormAttributes>,
) -> impl IntoResponse {
    let token = state.nonces.issue(SAVE_ACTION, &session.id);
    let form = render_public_form(&FormConfig::from(attrs), &token);
    (session.set_cookie(), Html(page(&form)))
}

// ---------------------------------------------------------------------------
// POST /embed
// ---------------------------------------------------------------------------

/// Page content that may contain form placement directives.
#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    pub content: String,
}

/// Expand every `[leads-form ...]` directive in the submitted content.
pub async fn embed(
    State(state): State<AppState>,
    session: VisitorSession,
    Form(request): Form<EmbedRequest>,
) -> impl IntoResponse {
    let token = state.nonces.issue(SAVE_ACTION, &session.id);
    let body = expand_directives(&request.content, &token);
    (session.set_cookie(), Html(page(&body)))
}
