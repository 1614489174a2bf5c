pub mod admin;
pub mod ajax;
pub mod assets;
pub mod form;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (everything except `/health`).
///
/// Route hierarchy:
///
/// ```text
/// /ajax                          background submissions (POST, public)
///
/// /form                          public form page (GET)
/// /embed                         expand form directives (POST)
///
/// /assets/lead-form.js           client script (GET)
///
/// /admin/leads                   list (editor role)
/// /admin/leads/{id}              get, edit (POST), delete
/// /admin/leads/{id}/edit         edit form (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(ajax::router())
        .merge(form::router())
        .merge(assets::router())
        .nest("/admin", admin::router())
}
