//! Route definitions for the public form placements.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::form;
use crate::state::AppState;

/// ```text
/// GET  /form  -> show_form
/// POST /embed -> embed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/form", get(form::show_form))
        .route("/embed", post(form::embed))
}
