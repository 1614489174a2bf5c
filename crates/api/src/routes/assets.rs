use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Static client assets.
pub fn router() -> Router<AppState> {
    Router::new().route("/assets/lead-form.js", get(assets::lead_form_js))
}
