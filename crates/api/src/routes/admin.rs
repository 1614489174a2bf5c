//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require a Bearer token (enforced by handler extractors).
///
/// ```text
/// GET    /leads            -> list_leads
/// GET    /leads/{id}       -> get_lead
/// POST   /leads/{id}       -> update_lead
/// DELETE /leads/{id}       -> delete_lead
/// GET    /leads/{id}/edit  -> edit_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/leads", get(admin::list_leads))
        .route(
            "/leads/{id}",
            get(admin::get_lead)
                .post(admin::update_lead)
                .delete(admin::delete_lead),
        )
        .route("/leads/{id}/edit", get(admin::edit_form))
}
