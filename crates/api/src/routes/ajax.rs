//! Route definitions for background submissions.

use axum::routing::post;
use axum::Router;

use crate::handlers::ajax;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// POST /ajax -> dispatch
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/ajax", post(ajax::dispatch))
}
