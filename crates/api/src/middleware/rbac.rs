//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use leadform_core::error::CoreError;
use leadform_core::roles::can_edit_leads;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role that may manage leads (`admin` or `editor`). Rejects
/// with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn list(RequireEditor(user): RequireEditor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_edit_leads(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Lead management requires the admin or editor role".into(),
            )));
        }
        Ok(RequireEditor(user))
    }
}
