//! Handlers for the `/admin/leads` resource.
//!
//! Listing, viewing and deleting require an editor role via
//! [`RequireEditor`]. The edit path only requires authentication: the
//! submission pipeline performs its own role check so a rejected edit still
//! answers with a `{status, msg}` body.
//!
//! The rendered edit form posts straight from the browser, so serving it
//! also sets the admin token cookie the post authenticates with.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use leadform_core::error::CoreError;
use leadform_core::form::render_edit_form;
use leadform_core::lead::{Lead, RawLeadFields, EDIT_ACTION};
use leadform_core::nonce::user_session;
use leadform_core::search::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use leadform_core::submission::{EditOutcome, EditSubmission};
use leadform_core::types::DbId;
use leadform_db::models::lead::LeadListParams;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEditor;
use crate::response::{DataResponse, SubmissionResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /admin/leads/{id}`, as sent by the edit form.
#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(rename = "wpl_nonce_field")]
    pub nonce: Option<String>,
    /// Present (with any value) while the editor autosaves a draft.
    pub autosave: Option<String>,
    #[serde(flatten)]
    pub fields: RawLeadFields,
}

async fn find_lead(state: &AppState, id: DbId) -> AppResult<Lead> {
    state
        .store
        .read_fields(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /admin/leads
///
/// List leads newest first. Supports `limit` (default 50, max 200) and
/// `offset`.
pub async fn list_leads(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<LeadListParams>,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let leads = state.store.list(limit, offset).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// GET /admin/leads/{id}
pub async fn get_lead(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let lead = find_lead(&state, id).await?;
    Ok(Json(DataResponse { data: lead }))
}

/// GET /admin/leads/{id}/edit
///
/// Render the edit form, carrying a token scoped to the requesting user.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<(HeaderMap, Html<String>)> {
    let lead = find_lead(&state, id).await?;
    let token = state.nonces.issue(EDIT_ACTION, &user_session(user.user_id));
    Ok((user.set_cookie(), Html(render_edit_form(&lead, &token))))
}

/// POST /admin/leads/{id}
///
/// Apply an edit through the submission pipeline. Answers `{status, msg}`
/// for completed edits and 204 No Content when an autosave skipped it.
pub async fn update_lead(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Form(form): Form<EditForm>,
) -> Response {
    let session = user_session(user.user_id);
    let outcome = state
        .pipeline()
        .edit(
            user.actor(),
            EditSubmission {
                lead_id: id,
                fields: &form.fields,
                token: form.nonce.as_deref(),
                session: &session,
                autosave: form.autosave.is_some(),
            },
        )
        .await;

    match outcome {
        EditOutcome::Completed(result) => Json(SubmissionResponse::from(result)).into_response(),
        EditOutcome::Skipped => StatusCode::NO_CONTENT.into_response(),
    }
}

/// DELETE /admin/leads/{id}
///
/// Remove a lead. Returns 204 No Content, or 404 if it does not exist.
pub async fn delete_lead(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.store.delete(id).await? {
        tracing::info!(lead_id = id, user_id = user.user_id, "Lead deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Lead", id }))
    }
}
