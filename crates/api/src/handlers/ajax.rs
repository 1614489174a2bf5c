//! Handler for background form submissions.
//!
//! Every submission is a form-encoded POST carrying an `action`
//! discriminator. The discriminator is resolved against [`LeadAction`]; each
//! action has exactly one handler and always answers with a JSON
//! `{status, msg}` body.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use leadform_core::lead::{RawLeadFields, SAVE_ACTION};
use leadform_core::submission::PublicSubmission;
use serde::Deserialize;

use crate::response::SubmissionResponse;
use crate::session::VisitorSession;
use crate::state::AppState;

/// Message for a discriminator no handler is registered for.
pub const MSG_UNKNOWN_ACTION: &str = "Unknown action";

/// Actions served by the submission endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadAction {
    /// Public lead form submission.
    Save,
}

impl LeadAction {
    /// Resolve an `action` discriminator.
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            SAVE_ACTION => Some(LeadAction::Save),
            _ => None,
        }
    }
}

/// Body of a submission request.
#[derive(Debug, Deserialize)]
pub struct SubmissionForm {
    pub action: Option<String>,
    #[serde(rename = "wpl_leads_nonce_field")]
    pub nonce: Option<String>,
    #[serde(flatten)]
    pub fields: RawLeadFields,
}

// ---------------------------------------------------------------------------
// POST /ajax
// ---------------------------------------------------------------------------

/// Dispatch a background submission to the handler for its action.
pub async fn dispatch(
    State(state): State<AppState>,
    session: VisitorSession,
    Form(form): Form<SubmissionForm>,
) -> Response {
    let Some(action) = form.action.as_deref().and_then(LeadAction::parse) else {
        tracing::debug!(action = ?form.action, "Unknown submission action");
        return (
            StatusCode::BAD_REQUEST,
            Json(SubmissionResponse::failed(MSG_UNKNOWN_ACTION)),
        )
            .into_response();
    };

    match action {
        LeadAction::Save => save_lead(&state, &session, &form).await.into_response(),
    }
}

async fn save_lead(
    state: &AppState,
    session: &VisitorSession,
    form: &SubmissionForm,
) -> Json<SubmissionResponse> {
    let result = state
        .pipeline()
        .submit(PublicSubmission {
            fields: &form.fields,
            token: form.nonce.as_deref(),
            session: &session.id,
        })
        .await;
    Json(SubmissionResponse::from(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_action_is_registered() {
        assert_eq!(LeadAction::parse("lead_save"), Some(LeadAction::Save));
    }

    #[test]
    fn other_actions_are_unknown() {
        assert_eq!(LeadAction::parse(""), None);
        assert_eq!(LeadAction::parse("lead_edit"), None);
        assert_eq!(LeadAction::parse("LEAD_SAVE"), None);
    }
}
