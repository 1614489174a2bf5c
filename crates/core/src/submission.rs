//! The submission pipeline: token check, required fields, sanitization,
//! persistence, and the structured result returned to the caller.
//!
//! Two entry points share the same steps:
//!
//! - [`SubmissionPipeline::submit`] handles a public form submission and
//!   creates a new lead.
//! - [`SubmissionPipeline::edit`] handles the admin edit form and updates an
//!   existing lead.
//!
//! Each step short-circuits: the first failure becomes the result and no
//! later step runs.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::lead::{RawLeadFields, SanitizedLead, EDIT_ACTION, SAVE_ACTION, STATUS_PUBLISH};
use crate::nonce::NonceIssuer;
use crate::roles;
use crate::store::{RecordStore, StoreError};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Shown after a lead has been stored.
pub const MSG_STORED: &str = "Thanks, your information has been successfully stored.";

/// Shown after an admin edit has been saved.
pub const MSG_UPDATED: &str = "Lead updated.";

// ---------------------------------------------------------------------------
// Errors and results
// ---------------------------------------------------------------------------

/// Why a submission did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// Missing or invalid anti-forgery token. Nothing else was attempted.
    #[error("Security check issue")]
    SecurityCheck,

    /// The name was missing or blank. No write was attempted.
    #[error("Please enter name and email!")]
    MissingRequired,

    /// The edited lead does not exist.
    #[error("Lead not found")]
    NotFound(DbId),

    /// The actor may not edit leads.
    #[error("You are not allowed to edit this lead")]
    Forbidden,

    /// The record store refused the write; its text is passed on verbatim.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome flag of a finished submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Ok,
    Failed,
}

impl SubmissionStatus {
    /// Wire value: `1` for ok, `0` for failed.
    pub fn code(self) -> u8 {
        match self {
            SubmissionStatus::Ok => 1,
            SubmissionStatus::Failed => 0,
        }
    }
}

/// Structured result handed back to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub status: SubmissionStatus,
    pub message: String,
    /// The created or updated lead, when there is one.
    pub lead_id: Option<DbId>,
}

impl SubmissionResult {
    fn ok(message: &str, lead_id: DbId) -> Self {
        Self {
            status: SubmissionStatus::Ok,
            message: message.to_string(),
            lead_id: Some(lead_id),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == SubmissionStatus::Ok
    }
}

impl From<SubmissionError> for SubmissionResult {
    fn from(err: SubmissionError) -> Self {
        Self {
            status: SubmissionStatus::Failed,
            message: err.to_string(),
            lead_id: None,
        }
    }
}

/// Result of the admin edit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit ran to completion, successfully or not.
    Completed(SubmissionResult),
    /// An autosave was in progress; nothing was written or reported.
    Skipped,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A public form submission.
#[derive(Debug, Clone, Copy)]
pub struct PublicSubmission<'a> {
    pub fields: &'a RawLeadFields,
    pub token: Option<&'a str>,
    /// Session the token must have been issued for.
    pub session: &'a str,
}

/// An admin edit form submission.
#[derive(Debug, Clone, Copy)]
pub struct EditSubmission<'a> {
    pub lead_id: DbId,
    pub fields: &'a RawLeadFields,
    pub token: Option<&'a str>,
    pub session: &'a str,
    /// Set while the editor autosaves a draft.
    pub autosave: bool,
}

/// The authenticated user behind an edit.
#[derive(Debug, Clone, Copy)]
pub struct Actor<'a> {
    pub user_id: DbId,
    pub role: &'a str,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Runs submissions against a record store. Cheap to clone.
#[derive(Clone)]
pub struct SubmissionPipeline {
    store: Arc<dyn RecordStore>,
    nonces: Arc<NonceIssuer>,
}

impl SubmissionPipeline {
    pub fn new(store: Arc<dyn RecordStore>, nonces: Arc<NonceIssuer>) -> Self {
        Self { store, nonces }
    }

    pub fn nonces(&self) -> &NonceIssuer {
        &self.nonces
    }

    /// Handle a public submission, creating a lead on success.
    pub async fn submit(&self, submission: PublicSubmission<'_>) -> SubmissionResult {
        match self.try_submit(submission).await {
            Ok(id) => SubmissionResult::ok(MSG_STORED, id),
            Err(err) => {
                tracing::info!(error = %err, "Lead submission rejected");
                err.into()
            }
        }
    }

    /// Handle an admin edit of an existing lead.
    pub async fn edit(&self, actor: Actor<'_>, edit: EditSubmission<'_>) -> EditOutcome {
        match self.try_edit(actor, edit).await {
            Ok(Some(id)) => EditOutcome::Completed(SubmissionResult::ok(MSG_UPDATED, id)),
            Ok(None) => {
                tracing::debug!(lead_id = edit.lead_id, "Autosave in progress, edit skipped");
                EditOutcome::Skipped
            }
            Err(err) => {
                tracing::info!(
                    lead_id = edit.lead_id,
                    user_id = actor.user_id,
                    error = %err,
                    "Lead edit rejected",
                );
                EditOutcome::Completed(err.into())
            }
        }
    }

    async fn try_submit(&self, submission: PublicSubmission<'_>) -> Result<DbId, SubmissionError> {
        self.check_token(submission.token, SAVE_ACTION, submission.session)?;

        if !submission.fields.has_name() {
            return Err(SubmissionError::MissingRequired);
        }

        let lead = SanitizedLead::from_raw(submission.fields);
        let title = lead.name.ok_or(SubmissionError::MissingRequired)?;

        let id = self
            .store
            .create(&title, STATUS_PUBLISH, &lead.fields, Utc::now())
            .await?;

        tracing::info!(lead_id = id, "Lead created");
        Ok(id)
    }

    /// `Ok(None)` means the edit was skipped for an autosave.
    async fn try_edit(
        &self,
        actor: Actor<'_>,
        edit: EditSubmission<'_>,
    ) -> Result<Option<DbId>, SubmissionError> {
        self.check_token(edit.token, EDIT_ACTION, edit.session)?;

        if !roles::can_edit_leads(actor.role) {
            return Err(SubmissionError::Forbidden);
        }
        if self.store.read_fields(edit.lead_id).await?.is_none() {
            return Err(SubmissionError::NotFound(edit.lead_id));
        }
        if edit.autosave {
            return Ok(None);
        }

        let lead = SanitizedLead::from_raw(edit.fields);
        self.store
            .update(edit.lead_id, lead.name.as_deref(), &lead.fields)
            .await?;

        tracing::info!(lead_id = edit.lead_id, user_id = actor.user_id, "Lead updated");
        Ok(Some(edit.lead_id))
    }

    fn check_token(
        &self,
        token: Option<&str>,
        action: &str,
        session: &str,
    ) -> Result<(), SubmissionError> {
        match token {
            Some(token) if self.nonces.verify(token, action, session) => Ok(()),
            _ => {
                tracing::warn!(action, "Anti-forgery token check failed");
                Err(SubmissionError::SecurityCheck)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
