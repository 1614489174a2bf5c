//! Shared response envelope types for API handlers.
//!
//! Admin endpoints use a `{ "data": ... }` envelope ([`DataResponse`]). The
//! submission endpoint answers with the flat `{ "status", "msg" }` shape the
//! client script reads ([`SubmissionResponse`]).

use leadform_core::submission::SubmissionResult;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "status": 0|1, "msg": "..." }` body of a submission response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResponse {
    /// `1` when the submission succeeded, `0` otherwise.
    pub status: u8,
    pub msg: String,
}

impl SubmissionResponse {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            status: 0,
            msg: msg.into(),
        }
    }
}

impl From<SubmissionResult> for SubmissionResponse {
    fn from(result: SubmissionResult) -> Self {
        Self {
            status: result.status.code(),
            msg: result.message,
        }
    }
}
