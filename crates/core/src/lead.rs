//! Lead record model, form field names, and the fixed budget choices.
//!
//! A lead is one prospective customer captured by the public form. The
//! visitor's name is the record title; the remaining values travel as
//! [`LeadFields`] keyed by the stable names in [`field_keys`].

use serde::{Deserialize, Serialize};

use crate::sanitize::{sanitize, FieldKind};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Action discriminator for public submissions (also the nonce action).
pub const SAVE_ACTION: &str = "lead_save";

/// Nonce action for the admin edit form.
pub const EDIT_ACTION: &str = "lead_edit";

/// Status assigned to every lead created from the public form.
pub const STATUS_PUBLISH: &str = "publish";

/// Every accepted budget value. The empty string means "not selected".
pub const BUDGET_CHOICES: &[&str] = &["", "100-500", "500-1000", "1000-5000", "5000+"];

/// Budget select options as `(value, label)` pairs, in display order.
pub const BUDGET_OPTIONS: &[(&str, &str)] = &[
    ("", "-- select --"),
    ("100-500", "$100 - $500"),
    ("500-1000", "$500 - $1000"),
    ("1000-5000", "$1000 - $5000"),
    ("5000+", "$5000+"),
];

/// Stable keys under which lead values are written to the record store.
pub mod field_keys {
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const BUDGET: &str = "budget";
    pub const MESSAGE: &str = "message";
    pub const CREATION_TIME: &str = "creationTime";
}

/// HTML form field names shared by the renderer, the client script, and the
/// transport handler.
pub mod form_fields {
    pub const NAME: &str = "wpl_name";
    pub const PHONE: &str = "wpl_phone";
    pub const EMAIL: &str = "wpl_email";
    pub const BUDGET: &str = "wpl_budget";
    pub const MESSAGE: &str = "wpl_message";
    pub const CREATION_TIME: &str = "wpl_creation_time";
    /// Hidden anti-forgery token on the public form.
    pub const PUBLIC_NONCE: &str = "wpl_leads_nonce_field";
    /// Hidden anti-forgery token on the admin edit form.
    pub const EDIT_NONCE: &str = "wpl_nonce_field";

    /// The five lead inputs, in form order.
    pub const LEAD_INPUTS: [&str; 5] = [NAME, PHONE, EMAIL, BUDGET, MESSAGE];
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// Lead values exactly as submitted, before any sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawLeadFields {
    #[serde(rename = "wpl_name")]
    pub name: Option<String>,
    #[serde(rename = "wpl_phone")]
    pub phone: Option<String>,
    #[serde(rename = "wpl_email")]
    pub email: Option<String>,
    #[serde(rename = "wpl_budget")]
    pub budget: Option<String>,
    #[serde(rename = "wpl_message")]
    pub message: Option<String>,
}

impl RawLeadFields {
    /// Whether a non-blank name was submitted.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Sanitized values
// ---------------------------------------------------------------------------

/// Sanitized lead values other than the name.
///
/// `None` means "omit from the write": empty optional values are never
/// stored as explicit blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadFields {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
}

/// A fully sanitized submission: the record title plus its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedLead {
    /// Sanitized name, `None` when it sanitized to nothing.
    pub name: Option<String>,
    pub fields: LeadFields,
}

impl SanitizedLead {
    /// Sanitize every submitted value with the kind that governs it.
    pub fn from_raw(raw: &RawLeadFields) -> Self {
        Self {
            name: clean(FieldKind::PlainText, raw.name.as_deref()),
            fields: LeadFields {
                phone: clean(FieldKind::PlainText, raw.phone.as_deref()),
                email: clean(FieldKind::Email, raw.email.as_deref()),
                budget: clean(
                    FieldKind::EnumeratedChoice(BUDGET_CHOICES),
                    raw.budget.as_deref(),
                ),
                message: clean(FieldKind::MultilineText, raw.message.as_deref()),
            },
        }
    }
}

fn clean(kind: FieldKind<'_>, raw: Option<&str>) -> Option<String> {
    raw.map(|value| sanitize(kind, value))
        .filter(|value| !value.is_empty())
}

// ---------------------------------------------------------------------------
// Stored record
// ---------------------------------------------------------------------------

/// A persisted lead as read back from the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
    pub status: String,
    /// Set once, server-side, right after creation.
    pub creation_time: Option<Timestamp>,
}
