//! Lead entity model and DTOs.

use leadform_core::lead::Lead;
use leadform_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadRow {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub creation_time: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Lead {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            budget: row.budget,
            message: row.message,
            status: row.status,
            creation_time: row.creation_time,
        }
    }
}

/// Query parameters for listing leads.
#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
