//! Repository for the `leads` table.

use leadform_core::lead::LeadFields;
use leadform_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::lead::LeadRow;

/// Column list for `leads` queries.
const COLUMNS: &str = "\
    id, name, phone, email, budget, message, status, \
    creation_time, created_at, updated_at";

/// Provides CRUD operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead together with its creation time, returning the
    /// full row.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        status: &str,
        fields: &LeadFields,
        creation_time: Timestamp,
    ) -> Result<LeadRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (name, status, phone, email, budget, message, creation_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(name)
            .bind(status)
            .bind(&fields.phone)
            .bind(&fields.email)
            .bind(&fields.budget)
            .bind(&fields.message)
            .bind(creation_time)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LeadRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the supplied values of a lead. `None` keeps the stored value.
    ///
    /// Returns the updated row, or `None` if the lead does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        fields: &LeadFields,
    ) -> Result<Option<LeadRow>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET \
                name = COALESCE($2, name), \
                phone = COALESCE($3, phone), \
                email = COALESCE($4, email), \
                budget = COALESCE($5, budget), \
                message = COALESCE($6, message) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(id)
            .bind(name)
            .bind(&fields.phone)
            .bind(&fields.email)
            .bind(&fields.budget)
            .bind(&fields.message)
            .fetch_optional(pool)
            .await
    }

    /// List leads newest-first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<LeadRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete a lead. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
