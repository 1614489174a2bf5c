//! [`RecordStore`] implementation backed by PostgreSQL.

use async_trait::async_trait;
use leadform_core::lead::{Lead, LeadFields};
use leadform_core::store::{RecordStore, StoreError};
use leadform_core::types::{DbId, Timestamp};

use crate::repositories::LeadRepo;
use crate::DbPool;

/// PostgreSQL check constraint violation.
const CHECK_VIOLATION: &str = "23514";

/// Record store writing to the `leads` table.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error to a store error without leaking query details.
fn store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(CHECK_VIOLATION) => {
            tracing::warn!(error = %db_err, "Lead write violates a constraint");
            StoreError::Rejected("The submitted lead data was rejected.".into())
        }
        _ => {
            tracing::error!(error = %err, "Lead store query failed");
            StoreError::Backend("database unavailable".into())
        }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(
        &self,
        title: &str,
        status: &str,
        fields: &LeadFields,
        creation_time: Timestamp,
    ) -> Result<DbId, StoreError> {
        let row = LeadRepo::create(&self.pool, title, status, fields, creation_time)
            .await
            .map_err(store_error)?;
        Ok(row.id)
    }

    async fn update(
        &self,
        id: DbId,
        title: Option<&str>,
        fields: &LeadFields,
    ) -> Result<(), StoreError> {
        LeadRepo::update(&self.pool, id, title, fields)
            .await
            .map_err(store_error)?
            .ok_or(StoreError::NotFound(id))?;
        Ok(())
    }

    async fn read_fields(&self, id: DbId) -> Result<Option<Lead>, StoreError> {
        let row = LeadRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Lead::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Lead>, StoreError> {
        let rows = LeadRepo::list(&self.pool, limit, offset)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Lead::from).collect())
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        LeadRepo::delete(&self.pool, id).await.map_err(store_error)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }
}
