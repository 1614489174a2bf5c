//! The record store adapter: the persistence collaborator the submission
//! pipeline writes through.
//!
//! `leadform-db` provides the PostgreSQL implementation; [`memory`] holds an
//! in-process implementation used by tests and local demos.

pub mod memory;

use async_trait::async_trait;

use crate::lead::{Lead, LeadFields};
use crate::types::{DbId, Timestamp};

/// Failure reported by a record store.
///
/// The `Display` text of every variant is what visitors and editors see, so
/// it must be a complete sentence on its own.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend refused the write.
    #[error("{0}")]
    Rejected(String),

    /// The target record does not exist.
    #[error("Lead {0} does not exist")]
    NotFound(DbId),

    /// The backend itself failed (connection, query, ...).
    #[error("Could not save the lead: {0}")]
    Backend(String),
}

/// Persistence operations the lead pipeline and admin surface depend on.
///
/// Writes take [`LeadFields`], whose `None` values are left untouched: an
/// omitted field is never stored as an explicit blank.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create a record titled `title`, returning its new id.
    ///
    /// `creation_time` is written in the same operation as the record, so a
    /// stored lead always carries it. No later write may change it.
    async fn create(
        &self,
        title: &str,
        status: &str,
        fields: &LeadFields,
        creation_time: Timestamp,
    ) -> Result<DbId, StoreError>;

    /// Overwrite the supplied fields (and the title, when given) of an
    /// existing record. The creation time is never touched.
    async fn update(
        &self,
        id: DbId,
        title: Option<&str>,
        fields: &LeadFields,
    ) -> Result<(), StoreError>;

    /// Read a record and all of its fields.
    async fn read_fields(&self, id: DbId) -> Result<Option<Lead>, StoreError>;

    /// Newest-first page of records.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Lead>, StoreError>;

    /// Delete a record. Returns `false` when nothing was deleted.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Liveness probe for the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
