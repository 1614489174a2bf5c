//! In-process [`RecordStore`] backed by a mutex-guarded map.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{RecordStore, StoreError};
use crate::lead::{Lead, LeadFields};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Default)]
struct Inner {
    next_id: DbId,
    records: BTreeMap<DbId, Lead>,
    create_calls: usize,
    update_calls: usize,
}

/// Record store that keeps leads in memory.
///
/// Besides storing leads it counts write calls, and can be built to reject
/// every write, which lets tests observe exactly what the pipeline did.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
    reject_writes: Option<String>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `create` and `update` always fail with `message`.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            inner: Mutex::default(),
            reject_writes: Some(message.into()),
        }
    }

    /// Number of `create` calls received, successful or not.
    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    /// Number of `update` calls received, successful or not.
    pub fn update_calls(&self) -> usize {
        self.lock().update_calls
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        match &self.reject_writes {
            Some(message) => Err(StoreError::Rejected(message.clone())),
            None => Ok(()),
        }
    }
}

fn merge(target: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(
        &self,
        title: &str,
        status: &str,
        fields: &LeadFields,
        creation_time: Timestamp,
    ) -> Result<DbId, StoreError> {
        let mut inner = self.lock();
        inner.create_calls += 1;
        self.check_writable()?;

        inner.next_id += 1;
        let id = inner.next_id;
        inner.records.insert(
            id,
            Lead {
                id,
                name: title.to_string(),
                phone: fields.phone.clone(),
                email: fields.email.clone(),
                budget: fields.budget.clone(),
                message: fields.message.clone(),
                status: status.to_string(),
                creation_time: Some(creation_time),
            },
        );
        Ok(id)
    }

    async fn update(
        &self,
        id: DbId,
        title: Option<&str>,
        fields: &LeadFields,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.update_calls += 1;
        self.check_writable()?;

        let lead = inner.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(title) = title {
            lead.name = title.to_string();
        }
        merge(&mut lead.phone, &fields.phone);
        merge(&mut lead.email, &fields.email);
        merge(&mut lead.budget, &fields.budget);
        merge(&mut lead.message, &fields.message);
        Ok(())
    }

    async fn read_fields(&self, id: DbId) -> Result<Option<Lead>, StoreError> {
        Ok(self.lock().records.get(&id).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Lead>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .records
            .values()
            .rev()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.lock().records.remove(&id).is_some())
    }
}
