//! Backend port for record persistence.

use crate::contract::{Record, RecordId};
use crate::storage::domain::EntityType;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for storage backend operations.
pub type StorageBackendResult<T> = Result<T, StorageBackendError>;

/// Record persistence contract.
///
/// Records are opaque JSON objects. The backend owns the `id` field: it is
/// assigned on save when absent, and every returned record carries it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Inserts or upserts a record and returns it with its `id` set.
    ///
    /// A record without an `id` receives the next value of the entity type's
    /// counter. A record with an `id` is stored under it and the counter is
    /// advanced past it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageBackendError::InvalidRecordId`] when the supplied
    /// `id` is not a positive integer, or
    /// [`StorageBackendError::Persistence`] on infrastructure failure.
    async fn save(&self, entity_type: &EntityType, data: Record) -> StorageBackendResult<Record>;

    /// Fetches a record by id.
    ///
    /// Returns `None` when the record does not exist.
    async fn get(
        &self,
        entity_type: &EntityType,
        id: RecordId,
    ) -> StorageBackendResult<Option<Record>>;

    /// Removes a record, returning whether it existed.
    async fn delete(&self, entity_type: &EntityType, id: RecordId) -> StorageBackendResult<bool>;

    /// Returns every record of the entity type, ordered by id.
    async fn list(&self, entity_type: &EntityType) -> StorageBackendResult<Vec<Record>>;

    /// Returns records whose fields equal every filter value, ordered by id.
    async fn query(
        &self,
        entity_type: &EntityType,
        filters: &Record,
    ) -> StorageBackendResult<Vec<Record>>;

    /// Removes every record of the entity type, returning how many were
    /// removed. The id counter is not reset.
    async fn clear(&self, entity_type: &EntityType) -> StorageBackendResult<usize>;

    /// Writes buffered state to durable storage.
    async fn flush(&self) -> StorageBackendResult<()> {
        Ok(())
    }
}

/// Errors returned by storage backend implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageBackendError {
    /// A caller-supplied `id` field is not a positive integer.
    #[error("record id {0} is not a positive integer")]
    InvalidRecordId(String),

    /// The entity type's id counter is exhausted.
    #[error("id space exhausted for entity type {0}")]
    IdSpaceExhausted(EntityType),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageBackendError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
