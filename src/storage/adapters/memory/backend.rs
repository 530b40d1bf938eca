//! Mutex-guarded in-memory backend.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::contract::{Record, RecordId};
use crate::storage::{
    domain::EntityType,
    ports::{StorageBackend, StorageBackendError, StorageBackendResult},
};

const ID_FIELD: &str = "id";

/// Thread-safe in-memory storage backend.
///
/// All tables sit behind a single mutex, so saves are serialised and ids are
/// never handed out twice. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    tables: Arc<Mutex<HashMap<EntityType, EntityTable>>>,
}

#[derive(Debug, Default)]
struct EntityTable {
    last_id: u64,
    records: BTreeMap<RecordId, Record>,
}

impl EntityTable {
    fn allocate(&mut self, entity_type: &EntityType) -> StorageBackendResult<RecordId> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| StorageBackendError::IdSpaceExhausted(entity_type.clone()))?;
        let id = RecordId::new(next).map_err(StorageBackendError::persistence)?;
        self.last_id = next;
        Ok(id)
    }

    fn reserve(&mut self, id: RecordId) {
        self.last_id = self.last_id.max(id.value());
    }
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> StorageBackendResult<MutexGuard<'_, HashMap<EntityType, EntityTable>>> {
        self.tables
            .lock()
            .map_err(|err| StorageBackendError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn parse_id(raw: &Value) -> StorageBackendResult<RecordId> {
    raw.as_u64()
        .and_then(|value| RecordId::new(value).ok())
        .ok_or_else(|| StorageBackendError::InvalidRecordId(raw.to_string()))
}

fn matches(record: &Record, filters: &Record) -> bool {
    filters
        .iter()
        .all(|(field, expected)| record.get(field) == Some(expected))
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn save(&self, entity_type: &EntityType, data: Record) -> StorageBackendResult<Record> {
        let mut record = data;
        let mut tables = self.tables()?;
        let table = tables.entry(entity_type.clone()).or_default();

        let id = match record.get(ID_FIELD) {
            None | Some(Value::Null) => table.allocate(entity_type)?,
            Some(raw) => {
                let explicit = parse_id(raw)?;
                table.reserve(explicit);
                explicit
            }
        };

        record.insert(ID_FIELD.to_owned(), Value::from(id.value()));
        table.records.insert(id, record.clone());
        tracing::debug!(entity_type = %entity_type, id = %id, "record saved");
        Ok(record)
    }

    async fn get(
        &self,
        entity_type: &EntityType,
        id: RecordId,
    ) -> StorageBackendResult<Option<Record>> {
        let tables = self.tables()?;
        Ok(tables
            .get(entity_type)
            .and_then(|table| table.records.get(&id))
            .cloned())
    }

    async fn delete(&self, entity_type: &EntityType, id: RecordId) -> StorageBackendResult<bool> {
        let mut tables = self.tables()?;
        let removed = tables
            .get_mut(entity_type)
            .and_then(|table| table.records.remove(&id))
            .is_some();
        tracing::debug!(entity_type = %entity_type, id = %id, removed, "record deleted");
        Ok(removed)
    }

    async fn list(&self, entity_type: &EntityType) -> StorageBackendResult<Vec<Record>> {
        let tables = self.tables()?;
        Ok(tables
            .get(entity_type)
            .map(|table| table.records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn query(
        &self,
        entity_type: &EntityType,
        filters: &Record,
    ) -> StorageBackendResult<Vec<Record>> {
        let tables = self.tables()?;
        Ok(tables
            .get(entity_type)
            .map(|table| {
                table
                    .records
                    .values()
                    .filter(|record| matches(record, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn clear(&self, entity_type: &EntityType) -> StorageBackendResult<usize> {
        let mut tables = self.tables()?;
        let cleared = tables.get_mut(entity_type).map_or(0, |table| {
            let count = table.records.len();
            table.records.clear();
            count
        });
        tracing::debug!(entity_type = %entity_type, cleared, "entity type cleared");
        Ok(cleared)
    }
}
