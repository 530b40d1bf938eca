//! Agent exposing the `storage_*` actions.

use crate::agent::{Agent, AgentLifecycle};
use crate::contract::{
    Action, AgentError, AgentName, AgentResult, AgentVersion, Namespace, Record, Request,
    StorageAction,
};
use crate::storage::{
    domain::StorageOperation,
    ports::{StorageBackend, StorageBackendError},
};
use async_trait::async_trait;
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;

const AGENT_NAME: &str = "storage_handler";
const AGENT_VERSION: &str = "1.0.0";

impl From<StorageBackendError> for AgentError {
    fn from(err: StorageBackendError) -> Self {
        match err {
            StorageBackendError::InvalidRecordId(_) => Self::invalid_field("id", err.to_string()),
            StorageBackendError::IdSpaceExhausted(_) | StorageBackendError::Persistence(_) => {
                Self::storage(err)
            }
        }
    }
}

/// Translates storage actions into calls on a [`StorageBackend`].
pub struct StorageAgent<B, C>
where
    B: StorageBackend,
    C: Clock + Send + Sync,
{
    name: AgentName,
    version: AgentVersion,
    lifecycle: AgentLifecycle,
    backend: Arc<B>,
    clock: Arc<C>,
}

impl<B, C> StorageAgent<B, C>
where
    B: StorageBackend,
    C: Clock + Send + Sync,
{
    /// Creates a storage agent named `storage_handler`.
    #[must_use]
    pub fn new(backend: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            name: AgentName::from_static(AGENT_NAME),
            version: AgentVersion::from_static(AGENT_VERSION),
            lifecycle: AgentLifecycle::new(),
            backend,
            clock,
        }
    }

    /// Executes a validated operation against the backend.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotFound`] for a `get` of a missing record and
    /// the mapped [`StorageBackendError`] for backend failures.
    pub async fn execute(&self, operation: StorageOperation) -> AgentResult<Value> {
        tracing::debug!(
            kind = %operation.kind(),
            entity_type = %operation.entity_type(),
            "executing storage operation"
        );
        match operation {
            StorageOperation::Save { entity_type, data } => {
                let record = self.backend.save(&entity_type, data).await?;
                Ok(json!({ "record": record }))
            }
            StorageOperation::Get { entity_type, id } => {
                let record = self
                    .backend
                    .get(&entity_type, id)
                    .await?
                    .ok_or_else(|| AgentError::not_found(entity_type.as_str(), id))?;
                Ok(json!({ "record": record }))
            }
            StorageOperation::Delete { entity_type, id } => {
                let deleted = self.backend.delete(&entity_type, id).await?;
                Ok(json!({ "deleted": deleted, "id": id }))
            }
            StorageOperation::List { entity_type } => {
                let records = self.backend.list(&entity_type).await?;
                Ok(record_set(records))
            }
            StorageOperation::Query {
                entity_type,
                filters,
            } => {
                let records = self.backend.query(&entity_type, &filters).await?;
                Ok(record_set(records))
            }
            StorageOperation::Clear { entity_type } => {
                let cleared = self.backend.clear(&entity_type).await?;
                Ok(json!({ "cleared": cleared }))
            }
        }
    }
}

fn record_set(records: Vec<Record>) -> Value {
    let count = records.len();
    json!({ "records": records, "count": count })
}

#[async_trait]
impl<B, C> Agent for StorageAgent<B, C>
where
    B: StorageBackend,
    C: Clock + Send + Sync,
{
    fn name(&self) -> &AgentName {
        &self.name
    }

    fn version(&self) -> &AgentVersion {
        &self.version
    }

    fn namespace(&self) -> Namespace {
        Namespace::Storage
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        StorageAction::NAMES
    }

    fn lifecycle(&self) -> &AgentLifecycle {
        &self.lifecycle
    }

    fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    async fn dispatch(&self, request: &Request) -> AgentResult<Value> {
        let Action::Storage(action) = request.action() else {
            return Err(self.unsupported(request.action()));
        };
        let operation = StorageOperation::try_from(action.clone())?;
        self.execute(operation).await
    }

    async fn flush(&self) -> AgentResult<()> {
        self.backend.flush().await?;
        Ok(())
    }
}
