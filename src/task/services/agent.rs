//! Agent exposing the `task_*` actions.

use crate::agent::{Agent, AgentLifecycle};
use crate::contract::{
    Action, AddTask, AgentError, AgentName, AgentResult, AgentVersion, EntityScope, ErrorKind,
    ListTasks, Namespace, QueryRecords, Record, RecordId, RecordRef, Request, SaveRecord,
    StorageAction, TaskAction, UpdateTask,
};
use crate::task::domain::{NewTask, Task, TaskChanges};
use async_trait::async_trait;
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;

/// Entity type under which tasks are stored.
pub const TASK_ENTITY: &str = "task";

const AGENT_NAME: &str = "task_manager";
const AGENT_VERSION: &str = "1.0.0";

/// Owns task business rules and persists tasks through the storage agent.
///
/// Every storage call is a child request of the incoming request, so it
/// carries the same correlation id. Storage failures are forwarded with their
/// original error kind.
pub struct TaskAgent<C>
where
    C: Clock + Send + Sync,
{
    name: AgentName,
    version: AgentVersion,
    lifecycle: AgentLifecycle,
    storage: Arc<dyn Agent>,
    clock: Arc<C>,
}

impl<C> TaskAgent<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a task agent named `task_manager` backed by `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Agent>, clock: Arc<C>) -> Self {
        Self {
            name: AgentName::from_static(AGENT_NAME),
            version: AgentVersion::from_static(AGENT_VERSION),
            lifecycle: AgentLifecycle::new(),
            storage,
            clock,
        }
    }

    async fn add(&self, parent: &Request, payload: &AddTask) -> AgentResult<Value> {
        let draft = NewTask::new(
            payload.title.as_str(),
            payload.description.clone(),
            &*self.clock,
        )?;
        let record = draft.to_record().map_err(AgentError::internal)?;
        let task = self.save(parent, record).await?;
        tracing::info!(
            task_id = %task.id(),
            correlation_id = %parent.correlation_id(),
            "task added"
        );
        Ok(json!({ "task": task }))
    }

    async fn get(&self, parent: &Request, task_id: RecordId) -> AgentResult<Value> {
        let task = self.load(parent, task_id).await?;
        Ok(json!({ "task": task }))
    }

    async fn update(&self, parent: &Request, payload: &UpdateTask) -> AgentResult<Value> {
        let changes = TaskChanges::new(payload.title.clone(), payload.description.clone())?;
        let mut task = self.load(parent, payload.task_id).await?;
        task.apply(changes, &*self.clock);
        let stored = self.store(parent, &task).await?;
        Ok(json!({ "task": stored }))
    }

    async fn list(&self, parent: &Request, payload: ListTasks) -> AgentResult<Value> {
        let action = payload.completed.map_or_else(
            || {
                StorageAction::List(EntityScope {
                    entity_type: TASK_ENTITY.to_owned(),
                })
            },
            |completed| {
                let mut filters = Record::new();
                filters.insert("completed".to_owned(), Value::Bool(completed));
                StorageAction::Query(QueryRecords {
                    entity_type: TASK_ENTITY.to_owned(),
                    filters,
                })
            },
        );
        let result = self.call_storage(parent, action).await?;
        let records: Vec<Value> = decode(result, "records")?;
        let tasks: Vec<Task> = records.into_iter().filter_map(listed_task).collect();
        let count = tasks.len();
        Ok(json!({ "tasks": tasks, "count": count }))
    }

    async fn set_completion(
        &self,
        parent: &Request,
        task_id: RecordId,
        completed: bool,
    ) -> AgentResult<Value> {
        let mut task = self.load(parent, task_id).await?;
        if completed {
            task.complete(&*self.clock);
        } else {
            task.reopen(&*self.clock);
        }
        let stored = self.store(parent, &task).await?;
        tracing::info!(task_id = %task_id, completed, "task completion changed");
        Ok(json!({ "task": stored }))
    }

    async fn delete(&self, parent: &Request, task_id: RecordId) -> AgentResult<Value> {
        let result = self
            .call_storage(
                parent,
                StorageAction::Delete(RecordRef {
                    entity_type: TASK_ENTITY.to_owned(),
                    id: task_id,
                }),
            )
            .await?;
        let deleted: bool = decode(result, "deleted")?;
        if !deleted {
            return Err(AgentError::not_found(TASK_ENTITY, task_id));
        }
        tracing::info!(task_id = %task_id, "task deleted");
        Ok(json!({ "deleted": true, "task_id": task_id }))
    }

    async fn load(&self, parent: &Request, task_id: RecordId) -> AgentResult<Task> {
        let action = StorageAction::Get(RecordRef {
            entity_type: TASK_ENTITY.to_owned(),
            id: task_id,
        });
        match self.call_storage(parent, action).await {
            Ok(result) => decode(result, "record"),
            Err(err) if err.kind() == ErrorKind::NotFoundError => {
                Err(AgentError::not_found(TASK_ENTITY, task_id))
            }
            Err(err) => Err(err),
        }
    }

    async fn store(&self, parent: &Request, task: &Task) -> AgentResult<Task> {
        let record = task.to_record().map_err(AgentError::internal)?;
        self.save(parent, record).await
    }

    async fn save(&self, parent: &Request, record: Record) -> AgentResult<Task> {
        let action = StorageAction::Save(SaveRecord {
            entity_type: TASK_ENTITY.to_owned(),
            data: record,
        });
        let result = self.call_storage(parent, action).await?;
        decode(result, "record")
    }

    async fn call_storage(&self, parent: &Request, action: StorageAction) -> AgentResult<Value> {
        let child = parent.child(self.name.clone(), Action::Storage(action), &*self.clock);
        self.storage
            .handle(child)
            .await
            .into_result()
            .map_err(AgentError::Forwarded)
    }
}

/// Decodes one listed record, skipping records that are not valid tasks.
///
/// `storage_*` actions are reachable by any caller, so the task table may hold
/// records this agent never validated.
fn listed_task(record: Value) -> Option<Task> {
    let record_id = record.get("id").and_then(Value::as_u64);
    match serde_json::from_value(record) {
        Ok(task) => Some(task),
        Err(err) => {
            tracing::warn!(
                record_id = ?record_id,
                error = %err,
                "skipping undecodable task record"
            );
            None
        }
    }
}

/// Extracts and decodes one field of a storage result.
fn decode<T: serde::de::DeserializeOwned>(result: Value, field: &str) -> AgentResult<T> {
    let Value::Object(mut map) = result else {
        return Err(AgentError::storage("storage returned a non-object result"));
    };
    let value = map
        .remove(field)
        .ok_or_else(|| AgentError::storage(format!("storage result is missing '{field}'")))?;
    serde_json::from_value(value).map_err(|err| {
        AgentError::storage(format!("storage result field '{field}' is malformed: {err}"))
    })
}

#[async_trait]
impl<C> Agent for TaskAgent<C>
where
    C: Clock + Send + Sync,
{
    fn name(&self) -> &AgentName {
        &self.name
    }

    fn version(&self) -> &AgentVersion {
        &self.version
    }

    fn namespace(&self) -> Namespace {
        Namespace::Task
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        TaskAction::NAMES
    }

    fn lifecycle(&self) -> &AgentLifecycle {
        &self.lifecycle
    }

    fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    async fn dispatch(&self, request: &Request) -> AgentResult<Value> {
        let Action::Task(action) = request.action() else {
            return Err(self.unsupported(request.action()));
        };
        match action {
            TaskAction::Add(payload) => self.add(request, payload).await,
            TaskAction::Get(payload) => self.get(request, payload.task_id).await,
            TaskAction::Update(payload) => self.update(request, payload).await,
            TaskAction::List(payload) => self.list(request, *payload).await,
            TaskAction::Complete(payload) => {
                self.set_completion(request, payload.task_id, true).await
            }
            TaskAction::Reopen(payload) => {
                self.set_completion(request, payload.task_id, false).await
            }
            TaskAction::Delete(payload) => self.delete(request, payload.task_id).await,
        }
    }
}
