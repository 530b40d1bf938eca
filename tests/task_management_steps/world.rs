//! Shared world state for task management BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use taskmesh::{
    agent::Agent,
    contract::{Record, Response, WireRequest},
    orchestrator::services::Orchestrator,
    presentation::{adapters::ScriptedAdapter, services::PresentationAgent},
    storage::{adapters::memory::InMemoryBackend, services::StorageAgent},
    task::services::TaskAgent,
};

/// Sender name used for every scenario request.
const SENDER: &str = "bdd";

/// Scenario world holding one orchestrator and the last response.
pub struct OrchestratorWorld {
    pub orchestrator: Orchestrator<DefaultClock>,
    pub last_response: Option<Response>,
    pub recorded_count: Option<u64>,
}

impl OrchestratorWorld {
    /// Creates a world with storage, task, and UI agents registered but not
    /// started.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let storage: Arc<dyn Agent> = Arc::new(StorageAgent::new(
            Arc::new(InMemoryBackend::new()),
            Arc::clone(&clock),
        ));
        let tasks = TaskAgent::new(Arc::clone(&storage), Arc::clone(&clock));
        let ui = PresentationAgent::new(Arc::new(ScriptedAdapter::default()), Arc::clone(&clock));

        let mut orchestrator = Orchestrator::new(clock);
        orchestrator
            .register(storage)
            .expect("storage registration should succeed");
        orchestrator
            .register(Arc::new(tasks))
            .expect("task registration should succeed");
        orchestrator
            .register(Arc::new(ui))
            .expect("ui registration should succeed");

        Self {
            orchestrator,
            last_response: None,
            recorded_count: None,
        }
    }

    /// Routes a wire request and keeps its response.
    pub fn send(&mut self, action: &str, payload: Record) -> &Response {
        let wire = WireRequest::new(SENDER, action).with_payload(payload);
        let response = run_async(self.orchestrator.route_wire(wire));
        self.last_response.insert(response)
    }

    /// Returns the last response.
    pub fn last(&self) -> Result<&Response, eyre::Report> {
        self.last_response
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no request has been sent in this scenario"))
    }

    /// Returns the id of the task in the last response.
    pub fn last_task_id(&self) -> Result<u64, eyre::Report> {
        self.last()?
            .result()
            .and_then(|result| result.pointer("/task/id"))
            .and_then(Value::as_u64)
            .ok_or_else(|| eyre::eyre!("last response carries no task"))
    }

    /// Counts stored tasks through `task_list`.
    pub fn task_count(&self) -> Result<u64, eyre::Report> {
        let wire = WireRequest::new(SENDER, "task_list");
        let response = run_async(self.orchestrator.route_wire(wire));
        let result = response
            .into_result()
            .map_err(|err| eyre::eyre!("task_list failed: {err}"))
            .wrap_err("count tasks")?;
        result
            .get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| eyre::eyre!("task_list result has no count"))
    }
}

impl Default for OrchestratorWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OrchestratorWorld {
    OrchestratorWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a payload record from a JSON object literal.
#[must_use]
pub fn payload(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}
