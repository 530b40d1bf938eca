//! Unit tests for the orchestrator.


use crate::agent::{Agent, AgentLifecycle};
use crate::contract::{
    Action, AgentError, AgentName, AgentResult, AgentVersion, ListTasks, Namespace, Request,
    SystemAction, TaskAction,
};
use crate::orchestrator::services::Orchestrator;
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Shared record of lifecycle calls, in call order.
pub(super) type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Behaviour {
    Echo,
    Panic,
    FailStart,
    FailFlush,
    FailShutdown,
}

/// Lets a test hold a request inside an agent.
#[derive(Default)]
pub(super) struct Gate {
    pub(super) entered: Notify,
    pub(super) release: Notify,
}

pub(super) struct StubAgent {
    name: AgentName,
    version: AgentVersion,
    namespace: Namespace,
    lifecycle: AgentLifecycle,
    clock: DefaultClock,
    behaviour: Behaviour,
    journal: Journal,
    gate: Option<Arc<Gate>>,
}

impl StubAgent {
    pub(super) fn new(name: &str, namespace: Namespace, journal: &Journal) -> Self {
        Self {
            name: AgentName::new(name).expect("valid name"),
            version: AgentVersion::new("0.0.1").expect("valid version"),
            namespace,
            lifecycle: AgentLifecycle::new(),
            clock: DefaultClock,
            behaviour: Behaviour::Echo,
            journal: Arc::clone(journal),
            gate: None,
        }
    }

    pub(super) const fn with_behaviour(mut self, behaviour: Behaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    pub(super) fn with_gate(mut self, gate: &Arc<Gate>) -> Self {
        self.gate = Some(Arc::clone(gate));
        self
    }

    fn note(&self, event: &str) {
        self.journal
            .lock()
            .expect("journal lock")
            .push(format!("{event}:{}", self.name));
    }
}

#[async_trait]
impl Agent for StubAgent {
    fn name(&self) -> &AgentName {
        &self.name
    }

    fn version(&self) -> &AgentVersion {
        &self.version
    }

    fn namespace(&self) -> Namespace {
        self.namespace
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        &[]
    }

    fn lifecycle(&self) -> &AgentLifecycle {
        &self.lifecycle
    }

    fn clock(&self) -> &dyn Clock {
        &self.clock
    }

    async fn dispatch(&self, request: &Request) -> AgentResult<Value> {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        assert!(self.behaviour != Behaviour::Panic, "stub agent exploded");
        Ok(json!({ "handled_by": self.name, "action": request.action().name() }))
    }

    async fn on_start(&self) -> AgentResult<()> {
        self.note("start");
        if self.behaviour == Behaviour::FailStart {
            return Err(AgentError::internal("missing credentials"));
        }
        Ok(())
    }

    async fn on_shutdown(&self) -> AgentResult<()> {
        self.note("shutdown");
        if self.behaviour == Behaviour::FailShutdown {
            return Err(AgentError::internal("socket already closed"));
        }
        Ok(())
    }

    async fn flush(&self) -> AgentResult<()> {
        self.note("flush");
        if self.behaviour == Behaviour::FailFlush {
            return Err(AgentError::storage("disk full"));
        }
        Ok(())
    }
}

pub(super) fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub(super) fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().expect("journal lock").clone()
}

pub(super) fn orchestrator() -> Orchestrator<DefaultClock> {
    Orchestrator::new(Arc::new(DefaultClock))
}

/// Storage, task, and UI stubs registered in that order.
pub(super) fn standard(journal: &Journal) -> Orchestrator<DefaultClock> {
    let mut orchestrator = orchestrator();
    for (name, namespace) in [
        ("storage_stub", Namespace::Storage),
        ("task_stub", Namespace::Task),
        ("ui_stub", Namespace::Ui),
    ] {
        orchestrator
            .register(Arc::new(StubAgent::new(name, namespace, journal)))
            .expect("registration succeeds");
    }
    orchestrator
}

pub(super) fn sender() -> AgentName {
    AgentName::new("tester").expect("valid sender")
}

pub(super) fn task_list() -> Request {
    Request::new(
        sender(),
        Action::Task(TaskAction::List(ListTasks::all())),
        &DefaultClock,
    )
}

pub(super) fn system(action: SystemAction) -> Request {
    Request::new(sender(), Action::System(action), &DefaultClock)
}
