//! Tests for the provided agent behaviour.

use crate::agent::{Agent, AgentLifecycle};
use crate::contract::{
    Action, AgentError, AgentName, AgentResult, AgentStatus, AgentVersion, ErrorKind, ListTasks,
    Namespace, Request, SystemAction, TaskAction,
};
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};

struct EchoAgent {
    name: AgentName,
    version: AgentVersion,
    lifecycle: AgentLifecycle,
    clock: DefaultClock,
    fail_start: bool,
    shutdown_calls: AtomicUsize,
}

impl EchoAgent {
    fn new(fail_start: bool) -> Self {
        Self {
            name: AgentName::new("echo").expect("valid name"),
            version: AgentVersion::new("0.1.0").expect("valid version"),
            lifecycle: AgentLifecycle::new(),
            clock: DefaultClock,
            fail_start,
            shutdown_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Agent for EchoAgent {
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
        &self.clock
    }

    async fn dispatch(&self, request: &Request) -> AgentResult<Value> {
        match request.action() {
            Action::Task(action) => Ok(json!({"echo": action.name()})),
            other => Err(self.unsupported(other)),
        }
    }

    async fn on_start(&self) -> AgentResult<()> {
        if self.fail_start {
            return Err(AgentError::internal("no config"));
        }
        Ok(())
    }

    async fn on_shutdown(&self) -> AgentResult<()> {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[fixture]
fn agent() -> EchoAgent {
    EchoAgent::new(false)
}

fn request(action: Action) -> Request {
    Request::new(
        AgentName::new("tester").expect("valid sender"),
        action,
        &DefaultClock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn start_and_shutdown_are_idempotent(agent: EchoAgent) {
    assert!(!agent.is_running());
    agent.start().await.expect("start");
    agent.start().await.expect("second start");
    assert!(agent.is_running());
    assert_eq!(agent.info().status(), AgentStatus::Active);

    agent.shutdown().await.expect("shutdown");
    agent.shutdown().await.expect("second shutdown");
    assert!(!agent.is_running());
    assert_eq!(agent.shutdown_calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_start_hook_marks_agent_as_error() {
    let failing = EchoAgent::new(true);
    let error = failing.start().await.expect_err("start fails");

    assert_eq!(error.kind(), ErrorKind::AgentInitError);
    assert_eq!(error.to_string(), "agent echo failed to start: no config");
    assert_eq!(failing.info().status(), AgentStatus::Error);
    assert!(!failing.is_running());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handle_wraps_dispatch_result(agent: EchoAgent) {
    let incoming = request(Action::Task(TaskAction::List(ListTasks::all())));
    let response = agent.handle(incoming.clone()).await;

    assert_eq!(response.result(), Some(&json!({"echo": "task_list"})));
    assert_eq!(response.request_id(), incoming.id());
    assert_eq!(response.sender().as_str(), "echo");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handle_turns_dispatch_errors_into_error_responses(agent: EchoAgent) {
    let incoming = request(Action::System(SystemAction::Status));
    let response = agent.handle(incoming.clone()).await;

    let error = response.error().expect("error response");
    assert_eq!(error.kind(), ErrorKind::RoutingError);
    assert_eq!(
        error.message(),
        "agent echo does not handle action 'system_status'"
    );
    assert_eq!(response.correlation_id(), incoming.correlation_id());
}

#[rstest]
fn info_lists_supported_actions(agent: EchoAgent) {
    let info = agent.info();
    assert_eq!(info.name().as_str(), "echo");
    assert_eq!(info.version().as_str(), "0.1.0");
    assert_eq!(info.supported_actions().len(), TaskAction::NAMES.len());
    assert_eq!(info.status(), AgentStatus::Inactive);
}
