//! Tests for request construction.

use crate::contract::{
    Action, AgentName, CorrelationId, ListTasks, Request, RequestId, SystemAction, TaskAction,
};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn sender() -> AgentName {
    AgentName::new("console").expect("valid sender")
}

#[rstest]
fn new_request_defaults_recipient_to_namespace_owner(sender: AgentName) {
    let request = Request::new(
        sender,
        Action::Task(TaskAction::List(ListTasks::all())),
        &DefaultClock,
    );
    assert_eq!(request.recipient().as_str(), "task_manager");
    assert_eq!(request.action().name(), "task_list");
}

#[rstest]
fn new_requests_get_distinct_ids_and_correlation_ids(sender: AgentName) {
    let action = Action::System(SystemAction::Status);
    let first = Request::new(sender.clone(), action.clone(), &DefaultClock);
    let second = Request::new(sender, action, &DefaultClock);

    assert_ne!(first.id(), second.id());
    assert_ne!(first.correlation_id(), second.correlation_id());
}

#[rstest]
fn builder_keeps_caller_supplied_metadata(sender: AgentName) {
    let id = RequestId::new();
    let correlation = CorrelationId::new("trace-abc").expect("valid token");
    let at = Utc
        .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp");
    let recipient = AgentName::new("somebody").expect("valid recipient");

    let request = Request::builder(sender, Action::System(SystemAction::Agents))
        .with_id(id)
        .with_correlation_id(correlation.clone())
        .with_timestamp(at)
        .with_recipient(recipient.clone())
        .build(&DefaultClock);

    assert_eq!(request.id(), id);
    assert_eq!(request.correlation_id(), &correlation);
    assert_eq!(request.timestamp(), at);
    assert_eq!(request.recipient(), &recipient);
}

#[rstest]
fn child_requests_share_the_parent_correlation_id(sender: AgentName) {
    let parent = Request::new(
        sender,
        Action::Task(TaskAction::List(ListTasks::all())),
        &DefaultClock,
    );
    let child = parent.child(
        AgentName::new("task_manager").expect("valid name"),
        Action::System(SystemAction::Status),
        &DefaultClock,
    );

    assert_eq!(child.correlation_id(), parent.correlation_id());
    assert_ne!(child.id(), parent.id());
    assert_eq!(child.sender().as_str(), "task_manager");
}
