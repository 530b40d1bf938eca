//! Integration tests for orchestrator-wide guarantees.
//!
//! These tests drive a fully wired orchestrator through its public routing
//! surface and check properties that hold across agents: id allocation under
//! concurrency, routing coverage of every action name, and correlation
//! preservation.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use taskmesh::{
    agent::Agent,
    contract::{
        ErrorKind, Record, Response, StorageAction, SystemAction, TaskAction, UiAction,
        WireRequest,
    },
    orchestrator::services::Orchestrator,
    presentation::{adapters::ScriptedAdapter, services::PresentationAgent},
    storage::{adapters::memory::InMemoryBackend, services::StorageAgent},
    task::services::TaskAgent,
};

const SENDER: &str = "property_tests";

type Shared = Arc<Orchestrator<DefaultClock>>;

#[fixture]
fn orchestrator() -> Shared {
    let clock = Arc::new(DefaultClock);
    let storage: Arc<dyn Agent> = Arc::new(StorageAgent::new(
        Arc::new(InMemoryBackend::new()),
        Arc::clone(&clock),
    ));
    let tasks = TaskAgent::new(Arc::clone(&storage), Arc::clone(&clock));
    let ui = PresentationAgent::new(Arc::new(ScriptedAdapter::default()), Arc::clone(&clock));

    let mut orchestrator = Orchestrator::new(clock);
    orchestrator.register(storage).expect("register storage");
    orchestrator.register(Arc::new(tasks)).expect("register tasks");
    orchestrator.register(Arc::new(ui)).expect("register ui");
    Arc::new(orchestrator)
}

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

fn save_note(index: usize) -> WireRequest {
    WireRequest::new(SENDER, "storage_save").with_payload(record(json!({
        "entity_type": "note",
        "data": { "index": index },
    })))
}

fn saved_id(response: &Response) -> u64 {
    response
        .result()
        .and_then(|result| result.pointer("/record/id"))
        .and_then(Value::as_u64)
        .expect("saved record id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_receive_distinct_ids(orchestrator: Shared) {
    orchestrator.start().await.expect("start");

    let handles = (0..100).map(|index| {
        let shared = Arc::clone(&orchestrator);
        tokio::spawn(async move { shared.route_wire(save_note(index)).await })
    });
    let ids: Vec<u64> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| saved_id(&joined.expect("save task completes")))
        .collect();

    let distinct: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), 100);
    assert_eq!(distinct.iter().min(), Some(&1));
    assert_eq!(distinct.iter().max(), Some(&100));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ids_increase_and_are_never_reused(orchestrator: Shared) {
    orchestrator.start().await.expect("start");

    let mut previous = 0;
    for index in 0..5 {
        let id = saved_id(&orchestrator.route_wire(save_note(index)).await);
        assert!(id > previous, "id {id} does not follow {previous}");
        previous = id;
    }

    let deleted = orchestrator
        .route_wire(
            WireRequest::new(SENDER, "storage_delete")
                .with_payload(record(json!({ "entity_type": "note", "id": previous }))),
        )
        .await;
    assert_eq!(
        deleted.result().and_then(|result| result.get("deleted")),
        Some(&json!(true))
    );

    let next = saved_id(&orchestrator.route_wire(save_note(99)).await);
    assert!(next > previous, "id {next} reuses a deleted id");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_action_name_reaches_an_owner(orchestrator: Shared) {
    orchestrator.start().await.expect("start");

    let names = TaskAction::NAMES
        .iter()
        .chain(StorageAction::NAMES)
        .chain(UiAction::NAMES)
        .chain(SystemAction::NAMES)
        .filter(|name| **name != "system_shutdown");
    for name in names {
        let response = orchestrator
            .route_wire(WireRequest::new(SENDER, *name))
            .await;
        let kind = response.error().map(|error| error.kind());
        assert_ne!(
            kind,
            Some(ErrorKind::RoutingError),
            "{name} was not routed: {:?}",
            response.error()
        );
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn responses_echo_the_callers_correlation_id(orchestrator: Shared) {
    orchestrator.start().await.expect("start");

    let cases = [
        WireRequest::new(SENDER, "task_add").with_payload(record(json!({ "title": "Trace" }))),
        WireRequest::new(SENDER, "task_add").with_payload(record(json!({ "title": " " }))),
        WireRequest::new(SENDER, "task_get").with_payload(record(json!({ "task_id": 42 }))),
        WireRequest::new(SENDER, "frobnicate_x"),
        WireRequest::new(SENDER, "system_status"),
    ];
    for (index, wire) in cases.into_iter().enumerate() {
        let token = format!("trace-{index}");
        let response = orchestrator
            .route_wire(wire.with_correlation_id(token.clone()))
            .await;
        assert_eq!(response.correlation_id().as_str(), token);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn shutdown_is_idempotent_and_final(orchestrator: Shared) {
    orchestrator.start().await.expect("start");

    let first = orchestrator.shutdown().await;
    let second = orchestrator.shutdown().await;
    assert!(!first.repeated);
    assert!(second.repeated);
    assert!(first.failures.is_empty());

    let response = orchestrator
        .route_wire(WireRequest::new(SENDER, "task_list"))
        .await;
    assert_eq!(
        response.error().map(|error| error.kind()),
        Some(ErrorKind::RoutingError)
    );
}
