//! Tests for typed actions and the wire-name parser.

use crate::contract::{
    Action, AddTask, ErrorKind, Namespace, Record, StorageAction, SystemAction, TaskAction,
    UiAction,
};
use rstest::rstest;
use serde_json::{Value, json};

fn payload(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

#[rstest]
fn from_wire_builds_typed_task_action() {
    let action = Action::from_wire(
        "task_add",
        payload(json!({"title": "Buy milk", "description": "2 litres"})),
    )
    .expect("valid action");

    assert_eq!(
        action,
        Action::Task(TaskAction::Add(
            AddTask::new("Buy milk").with_description("2 litres")
        ))
    );
    assert_eq!(action.name(), "task_add");
    assert_eq!(action.namespace(), Namespace::Task);
}

#[rstest]
#[case("task_list", Namespace::Task)]
#[case("storage_list", Namespace::Storage)]
#[case("ui_show_message", Namespace::Ui)]
#[case("system_status", Namespace::System)]
fn from_wire_uses_prefix_for_namespace(#[case] name: &str, #[case] expected: Namespace) {
    let body = match expected {
        Namespace::Storage => json!({"entity_type": "task"}),
        Namespace::Ui => json!({"text": "hi"}),
        Namespace::Task | Namespace::System => json!({}),
    };
    let action = Action::from_wire(name, payload(body)).expect("valid action");
    assert_eq!(action.namespace(), expected);
    assert_eq!(action.name(), name);
}

#[rstest]
#[case("fly_to_moon")]
#[case("nothing")]
#[case("task_fly")]
#[case("system_reboot")]
fn from_wire_rejects_unknown_actions_as_routing_errors(#[case] name: &str) {
    let error = Action::from_wire(name, Record::new()).expect_err("unknown action");
    assert_eq!(error.kind(), ErrorKind::RoutingError);
}

#[rstest]
fn from_wire_rejects_blank_name_as_validation_error() {
    let error = Action::from_wire("  ", Record::new()).expect_err("blank action");
    assert_eq!(error.kind(), ErrorKind::ValidationError);
}

#[rstest]
#[case("task_get", json!({"task_id": "abc"}))]
#[case("task_get", json!({"task_id": 0}))]
#[case("task_get", json!({"task_id": -3}))]
#[case("task_add", json!({}))]
#[case("task_add", json!({"title": "x", "colour": "red"}))]
#[case("storage_save", json!({"entity_type": "task"}))]
fn from_wire_rejects_malformed_payloads_as_validation_errors(
    #[case] name: &str,
    #[case] body: Value,
) {
    let error = Action::from_wire(name, payload(body)).expect_err("malformed payload");
    assert_eq!(error.kind(), ErrorKind::ValidationError);
    assert!(error.to_string().contains(name));
}

#[rstest]
fn every_listed_name_parses_back_to_the_same_name() {
    let samples: Vec<(&str, Value)> = vec![
        ("task_add", json!({"title": "t"})),
        ("task_get", json!({"task_id": 1})),
        ("task_update", json!({"task_id": 1, "title": "t"})),
        ("task_list", json!({})),
        ("task_complete", json!({"task_id": 1})),
        ("task_reopen", json!({"task_id": 1})),
        ("task_delete", json!({"task_id": 1})),
        ("storage_save", json!({"entity_type": "e", "data": {}})),
        ("storage_get", json!({"entity_type": "e", "id": 1})),
        ("storage_delete", json!({"entity_type": "e", "id": 1})),
        ("storage_list", json!({"entity_type": "e"})),
        ("storage_query", json!({"entity_type": "e", "filters": {"a": 1}})),
        ("storage_clear", json!({"entity_type": "e"})),
        ("ui_show_menu", json!({"title": "m", "options": []})),
        ("ui_show_tasks", json!({"title": "t"})),
        ("ui_get_input", json!({"prompt": "p"})),
        ("ui_confirm", json!({"prompt": "p"})),
        ("ui_show_message", json!({"text": "t", "kind": "warning"})),
        ("ui_select_item", json!({"prompt": "p", "items": []})),
        ("system_status", json!({})),
        ("system_agents", json!({})),
        ("system_shutdown", json!({})),
    ];
    let listed: Vec<&str> = TaskAction::NAMES
        .iter()
        .chain(StorageAction::NAMES)
        .chain(UiAction::NAMES)
        .chain(SystemAction::NAMES)
        .copied()
        .collect();

    assert_eq!(listed.len(), samples.len());
    for (name, body) in samples {
        assert!(listed.contains(&name), "{name} missing from NAMES");
        let action = Action::from_wire(name, payload(body)).expect("valid sample");
        assert_eq!(action.name(), name);
    }
}
