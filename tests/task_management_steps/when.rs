//! When steps for task management BDD scenarios.

use super::world::{OrchestratorWorld, payload};
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#"I add a task titled "{title}""#)]
fn add_task(world: &mut OrchestratorWorld, title: String) {
    world.send("task_add", payload(json!({ "title": title })));
}

#[when("I add a task with a blank title")]
fn add_blank_task(world: &mut OrchestratorWorld) {
    world.send("task_add", payload(json!({ "title": "   " })));
}

#[when("I complete the last task")]
fn complete_last_task(world: &mut OrchestratorWorld) -> Result<(), eyre::Report> {
    let task_id = world.last_task_id()?;
    world.send("task_complete", payload(json!({ "task_id": task_id })));
    Ok(())
}

#[when(r#"I send the action "{action}""#)]
fn send_action(world: &mut OrchestratorWorld, action: String) {
    world.send(&action, payload(json!({})));
}

#[when(r#"I request "{action}" for task {task_id:u64}"#)]
fn request_for_task(world: &mut OrchestratorWorld, action: String, task_id: u64) {
    world.send(&action, payload(json!({ "task_id": task_id })));
}
